//! The player settings record.

use mobpad_errors::ConfigError;
use mobpad_input::DEFAULT_EXTENT_RADIUS;
use mobpad_protocol::{PlayerColour, SettingsMessage};
use serde::{Deserialize, Serialize};

/// Setting names as stored on disk.
pub mod keys {
    /// Name shown on the host
    pub const PLAYER_NAME: &str = "PLAYER_NAME";
    /// First swatch colour
    pub const PLAYER_COL_1: &str = "PLAYER_COL_1";
    /// Second swatch colour
    pub const PLAYER_COL_2: &str = "PLAYER_COL_2";
    /// Analog stick sensitivity, 0 to 1
    pub const ANALOG_STICK_SENSITIVITY: &str = "ANALOG_STICK_SENSITIVITY";
    /// Whether the on-screen log is visible
    pub const SHOW_LOG: &str = "SHOW_LOG";
    /// Whether rumble commands vibrate the device
    pub const VIBRATION: &str = "VIBRATION";
    /// Which pad layout is shown
    pub const PAD_INDEX: &str = "PAD_INDEX";
    /// Host websocket endpoint
    pub const SERVER_URL: &str = "SERVER_URL";
    /// Log filter level
    pub const LOG_LEVEL: &str = "LOG_LEVEL";

    /// Every known key.
    pub const ALL: [&str; 9] = [
        PLAYER_NAME,
        PLAYER_COL_1,
        PLAYER_COL_2,
        ANALOG_STICK_SENSITIVITY,
        SHOW_LOG,
        VIBRATION,
        PAD_INDEX,
        SERVER_URL,
        LOG_LEVEL,
    ];
}

/// Default player name.
pub const DEFAULT_NAME: &str = "Player";

/// Default stick sensitivity.
pub const DEFAULT_SENSITIVITY: f64 = 0.6;

/// Sensitivity floor used when deriving the stick radius.
pub const MIN_SENSITIVITY: f64 = 0.05;

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 32;

/// Number of pad layouts.
pub const PAD_COUNT: u8 = 2;

/// Colours offered by the swatch picker.
pub const PALETTE: [PlayerColour; 16] = [
    PlayerColour::new(0x00, 0x00, 0x00),
    PlayerColour::new(0x49, 0x3c, 0x2b),
    PlayerColour::new(0xbe, 0x26, 0x33),
    PlayerColour::new(0xe0, 0x6f, 0x8b),
    PlayerColour::new(0x9d, 0x9d, 0x9d),
    PlayerColour::new(0xa4, 0x64, 0x22),
    PlayerColour::new(0xeb, 0x89, 0x31),
    PlayerColour::new(0xf7, 0xe2, 0x6b),
    PlayerColour::new(0xff, 0xff, 0xff),
    PlayerColour::new(0x1b, 0x26, 0x32),
    PlayerColour::new(0x2f, 0x48, 0x4e),
    PlayerColour::new(0x44, 0x89, 0x1a),
    PlayerColour::new(0xa3, 0xce, 0x27),
    PlayerColour::new(0x00, 0x57, 0x84),
    PlayerColour::new(0x31, 0xa2, 0xf2),
    PlayerColour::new(0xb2, 0xdc, 0xef),
];

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Player settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Name shown on the host
    #[serde(rename = "PLAYER_NAME")]
    pub player_name: String,
    /// First swatch colour
    #[serde(rename = "PLAYER_COL_1")]
    pub player_colour_1: PlayerColour,
    /// Second swatch colour
    #[serde(rename = "PLAYER_COL_2")]
    pub player_colour_2: PlayerColour,
    /// Analog stick sensitivity in `(0, 1]`
    #[serde(rename = "ANALOG_STICK_SENSITIVITY")]
    pub analog_stick_sensitivity: f64,
    /// Whether the on-screen log is visible
    #[serde(rename = "SHOW_LOG")]
    pub show_log: bool,
    /// Whether rumble commands vibrate the device
    #[serde(rename = "VIBRATION")]
    pub vibration: bool,
    /// Which pad layout is shown, 1-based
    #[serde(rename = "PAD_INDEX")]
    pub pad_index: u8,
    /// Host websocket endpoint
    #[serde(rename = "SERVER_URL")]
    pub server_url: String,
    /// Log filter level
    #[serde(rename = "LOG_LEVEL")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_NAME.to_string(),
            player_colour_1: PlayerColour::new(0xff, 0xff, 0xff),
            player_colour_2: PlayerColour::new(0x1b, 0x26, 0x32),
            analog_stick_sensitivity: DEFAULT_SENSITIVITY,
            show_log: false,
            vibration: true,
            pad_index: 1,
            server_url: "ws://localhost/mobcontrol/".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Check every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_name.trim().is_empty() || self.player_name.chars().count() > MAX_NAME_LEN {
            return Err(ConfigError::invalid_value(keys::PLAYER_NAME, &self.player_name));
        }
        let sensitivity = self.analog_stick_sensitivity;
        if !sensitivity.is_finite() || sensitivity <= 0.0 || sensitivity > 1.0 {
            return Err(ConfigError::invalid_value(keys::ANALOG_STICK_SENSITIVITY, sensitivity));
        }
        if self.pad_index == 0 || self.pad_index > PAD_COUNT {
            return Err(ConfigError::invalid_value(keys::PAD_INDEX, self.pad_index));
        }
        if !(self.server_url.starts_with("ws://") || self.server_url.starts_with("wss://")) {
            return Err(ConfigError::invalid_value(keys::SERVER_URL, &self.server_url));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(keys::LOG_LEVEL, &self.log_level));
        }
        Ok(())
    }

    /// Stick travel radius in pixels for the configured sensitivity.
    ///
    /// Higher sensitivity means a shorter drag reaches full deflection. The
    /// default sensitivity gives the stock 20 px radius.
    pub fn extent_radius(&self) -> f64 {
        let sensitivity = if self.analog_stick_sensitivity.is_finite() {
            self.analog_stick_sensitivity.clamp(MIN_SENSITIVITY, 1.0)
        } else {
            DEFAULT_SENSITIVITY
        };
        DEFAULT_EXTENT_RADIUS * DEFAULT_SENSITIVITY / sensitivity
    }

    /// Messages announcing the player's name and colours to the host.
    pub fn settings_messages(&self) -> [SettingsMessage; 3] {
        [
            SettingsMessage::SetName(self.player_name.clone()),
            SettingsMessage::SetColour {
                index: 1,
                colour: self.player_colour_1,
            },
            SettingsMessage::SetColour {
                index: 2,
                colour: self.player_colour_2,
            },
        ]
    }
}
