//! Outbound player settings messages and the colour values they carry.

use core::fmt;
use core::str::FromStr;

use mobpad_errors::ProtocolError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque player colour swatch.
///
/// Parses `#rrggbb`, `#rgb` and CSS `rgb(r, g, b)` text; formats as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerColour(pub [u8; 3]);

impl PlayerColour {
    /// Build a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Channel values in RGB order.
    pub const fn rgb(&self) -> [u8; 3] {
        self.0
    }
}

impl fmt::Display for PlayerColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let channel = |at: usize| {
                hex.get(at..at + 2)
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            };
            Some([channel(0)?, channel(2)?, channel(4)?])
        }
        3 => {
            let channel = |at: usize| {
                hex.get(at..=at)
                    .and_then(|digit| u8::from_str_radix(digit, 16).ok())
                    .map(|value| value * 17)
            };
            Some([channel(0)?, channel(1)?, channel(2)?])
        }
        _ => None,
    }
}

fn parse_rgb_function(body: &str) -> Option<[u8; 3]> {
    let mut channels = body.split(',').map(|part| part.trim().parse::<u8>().ok());
    let rgb = [channels.next()??, channels.next()??, channels.next()??];
    channels.next().is_none().then_some(rgb)
}

impl FromStr for PlayerColour {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let parsed = if let Some(hex) = text.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(body) = text.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
            parse_rgb_function(body)
        } else {
            None
        };
        parsed
            .map(Self)
            .ok_or_else(|| ProtocolError::invalid_payload("colour", format!("cannot parse '{s}'")))
    }
}

impl Serialize for PlayerColour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlayerColour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Player settings pushed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsMessage {
    /// `{"__type__": "set_name", "name": ..}`
    SetName(String),
    /// `{"__type__": "set_colour_N", "rgb": [r, g, b]}` for swatch `N`
    SetColour {
        /// Swatch number, 1 or 2
        index: u8,
        /// The new colour
        colour: PlayerColour,
    },
}

impl SettingsMessage {
    /// The `__type__` tag for this message.
    pub fn type_tag(&self) -> String {
        match self {
            SettingsMessage::SetName(_) => "set_name".to_string(),
            SettingsMessage::SetColour { index, .. } => format!("set_colour_{index}"),
        }
    }
}

impl Serialize for SettingsMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("__type__", &self.type_tag())?;
        match self {
            SettingsMessage::SetName(name) => map.serialize_entry("name", name)?,
            SettingsMessage::SetColour { colour, .. } => map.serialize_entry("rgb", &colour.rgb())?,
        }
        map.end()
    }
}
