//! Inbound `{type, data}` envelopes and the commands they carry.

use std::time::Duration;

use mobpad_errors::ProtocolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys the type tag may be stored under, in lookup order.
pub const TYPE_KEYS: [&str; 3] = ["type", "header", "__type__"];

/// Type tag of a rumble command.
pub const VIBRATE: &str = "vibrate";

/// A decoded inbound message: a type tag plus its opaque data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InboundMessage {
    kind: String,
    data: Value,
}

impl InboundMessage {
    /// Build a message directly.
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    /// Read the envelope out of a parsed JSON value.
    ///
    /// The tag comes from the first of [`TYPE_KEYS`] holding a string. A
    /// missing `data` field reads as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedJson`] if the value is not an object
    /// and [`ProtocolError::MissingType`] if it has no tag.
    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        let Value::Object(mut object) = value else {
            return Err(ProtocolError::MalformedJson(
                "expected a JSON object".to_string(),
            ));
        };
        let kind = TYPE_KEYS
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .map(str::to_owned)
            .ok_or(ProtocolError::MissingType)?;
        let data = object.remove("data").unwrap_or(Value::Null);
        Ok(Self { kind, data })
    }

    /// The type tag.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The raw data object.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Interpret the message as a known command.
    ///
    /// Unrecognized tags are not an error; they yield
    /// [`InboundCommand::Unrecognized`].
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidPayload`] when a recognized tag carries
    /// data of the wrong shape.
    pub fn command(&self) -> Result<InboundCommand, ProtocolError> {
        match self.kind.as_str() {
            VIBRATE => RumbleCommand::from_data(&self.data).map(InboundCommand::Vibrate),
            other => Ok(InboundCommand::Unrecognized(other.to_owned())),
        }
    }
}

/// Commands the client understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundCommand {
    /// Drive the vibration actuator
    Vibrate(RumbleCommand),
    /// Any other tag, ignored by the client
    Unrecognized(String),
}

/// Rumble request from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RumbleCommand {
    /// Left motor strength, nominally 0 to 1
    pub mag_left: f64,
    /// Right motor strength, nominally 0 to 1
    pub mag_right: f64,
    /// How long to rumble, in milliseconds
    pub duration_ms: f64,
}

impl RumbleCommand {
    fn from_data(data: &Value) -> Result<Self, ProtocolError> {
        let command = Self::deserialize(data)
            .map_err(|e| ProtocolError::invalid_payload(VIBRATE, e.to_string()))?;
        if command.duration_ms < 0.0 {
            return Err(ProtocolError::invalid_payload(
                VIBRATE,
                format!("negative duration {}", command.duration_ms),
            ));
        }
        Ok(command)
    }

    /// Mean of the two motor strengths, limited to `[0, 1]`.
    pub fn magnitude(&self) -> f64 {
        ((self.mag_left + self.mag_right) / 2.0).clamp(0.0, 1.0)
    }

    /// Requested duration.
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.duration_ms / 1000.0).unwrap_or_default()
    }
}
