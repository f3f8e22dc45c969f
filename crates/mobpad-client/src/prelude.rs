//! Everything needed to run a client session.

pub use crate::logging::{LogBuffer, LoggingConfig, init_logging};
pub use crate::session::{ClientCommand, ClientHandle, PadClient, connection_config};
pub use crate::vibration::{Actuator, LogActuator, VibrationSubscriber};
pub use mobpad_config::{ClientConfig, ConfigStore};
pub use mobpad_connection::{ConnectionConfig, ReadyState, SendOutcome, WsSocketFactory};
pub use mobpad_input::{ColourRegistry, PixelSurface, Point, PointerId, RgbaSurface};
