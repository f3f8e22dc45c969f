//! MobPad client session.
//!
//! Wires the input engine ([`mobpad_input`]), the wire codec
//! ([`mobpad_protocol`]), the socket session ([`mobpad_connection`]) and the
//! player settings ([`mobpad_config`]) into one [`PadClient`] driven from a
//! single task.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mobpad_client::prelude::*;
//!
//! # async fn demo(surface: RgbaSurface) -> anyhow::Result<()> {
//! let log = init_logging(LoggingConfig::default())?;
//! let config = ConfigStore::at_default_path()?.load().await?;
//! let registry = Arc::new(ColourRegistry::standard());
//! let (mut client, handle) = PadClient::new(
//!     &config,
//!     connection_config(&config),
//!     registry,
//!     surface,
//!     WsSocketFactory,
//! );
//! client.attach_actuator(LogActuator);
//! let session = tokio::spawn(client.run());
//!
//! handle.pointer_down(PointerId(1), Point { x: 40.0, y: 60.0 }).await?;
//! handle.pointer_up(PointerId(1)).await?;
//! handle.shutdown().await?;
//! session.await?;
//! println!("{}", log.render());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod logging;
pub mod prelude;
pub mod session;
pub mod vibration;

pub use logging::{DEFAULT_LOG_LINES, LogBuffer, LoggingConfig, init_logging};
pub use session::{ClientCommand, ClientHandle, PadClient, connection_config};
pub use vibration::{Actuator, LogActuator, VibrationSubscriber, vibration_pattern};
