//! Player settings for the MobPad client.
//!
//! [`ClientConfig`] is the typed settings record and [`ConfigStore`] keeps it
//! in a JSON file between sessions.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use mobpad_config::ConfigStore;
//!
//! let store = ConfigStore::at_default_path()?;
//! let config = store.set_value("PLAYER_NAME", "Ada".into()).await?;
//! assert_eq!(config.player_name, "Ada");
//! # Ok(())
//! # }
//! ```

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

pub mod settings;
pub mod store;

pub use settings::{ClientConfig, DEFAULT_SENSITIVITY, PALETTE, keys};
pub use store::{ConfigStore, default_config_path};
