//! On-disk settings store.
//!
//! Settings live in a single JSON document. A missing or unreadable document
//! falls back to defaults, so a broken file never prevents the pad from
//! starting.

use crate::settings::{ClientConfig, keys};
use anyhow::{Context, Result};
use mobpad_errors::ConfigError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "mobpad.json";

/// Location of the settings file under the user's config directory.
///
/// # Errors
///
/// Returns an error if no home directory can be determined.
pub fn default_config_path() -> Result<PathBuf> {
    let base = if cfg!(windows) {
        std::env::var("APPDATA")
            .or_else(|_| std::env::var("LOCALAPPDATA"))
            .context("APPDATA environment variable not set")?
    } else {
        match std::env::var("XDG_CONFIG_HOME") {
            Ok(dir) => dir,
            Err(_) => {
                let home = std::env::var("HOME").context("HOME environment variable not set")?;
                format!("{home}/.config")
            }
        }
    };
    Ok(PathBuf::from(base).join("mobpad").join(CONFIG_FILE))
}

/// Reads and writes [`ClientConfig`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_config_path`].
    ///
    /// # Errors
    ///
    /// Returns an error if the default path cannot be resolved.
    pub fn at_default_path() -> Result<Self> {
        default_config_path().map(Self::new)
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw stored document. Missing or unparsable files read as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub async fn load_raw(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Settings file not found");
            return Ok(Map::new());
        }
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read settings file: {}", self.path.display()))?;
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                warn!(path = %self.path.display(), "Settings file is not a JSON object, ignoring");
                Ok(Map::new())
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to parse settings, ignoring");
                Ok(Map::new())
            }
        }
    }

    /// Load settings, falling back to defaults for anything missing or invalid.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub async fn load(&self) -> Result<ClientConfig> {
        let raw = self.load_raw().await?;
        let config = match serde_json::from_value::<ClientConfig>(Value::Object(raw)) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Stored settings have the wrong shape, using defaults");
                return Ok(ClientConfig::default());
            }
        };
        if let Err(e) = config.validate() {
            warn!(error = %e, "Stored settings are out of range, using defaults");
            return Ok(ClientConfig::default());
        }
        Ok(config)
    }

    /// Write `config` after validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the file cannot be written.
    pub async fn save(&self, config: &ClientConfig) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(config).context("Failed to serialize settings")?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write settings file: {}", self.path.display()))?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Merge `partial` over the stored settings and persist the result.
    ///
    /// Keys absent from `partial` keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, values of the wrong type, values out
    /// of range, or I/O failures. Nothing is written on error.
    pub async fn apply(&self, partial: Map<String, Value>) -> Result<ClientConfig> {
        if let Some(key) = partial.keys().find(|k| !keys::ALL.contains(&k.as_str())) {
            return Err(ConfigError::UnknownKey(key.clone()).into());
        }
        let current = self.load().await?;
        let mut merged = match serde_json::to_value(&current).context("Failed to serialize settings")? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.extend(partial);
        let config: ClientConfig = serde_json::from_value(Value::Object(merged))
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        self.save(&config).await?;
        Ok(config)
    }

    /// Stored value for `key`, or `default` when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub async fn get_value(&self, key: &str, default: Value) -> Result<Value> {
        let raw = self.load_raw().await?;
        Ok(raw.get(key).cloned().unwrap_or(default))
    }

    /// Set a single key.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigStore::apply`].
    pub async fn set_value(&self, key: &str, value: Value) -> Result<ClientConfig> {
        let mut partial = Map::new();
        partial.insert(key.to_string(), value);
        self.apply(partial).await
    }

    /// Restore defaults on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn reset(&self) -> Result<ClientConfig> {
        let config = ClientConfig::default();
        self.save(&config).await?;
        info!("Settings reset to defaults");
        Ok(config)
    }
}
