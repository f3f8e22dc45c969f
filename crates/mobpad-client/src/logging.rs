//! Logging initialisation and the on-screen log buffer.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use mobpad_config::ClientConfig;
use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber, info};
use tracing_subscriber::layer::{Context, Layer};

/// Lines kept by the on-screen log.
pub const DEFAULT_LOG_LINES: usize = 100;

/// Logging setup.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is not set
    pub level: Level,
    /// Lines kept by the [`LogBuffer`]
    pub buffer_lines: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            buffer_lines: DEFAULT_LOG_LINES,
        }
    }
}

impl LoggingConfig {
    /// Logging setup for the stored player settings.
    pub fn from_client_config(config: &ClientConfig) -> Self {
        Self {
            level: Level::from_str(&config.log_level).unwrap_or(Level::INFO),
            ..Self::default()
        }
    }
}

/// Install the global subscriber: env filter, console output and a
/// [`LogBuffer`] that is returned for display.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: LoggingConfig) -> Result<LogBuffer> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));
    let buffer = LogBuffer::with_capacity(config.buffer_lines);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .with(buffer.clone())
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!(level = %config.level, lines = config.buffer_lines, "Logging initialized");
    Ok(buffer)
}

/// Most recent log lines, newest first.
///
/// Cloning shares the underlying buffer, so the copy handed to the
/// subscriber and the one held by the UI see the same lines.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_LINES)
    }
}

impl LogBuffer {
    /// Buffer keeping [`DEFAULT_LOG_LINES`] lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer keeping `capacity` lines.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Add a line at the top, dropping the oldest past capacity.
    pub fn push(&self, line: impl Into<String>) {
        let mut lines = self.lines.lock();
        lines.push_front(line.into());
        lines.truncate(self.capacity);
    }

    /// Snapshot of the buffer, newest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().iter().cloned().collect()
    }

    /// The whole buffer as display text, newest line first.
    pub fn render(&self) -> String {
        self.lines.lock().iter().map(String::as_str).collect::<Vec<_>>().join("\n")
    }

    /// Lines held.
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Drop every line.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl<S: Subscriber> Layer<S> for LogBuffer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut line = LineVisitor::default();
        event.record(&mut line);
        let meta = event.metadata();
        self.push(format!("{} {}: {}{}", meta.level(), meta.target(), line.message, line.fields));
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.fields.push_str(&format!(" {}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push_str(&format!(" {}={value:?}", field.name()));
        }
    }
}
