//! File-based configuration
//!
//! [`LoggerConfig`] is the serializable form of everything the builder can
//! set. Missing fields take the same defaults as the builder.
//!
//! ```
//! use rust_syslog_client::core::config::LoggerConfig;
//! use rust_syslog_client::{Facility, LogLevel};
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "server": "192.0.2.1",
//!     "facility": "LOG_LOCAL0",
//!     "min_level": "Info"
//! }"#).unwrap();
//!
//! assert_eq!(config.port, 514);
//! assert_eq!(config.facility, Facility::LOG_LOCAL0);
//! assert_eq!(config.min_level, LogLevel::Info);
//! ```

use super::error::Result;
use super::facility::Facility;
use super::line_buffer::DEFAULT_LINE_CAPACITY;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Well-known syslog port
pub const DEFAULT_PORT: u16 = 514;

/// Largest record, terminator included
pub const DEFAULT_MAX_RECORD_SIZE: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Collector address; `None` leaves the client on its fallback sink
    pub server: Option<String>,
    pub port: u16,
    pub facility: Facility,
    /// `None` means the system hostname
    pub hostname: Option<String>,
    pub app_name: String,
    pub min_level: LogLevel,
    pub lock_timeout_ms: u64,
    pub max_record_size: usize,
    pub line_capacity: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            server: None,
            port: DEFAULT_PORT,
            facility: Facility::LOG_USER,
            hostname: None,
            app_name: "logger".to_string(),
            min_level: LogLevel::Verbose,
            lock_timeout_ms: 100,
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
            line_capacity: DEFAULT_LINE_CAPACITY,
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}
