//! Core client types

pub mod config;
pub mod error;
pub mod facility;
pub mod fixed_str;
pub mod formatter;
pub mod line_buffer;
pub mod lock;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use config::{LoggerConfig, DEFAULT_MAX_RECORD_SIZE, DEFAULT_PORT};
pub use error::{LoggerError, Result};
pub use facility::Facility;
pub use formatter::{priority, severity, Rfc3164Formatter};
pub use line_buffer::{LineAccumulator, LineState, DEFAULT_LINE_CAPACITY};
pub use lock::DEFAULT_LOCK_TIMEOUT;
pub use log_level::LogLevel;
pub use logger::{Delivery, SyslogLogger, SyslogLoggerBuilder};
pub use metrics::Stats;
pub use timestamp::{FixedClock, SystemClock, TimestampProvider};
