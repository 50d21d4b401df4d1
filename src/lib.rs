//! # Rust Syslog Client
//!
//! A non-blocking RFC 3164 syslog client that ships records over UDP.
//!
//! ## Features
//!
//! - **Bounded waits**: every lock is taken with a timeout; a busy client
//!   drops the record and counts it instead of stalling the caller
//! - **Line reassembly**: fragments are joined into whole lines, one record
//!   per line, with over-long lines split into chunks
//! - **Local fallback**: before a collector is configured, messages go to
//!   the console
//! - **Delivery counters**: sent and failed totals for health reporting
//!
//! ```
//! use rust_syslog_client::prelude::*;
//!
//! let logger = SyslogLogger::builder()
//!     .hostname("pump-3")
//!     .app_name("ctrl")
//!     .facility(Facility::LOG_LOCAL0)
//!     .build()
//!     .unwrap();
//!
//! logger.configure("127.0.0.1", 514).unwrap();
//! logger.log(LogLevel::Info, "net", "link up");
//! logger.log_line(LogLevel::Info, "shell", "partial ");
//! logger.log_line(LogLevel::Info, "shell", "line\n");
//! ```

pub mod core;
pub mod macros;
pub mod transport;

pub mod prelude {
    pub use crate::core::{
        Delivery, Facility, LogLevel, LoggerConfig, LoggerError, Result, Stats, SyslogLogger,
        SyslogLoggerBuilder, TimestampProvider,
    };
    pub use crate::transport::{ConsoleSink, FallbackSink, NetworkStack, UdpStack};
}

pub use core::{
    Delivery, Facility, LogLevel, LoggerConfig, LoggerError, Result, Stats, SyslogLogger,
    SyslogLoggerBuilder,
};
pub use transport::{ConsoleSink, FallbackSink, UdpStack};
