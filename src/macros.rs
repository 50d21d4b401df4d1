//! Logging macros for ergonomic message formatting.
//!
//! Each macro takes a logger, a tag, and `format!`-style arguments. The
//! rendered message is truncated to the same limits as
//! [`SyslogLogger::log_fmt`](crate::SyslogLogger::log_fmt) and
//! [`SyslogLogger::log_line_fmt`](crate::SyslogLogger::log_line_fmt).
//!
//! # Examples
//!
//! ```
//! use rust_syslog_client::prelude::*;
//! use rust_syslog_client::info;
//!
//! let logger = SyslogLogger::builder().hostname("docs").build().unwrap();
//!
//! // Basic logging
//! info!(logger, "boot", "Controller started");
//!
//! // With format arguments
//! let port = 514;
//! info!(logger, "net", "Shipping to collector port {}", port);
//! ```

/// Send one complete, formatted message. Evaluates to `bool`.
///
/// # Examples
///
/// ```
/// # use rust_syslog_client::prelude::*;
/// # let logger = SyslogLogger::builder().hostname("docs").build().unwrap();
/// use rust_syslog_client::syslog;
/// syslog!(logger, LogLevel::Info, "net", "Simple message");
/// syslog!(logger, LogLevel::Error, "net", "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! syslog {
    ($logger:expr, $level:expr, $tag:expr, $($arg:tt)+) => {
        $logger.log_fmt($level, $tag, format_args!($($arg)+))
    };
}

/// Feed a formatted fragment through the line accumulator. Evaluates to `bool`.
///
/// # Examples
///
/// ```
/// # use rust_syslog_client::prelude::*;
/// # let logger = SyslogLogger::builder().hostname("docs").build().unwrap();
/// use rust_syslog_client::syslog_line;
/// syslog_line!(logger, LogLevel::Info, "sh", "progress: {}%", 40);
/// syslog_line!(logger, LogLevel::Info, "sh", " done\n");
/// ```
#[macro_export]
macro_rules! syslog_line {
    ($logger:expr, $level:expr, $tag:expr, $($arg:tt)+) => {
        $logger.log_line_fmt($level, $tag, format_args!($($arg)+))
    };
}

/// Log an error-level message.
///
/// ```
/// # use rust_syslog_client::prelude::*;
/// # let logger = SyslogLogger::builder().hostname("docs").build().unwrap();
/// use rust_syslog_client::error;
/// error!(logger, "db", "Failed to connect: {}", "refused");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $tag:expr, $($arg:tt)+) => {
        $crate::syslog!($logger, $crate::LogLevel::Error, $tag, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $tag:expr, $($arg:tt)+) => {
        $crate::syslog!($logger, $crate::LogLevel::Warning, $tag, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $tag:expr, $($arg:tt)+) => {
        $crate::syslog!($logger, $crate::LogLevel::Info, $tag, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $tag:expr, $($arg:tt)+) => {
        $crate::syslog!($logger, $crate::LogLevel::Debug, $tag, $($arg)+)
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $tag:expr, $($arg:tt)+) => {
        $crate::syslog!($logger, $crate::LogLevel::Verbose, $tag, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, SyslogLogger};
    use crate::transport::FallbackSink;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<String>>>);

    impl FallbackSink for Captured {
        fn write_line(&self, _level: LogLevel, line: &str) {
            self.0.lock().unwrap().push(line.to_string());
        }
    }

    fn logger(sink: &Captured) -> SyslogLogger {
        SyslogLogger::builder()
            .hostname("test")
            .fallback_sink(sink.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn test_syslog_macro() {
        let sink = Captured::default();
        let logger = logger(&sink);
        assert!(syslog!(logger, LogLevel::Info, "t", "Test message"));
        assert!(syslog!(logger, LogLevel::Info, "t", "Formatted: {}", 42));
        assert_eq!(*sink.0.lock().unwrap(), vec!["Test message", "Formatted: 42"]);
    }

    #[test]
    fn test_level_macros() {
        let sink = Captured::default();
        let logger = logger(&sink);
        error!(logger, "t", "e{}", 1);
        warn!(logger, "t", "w{}", 2);
        info!(logger, "t", "i{}", 3);
        debug!(logger, "t", "d{}", 4);
        verbose!(logger, "t", "v{}", 5);
        assert_eq!(*sink.0.lock().unwrap(), vec!["e1", "w2", "i3", "d4", "v5"]);
    }

    #[test]
    fn test_level_macros_reach_console_before_configure() {
        let sink = Captured::default();
        let logger = logger(&sink);
        logger.set_min_level(LogLevel::Warning).unwrap();
        info!(logger, "t", "shown");
        warn!(logger, "t", "also shown");
        assert_eq!(*sink.0.lock().unwrap(), vec!["shown", "also shown"]);
    }

    #[test]
    fn test_syslog_line_macro() {
        let sink = Captured::default();
        let logger = logger(&sink);
        syslog_line!(logger, LogLevel::Info, "sh", "step {}", 1);
        syslog_line!(logger, LogLevel::Info, "sh", " of {}\n", 3);
        assert_eq!(*sink.0.lock().unwrap(), vec!["step 1 of 3"]);
    }
}
