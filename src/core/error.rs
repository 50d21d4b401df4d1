//! Error types for the syslog client

use std::time::Duration;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Malformed destination or builder setting
    #[error("Invalid configuration for {field}: {message}")]
    Config { field: String, message: String },

    /// A bounded lock wait expired
    #[error("Timed out after {timeout:?} waiting for the {resource} lock")]
    LockTimeout {
        resource: &'static str,
        timeout: Duration,
    },

    /// Creating or binding a transport handle failed
    #[error("Failed to allocate transport handle: {message}")]
    TransportAlloc {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Sending on an already-open handle failed
    #[error("Send failed: {message}")]
    Send { message: String },

    /// Send failed inside the socket layer
    #[error("Send failed: {0}")]
    SendIo(std::io::Error),

    /// Rendered record would not fit its buffer
    #[error("Record of {needed} bytes does not fit a {capacity}-byte buffer")]
    Format { needed: usize, capacity: usize },

    /// Configuration file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoggerError {
    /// Create a configuration error for `field`
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a lock timeout error
    pub fn lock_timeout(resource: &'static str, timeout: Duration) -> Self {
        LoggerError::LockTimeout { resource, timeout }
    }

    /// Create a transport allocation error
    pub fn transport_alloc(message: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::TransportAlloc {
            message: message.into(),
            source,
        }
    }

    /// Create a send error
    pub fn send<S: Into<String>>(message: S) -> Self {
        LoggerError::Send {
            message: message.into(),
        }
    }

    /// Create a format error
    pub fn format(needed: usize, capacity: usize) -> Self {
        LoggerError::Format { needed, capacity }
    }

    /// Errors that count against `failed` when they occur on the send path
    pub fn is_delivery_failure(&self) -> bool {
        matches!(
            self,
            LoggerError::LockTimeout { .. }
                | LoggerError::Send { .. }
                | LoggerError::SendIo(_)
                | LoggerError::Format { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("port", "must be in 1..=65535");
        assert!(matches!(err, LoggerError::Config { .. }));

        let err = LoggerError::lock_timeout("state", Duration::from_millis(100));
        assert!(matches!(err, LoggerError::LockTimeout { resource: "state", .. }));

        let err = LoggerError::format(2000, 1024);
        assert!(matches!(err, LoggerError::Format { needed: 2000, .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("address", "'not-an-ip' is not an IP address");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for address: 'not-an-ip' is not an IP address"
        );

        let err = LoggerError::lock_timeout("line buffer", Duration::from_millis(100));
        assert_eq!(
            err.to_string(),
            "Timed out after 100ms waiting for the line buffer lock"
        );

        let err = LoggerError::format(1500, 1024);
        assert_eq!(
            err.to_string(),
            "Record of 1500 bytes does not fit a 1024-byte buffer"
        );
    }

    #[test]
    fn test_transport_alloc_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use");
        let err = LoggerError::transport_alloc("bind failed", io_err);

        assert!(err.to_string().contains("bind failed"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_delivery_failure());
    }

    #[test]
    fn test_delivery_failure_classification() {
        assert!(LoggerError::send("short write").is_delivery_failure());
        assert!(LoggerError::format(10, 5).is_delivery_failure());
        assert!(!LoggerError::config("port", "zero").is_delivery_failure());
    }
}
