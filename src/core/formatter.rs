//! RFC 3164 record formatting
//!
//! Records have the fixed layout
//!
//! ```text
//! <PRI>TIMESTAMP HOSTNAME APPNAME[TAG]: MESSAGE
//! ```
//!
//! where `PRI = facility * 8 + severity`. Severity comes from a fixed table,
//! not from the level's discriminant.

use super::error::{LoggerError, Result};
use super::facility::Facility;
use super::fixed_str::BoundedString;
use super::log_level::LogLevel;
use std::fmt::Write;

/// Tag used when the caller supplies none
pub const DEFAULT_TAG: &str = "unknown";

/// Severity used for levels the table doesn't know
pub const DEFAULT_SEVERITY: u8 = 6;

/// Smallest record buffer the formatter will render into
pub const MIN_RECORD_CAPACITY: usize = 64;

/// Wire severity for `level`.
pub fn severity(level: LogLevel) -> u8 {
    match level {
        LogLevel::None => 0,
        LogLevel::Error => 3,
        LogLevel::Warning => 4,
        LogLevel::Info => 6,
        LogLevel::Debug => 7,
        LogLevel::Verbose => 7,
    }
}

/// Wire severity for a raw integer level, as handed over by foreign callers.
pub fn severity_for_raw(raw: i32) -> u8 {
    u8::try_from(raw)
        .ok()
        .and_then(|raw| LogLevel::try_from(raw).ok())
        .map(severity)
        .unwrap_or(DEFAULT_SEVERITY)
}

/// `facility * 8 + severity`
#[inline]
pub fn priority(facility: Facility, level: LogLevel) -> u8 {
    facility.code() * 8 + severity(level)
}

/// Renders records for one host/application identity.
#[derive(Debug, Clone, Copy)]
pub struct Rfc3164Formatter<'a> {
    pub facility: Facility,
    pub hostname: &'a str,
    pub app_name: &'a str,
}

impl<'a> Rfc3164Formatter<'a> {
    pub fn new(facility: Facility, hostname: &'a str, app_name: &'a str) -> Self {
        Self {
            facility,
            hostname,
            app_name,
        }
    }

    /// Render one record into a buffer of `capacity` bytes.
    ///
    /// A record must leave room for a terminator, so one whose length reaches
    /// `capacity` is rejected with [`LoggerError::Format`] rather than cut short.
    pub fn format(
        &self,
        level: LogLevel,
        timestamp: &str,
        tag: Option<&str>,
        message: Option<&str>,
        capacity: usize,
    ) -> Result<String> {
        if capacity < MIN_RECORD_CAPACITY {
            return Err(LoggerError::format(MIN_RECORD_CAPACITY, capacity));
        }

        let tag = tag.unwrap_or(DEFAULT_TAG);
        let message = message.unwrap_or("");
        let mut buf = BoundedString::with_capacity(capacity - 1);
        let rendered = write!(
            buf,
            "<{}>{} {} {}[{}]: {}",
            priority(self.facility, level),
            timestamp,
            self.hostname,
            self.app_name,
            tag,
            message
        );

        match rendered {
            Ok(()) => Ok(buf.into_string()),
            Err(_) => Err(LoggerError::format(
                self.rendered_len(level, timestamp, tag, message),
                capacity,
            )),
        }
    }

    fn rendered_len(&self, level: LogLevel, timestamp: &str, tag: &str, message: &str) -> usize {
        let pri = priority(self.facility, level).to_string().len();
        // "<" ">" " " " " "[" "]" ":" " "
        8 + pri
            + timestamp.len()
            + self.hostname.len()
            + self.app_name.len()
            + tag.len()
            + message.len()
    }
}

/// The header fields recovered from a rendered record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord<'a> {
    pub facility: Facility,
    pub severity: u8,
    pub timestamp: &'a str,
    pub hostname: &'a str,
    pub app_name: &'a str,
    pub tag: &'a str,
    pub message: &'a str,
}

/// Split a record produced by [`Rfc3164Formatter::format`] back into its fields.
///
/// Returns `None` for anything that doesn't follow the layout. An empty
/// timestamp is recognised by the double space it leaves behind.
pub fn parse_record(record: &str) -> Option<ParsedRecord<'_>> {
    let rest = record.strip_prefix('<')?;
    let close = rest.find('>')?;
    let pri: u8 = rest[..close].parse().ok()?;
    let facility = Facility::try_from(pri / 8).ok()?;
    let rest = &rest[close + 1..];

    let (timestamp, rest) = if let Some(rest) = rest.strip_prefix(' ') {
        ("", rest)
    } else if rest.len() > 19 && rest.as_bytes()[19] == b' ' {
        (&rest[..19], &rest[20..])
    } else {
        return None;
    };

    let (hostname, rest) = rest.split_once(' ')?;
    let open = rest.find('[')?;
    let app_name = &rest[..open];
    let rest = &rest[open + 1..];
    let close = rest.find("]: ")?;

    Some(ParsedRecord {
        facility,
        severity: pri % 8,
        timestamp,
        hostname,
        app_name,
        tag: &rest[..close],
        message: &rest[close + 3..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2025-01-08 10:30:45";

    #[test]
    fn test_severity_table() {
        assert_eq!(severity(LogLevel::None), 0);
        assert_eq!(severity(LogLevel::Error), 3);
        assert_eq!(severity(LogLevel::Warning), 4);
        assert_eq!(severity(LogLevel::Info), 6);
        assert_eq!(severity(LogLevel::Debug), 7);
        assert_eq!(severity(LogLevel::Verbose), 7);
    }

    #[test]
    fn test_unknown_raw_level_defaults_to_info_severity() {
        assert_eq!(severity_for_raw(1), 3);
        assert_eq!(severity_for_raw(42), DEFAULT_SEVERITY);
        assert_eq!(severity_for_raw(-1), DEFAULT_SEVERITY);
    }

    #[test]
    fn test_priority() {
        assert_eq!(priority(Facility::LOG_USER, LogLevel::Info), 14);
        assert_eq!(priority(Facility::LOG_LOCAL7, LogLevel::Debug), 191);
        assert_eq!(priority(Facility::LOG_KERN, LogLevel::None), 0);
    }

    #[test]
    fn test_format_layout() {
        let f = Rfc3164Formatter::new(Facility::LOG_USER, "bree", "logger");
        let record = f
            .format(LogLevel::Info, TS, Some("net"), Some("value=42"), 1024)
            .unwrap();
        assert_eq!(record, "<14>2025-01-08 10:30:45 bree logger[net]: value=42");
    }

    #[test]
    fn test_format_defaults() {
        let f = Rfc3164Formatter::new(Facility::LOG_DAEMON, "bree", "logger");
        let record = f.format(LogLevel::Error, "", None, None, 1024).unwrap();
        assert_eq!(record, "<27> bree logger[unknown]: ");
    }

    #[test]
    fn test_format_rejects_records_reaching_capacity() {
        let f = Rfc3164Formatter::new(Facility::LOG_USER, "h", "a");
        // "<14>" + TS + " h a[t]: " is 32 bytes
        let exact = "x".repeat(64 - 32);
        let err = f
            .format(LogLevel::Info, TS, Some("t"), Some(&exact), 64)
            .unwrap_err();
        assert!(matches!(err, LoggerError::Format { needed: 64, capacity: 64 }));

        let fits = "x".repeat(64 - 33);
        let record = f
            .format(LogLevel::Info, TS, Some("t"), Some(&fits), 64)
            .unwrap();
        assert_eq!(record.len(), 63);
    }

    #[test]
    fn test_tiny_capacity_is_rejected() {
        let f = Rfc3164Formatter::new(Facility::LOG_USER, "h", "a");
        assert!(f.format(LogLevel::Info, TS, None, None, 16).is_err());
    }

    #[test]
    fn test_parse_round_trip() {
        let f = Rfc3164Formatter::new(Facility::LOG_LOCAL3, "bree", "app");
        let record = f
            .format(LogLevel::Warning, TS, Some("disk"), Some("80% [full]: soon"), 1024)
            .unwrap();
        let parsed = parse_record(&record).unwrap();
        assert_eq!(parsed.facility, Facility::LOG_LOCAL3);
        assert_eq!(parsed.severity, 4);
        assert_eq!(parsed.timestamp, TS);
        assert_eq!(parsed.hostname, "bree");
        assert_eq!(parsed.app_name, "app");
        assert_eq!(parsed.tag, "disk");
        assert_eq!(parsed.message, "80% [full]: soon");

        let record = f.format(LogLevel::Info, "", Some("t"), Some("m"), 1024).unwrap();
        let parsed = parse_record(&record).unwrap();
        assert_eq!(parsed.timestamp, "");
        assert_eq!(parsed.tag, "t");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_record("no header").is_none());
        assert!(parse_record("<999>2025-01-08 10:30:45 h a[t]: m").is_none());
    }
}
