//! syslog facility definitions
//!
//! [`Facility`] replicates the names used in `<syslog.h>`. Unlike the header,
//! the discriminants are the raw facility codes (0-23), not pre-shifted; the
//! shift happens when the priority value is computed.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The twenty-four facilities defined by RFC 3164.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facility {
    /// kernel messages
    LOG_KERN = 0,
    /// random user-level messages
    LOG_USER = 1,
    /// mail system
    LOG_MAIL = 2,
    /// system daemons
    LOG_DAEMON = 3,
    /// security/authorization messages
    LOG_AUTH = 4,
    /// messages generated internally by syslogd
    LOG_SYSLOG = 5,
    /// line printer subsystem
    LOG_LPR = 6,
    /// network news subsystem
    LOG_NEWS = 7,
    /// UUCP subsystem
    LOG_UUCP = 8,
    /// clock daemon
    LOG_CRON = 9,
    /// security/authorization messages (private)
    LOG_AUTHPRIV = 10,
    /// ftp daemon
    LOG_FTP = 11,
    /// NTP subsystem
    LOG_NTP = 12,
    /// log audit
    LOG_AUDIT = 13,
    /// log alert
    LOG_ALERT = 14,
    /// clock daemon (second instance)
    LOG_CLOCK = 15,
    /// reserved for local use
    LOG_LOCAL0 = 16,
    /// reserved for local use
    LOG_LOCAL1 = 17,
    /// reserved for local use
    LOG_LOCAL2 = 18,
    /// reserved for local use
    LOG_LOCAL3 = 19,
    /// reserved for local use
    LOG_LOCAL4 = 20,
    /// reserved for local use
    LOG_LOCAL5 = 21,
    /// reserved for local use
    LOG_LOCAL6 = 22,
    /// reserved for local use
    LOG_LOCAL7 = 23,
}

impl Facility {
    pub const ALL: [Facility; 24] = [
        Facility::LOG_KERN,
        Facility::LOG_USER,
        Facility::LOG_MAIL,
        Facility::LOG_DAEMON,
        Facility::LOG_AUTH,
        Facility::LOG_SYSLOG,
        Facility::LOG_LPR,
        Facility::LOG_NEWS,
        Facility::LOG_UUCP,
        Facility::LOG_CRON,
        Facility::LOG_AUTHPRIV,
        Facility::LOG_FTP,
        Facility::LOG_NTP,
        Facility::LOG_AUDIT,
        Facility::LOG_ALERT,
        Facility::LOG_CLOCK,
        Facility::LOG_LOCAL0,
        Facility::LOG_LOCAL1,
        Facility::LOG_LOCAL2,
        Facility::LOG_LOCAL3,
        Facility::LOG_LOCAL4,
        Facility::LOG_LOCAL5,
        Facility::LOG_LOCAL6,
        Facility::LOG_LOCAL7,
    ];

    /// The raw facility code, `0..=23`.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Facility::LOG_KERN => "LOG_KERN",
            Facility::LOG_USER => "LOG_USER",
            Facility::LOG_MAIL => "LOG_MAIL",
            Facility::LOG_DAEMON => "LOG_DAEMON",
            Facility::LOG_AUTH => "LOG_AUTH",
            Facility::LOG_SYSLOG => "LOG_SYSLOG",
            Facility::LOG_LPR => "LOG_LPR",
            Facility::LOG_NEWS => "LOG_NEWS",
            Facility::LOG_UUCP => "LOG_UUCP",
            Facility::LOG_CRON => "LOG_CRON",
            Facility::LOG_AUTHPRIV => "LOG_AUTHPRIV",
            Facility::LOG_FTP => "LOG_FTP",
            Facility::LOG_NTP => "LOG_NTP",
            Facility::LOG_AUDIT => "LOG_AUDIT",
            Facility::LOG_ALERT => "LOG_ALERT",
            Facility::LOG_CLOCK => "LOG_CLOCK",
            Facility::LOG_LOCAL0 => "LOG_LOCAL0",
            Facility::LOG_LOCAL1 => "LOG_LOCAL1",
            Facility::LOG_LOCAL2 => "LOG_LOCAL2",
            Facility::LOG_LOCAL3 => "LOG_LOCAL3",
            Facility::LOG_LOCAL4 => "LOG_LOCAL4",
            Facility::LOG_LOCAL5 => "LOG_LOCAL5",
            Facility::LOG_LOCAL6 => "LOG_LOCAL6",
            Facility::LOG_LOCAL7 => "LOG_LOCAL7",
        }
    }
}

impl Default for Facility {
    /// The default facility is `LOG_USER`.
    fn default() -> Self {
        Facility::LOG_USER
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl TryFrom<u8> for Facility {
    type Error = LoggerError;

    fn try_from(code: u8) -> Result<Self> {
        Facility::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| LoggerError::config("facility", format!("{} is outside 0..=23", code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_dense() {
        for (idx, facility) in Facility::ALL.iter().enumerate() {
            assert_eq!(facility.code() as usize, idx);
            assert_eq!(Facility::try_from(idx as u8).unwrap(), *facility);
        }
        assert!(Facility::try_from(24).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Facility::LOG_FTP.to_string(), "LOG_FTP");
        assert_eq!(Facility::default(), Facility::LOG_USER);
    }
}
