//! Timestamp providers
//!
//! Records carry a fixed-width `YYYY-MM-DD HH:MM:SS` timestamp. Providers
//! return exactly [`TIMESTAMP_LEN`] characters, or an empty string when the
//! clock can't be read; the formatter accepts either.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// strftime pattern for record timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width of a rendered timestamp
pub const TIMESTAMP_LEN: usize = 19;

/// Source of record timestamps.
///
/// # Examples
///
/// ```
/// use rust_syslog_client::core::timestamp::{TimestampProvider, SystemClock};
///
/// let ts = SystemClock::local().timestamp();
/// assert!(ts.is_empty() || ts.len() == 19);
/// ```
pub trait TimestampProvider: Send + Sync {
    fn timestamp(&self) -> String;
}

/// Render `datetime`, or return an empty string if it doesn't fit the fixed width.
///
/// Years past 9999 would widen the field, so they are treated like a failed
/// clock read.
#[must_use]
pub fn format_timestamp(datetime: &NaiveDateTime) -> String {
    let rendered = datetime.format(TIMESTAMP_FORMAT).to_string();
    if rendered.len() == TIMESTAMP_LEN {
        rendered
    } else {
        String::new()
    }
}

/// Reads the host clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock {
    utc: bool,
}

impl SystemClock {
    /// Local wall-clock time (the default).
    pub fn local() -> Self {
        Self { utc: false }
    }

    pub fn utc() -> Self {
        Self { utc: true }
    }
}

impl TimestampProvider for SystemClock {
    fn timestamp(&self) -> String {
        if self.utc {
            let now: DateTime<Utc> = Utc::now();
            format_timestamp(&now.naive_utc())
        } else {
            let now: DateTime<Local> = Local::now();
            format_timestamp(&now.naive_local())
        }
    }
}

/// Always returns the same timestamp. Useful for tests and for devices
/// without a real-time clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(String);

impl FixedClock {
    pub fn new(datetime: NaiveDateTime) -> Self {
        FixedClock(format_timestamp(&datetime))
    }

    /// A clock whose reads always fail.
    pub fn unavailable() -> Self {
        FixedClock(String::new())
    }
}

impl TimestampProvider for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

/// Closures that produce a date-time (or `None` when the clock is unreadable)
/// are providers too.
impl<F> TimestampProvider for F
where
    F: Fn() -> Option<NaiveDateTime> + Send + Sync,
{
    fn timestamp(&self) -> String {
        self().map(|dt| format_timestamp(&dt)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap()
    }

    #[test]
    fn test_fixed_width() {
        assert_eq!(format_timestamp(&sample()), "2025-03-07 09:05:01");
        assert_eq!(SystemClock::utc().timestamp().len(), TIMESTAMP_LEN);
        assert_eq!(SystemClock::local().timestamp().len(), TIMESTAMP_LEN);
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock::new(sample()).timestamp(), "2025-03-07 09:05:01");
        assert_eq!(FixedClock::unavailable().timestamp(), "");
    }

    #[test]
    fn test_closure_provider() {
        let failing = || -> Option<NaiveDateTime> { None };
        assert_eq!(failing.timestamp(), "");

        let working = || Some(sample());
        assert_eq!(working.timestamp(), "2025-03-07 09:05:01");
    }

    #[test]
    fn test_oversized_year_is_rejected() {
        let far = NaiveDate::from_ymd_opt(12345, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format_timestamp(&far), "");
    }
}
