//! Property-based tests for rust_syslog_client using proptest

use proptest::prelude::*;
use rust_syslog_client::core::formatter::{parse_record, priority, severity, severity_for_raw};
use rust_syslog_client::core::line_buffer::LineAccumulator;
use rust_syslog_client::core::Rfc3164Formatter;
use rust_syslog_client::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

fn any_facility() -> impl Strategy<Value = Facility> {
    prop::sample::select(Facility::ALL.to_vec())
}

fn feed_fragments(capacity: usize, fragments: &[String]) -> Vec<String> {
    let mut acc = LineAccumulator::new(capacity);
    let mut out = Vec::new();
    let mut emit = |_: LogLevel, _: &str, msg: &str| {
        out.push(msg.to_string());
        true
    };
    for fragment in fragments {
        assert!(acc.feed(LogLevel::Info, "p", fragment, &mut emit));
    }
    assert!(acc.flush(&mut emit));
    out
}

// ============================================================================
// Priority Tests
// ============================================================================

proptest! {
    /// PRI is facility * 8 + severity and never leaves 0..=191
    #[test]
    fn test_priority_arithmetic(facility in any_facility(), level in any_level()) {
        let pri = priority(facility, level);
        prop_assert_eq!(pri / 8, facility.code());
        prop_assert_eq!(pri % 8, severity(level));
        prop_assert!(pri <= 191);
    }

    /// Unknown raw levels all map to informational
    #[test]
    fn test_raw_severity_default(raw in prop_oneof![i32::MIN..0, 6..i32::MAX]) {
        prop_assert_eq!(severity_for_raw(raw), 6);
    }

    /// Known raw levels agree with the typed table
    #[test]
    fn test_raw_severity_matches_typed(level in any_level()) {
        prop_assert_eq!(severity_for_raw(level as i32), severity(level));
    }
}

// ============================================================================
// Record Layout Tests
// ============================================================================

proptest! {
    /// Every header field survives rendering and parsing
    #[test]
    fn test_header_fields_survive(
        facility in any_facility(),
        level in any_level(),
        hostname in "[a-z][a-z0-9-]{0,20}",
        app_name in "[a-z][a-z0-9_]{0,15}",
        tag in "[a-z0-9_]{0,12}",
        message in "[ -~]{0,200}",
    ) {
        let formatter = Rfc3164Formatter::new(facility, &hostname, &app_name);
        let record = formatter
            .format(level, "2025-01-08 10:30:45", Some(&tag), Some(&message), 1024)
            .unwrap();
        let parsed = parse_record(&record).unwrap();

        prop_assert_eq!(parsed.facility, facility);
        prop_assert_eq!(parsed.severity, severity(level));
        prop_assert_eq!(parsed.timestamp, "2025-01-08 10:30:45");
        prop_assert_eq!(parsed.hostname, hostname.as_str());
        prop_assert_eq!(parsed.app_name, app_name.as_str());
        prop_assert_eq!(parsed.tag, tag.as_str());
        prop_assert_eq!(parsed.message, message.as_str());
    }

    /// Records never reach the buffer size; oversize is an error, not a cut
    #[test]
    fn test_record_never_fills_capacity(message in "[ -~]{0,300}", capacity in 64usize..400) {
        let formatter = Rfc3164Formatter::new(Facility::LOG_USER, "h", "a");
        match formatter.format(LogLevel::Info, "2025-01-08 10:30:45", Some("t"), Some(&message), capacity) {
            Ok(record) => {
                prop_assert!(record.len() < capacity);
                prop_assert!(record.ends_with(message.as_str()));
            }
            Err(LoggerError::Format { needed, capacity: cap }) => {
                prop_assert_eq!(cap, capacity);
                prop_assert!(needed >= capacity);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}

// ============================================================================
// Line Reassembly Tests
// ============================================================================

proptest! {
    /// Fragmenting an unterminated line never changes the record
    #[test]
    fn test_fragmentation_is_invisible(parts in prop::collection::vec("[a-z ]{1,10}", 1..8)) {
        let joined: String = parts.concat();
        let emitted = feed_fragments(768, &parts);
        prop_assert_eq!(emitted, vec![joined]);
    }

    /// No emission exceeds the capacity and no byte is lost or duplicated
    #[test]
    fn test_chunking_preserves_text(
        parts in prop::collection::vec("[a-z\\n]{0,40}", 1..10),
        capacity in 4usize..32,
    ) {
        let emitted = feed_fragments(capacity, &parts);
        for record in &emitted {
            prop_assert!(record.len() <= capacity);
            prop_assert!(!record.contains('\n'));
        }

        let input: String = parts.concat().chars().filter(|c| *c != '\n').collect();
        prop_assert_eq!(emitted.concat(), input);

        let terminators = parts.concat().matches('\n').count();
        prop_assert!(emitted.len() >= terminators);
    }

    /// A short line delivered in one fragment is exactly one record per terminator style
    #[test]
    fn test_terminator_styles(
        line in "[a-z]{1,20}",
        terminator in prop::sample::select(vec!["\n", "\r", "\r\n", "\n\r"]),
    ) {
        let emitted = feed_fragments(768, &[format!("{}{}", line, terminator)]);
        prop_assert_eq!(emitted, vec![line]);
    }

    /// Multi-byte text is only ever cut on character boundaries
    #[test]
    fn test_chunks_are_valid_utf8(text in "[a-zé€😀]{1,60}", capacity in 4usize..16) {
        let emitted = feed_fragments(capacity, &[text.clone()]);
        prop_assert_eq!(emitted.concat(), text);
        for record in emitted {
            prop_assert!(!record.is_empty());
            prop_assert!(record.len() <= capacity);
        }
    }
}

// ============================================================================
// Level Filter Tests
// ============================================================================

proptest! {
    /// A message is suppressed exactly when its level is more verbose than the minimum
    #[test]
    fn test_level_filter(level in any_level(), minimum in any_level()) {
        prop_assert_eq!(level.is_suppressed_by(minimum), (level as u8) > (minimum as u8));
    }

    /// Level names parse back to the same level
    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(parsed, level);
    }
}
