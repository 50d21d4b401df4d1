//! Line reassembly
//!
//! Callers hand over arbitrary text fragments: partial lines, several lines at
//! once, or runs longer than any buffer. [`LineAccumulator`] turns them into
//! discrete lines, each tagged with the level and tag that were active while
//! its bytes were collected.
//!
//! The accumulator is either [`LineState::Empty`] or
//! [`LineState::Accumulating`] under one `(level, tag)` key. Per fragment:
//!
//! 1. A different key flushes whatever is buffered under the old key.
//! 2. Text is scanned for `LF`, `CR`, `CRLF` or `LFCR`; a two-character
//!    terminator counts as one break.
//! 3. A segment that won't fit flushes the buffer first, and any part of it
//!    still larger than the capacity goes out immediately in capacity-sized
//!    chunks.
//! 4. A terminator completes the buffered line, which is emitted even when
//!    empty.
//! 5. Anything left without a terminator stays buffered.
//!
//! Emission goes through a caller-supplied closure so the accumulator itself
//! never touches the transport.

use super::fixed_str::{floor_char_boundary, BoundedString, FixedString};
use super::log_level::LogLevel;

/// Default maximum length of one buffered line
pub const DEFAULT_LINE_CAPACITY: usize = 768;

/// Smallest capacity that still fits any UTF-8 scalar
pub const MIN_LINE_CAPACITY: usize = 4;

/// Longest tag kept for a buffered line
pub const TAG_CAPACITY: usize = 47;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineState {
    Empty,
    Accumulating { level: LogLevel, tag: FixedString },
}

#[derive(Debug)]
pub struct LineAccumulator {
    buf: BoundedString,
    state: LineState,
}

impl LineAccumulator {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: BoundedString::with_capacity(capacity.max(MIN_LINE_CAPACITY)),
            state: LineState::Empty,
        }
    }

    pub fn state(&self) -> &LineState {
        &self.state
    }

    /// The partially assembled line, if any bytes are buffered.
    pub fn pending(&self) -> Option<(LogLevel, &str, &str)> {
        match &self.state {
            LineState::Accumulating { level, tag } if !self.buf.is_empty() => {
                Some((*level, tag.as_str(), self.buf.as_str()))
            }
            _ => None,
        }
    }

    /// Feed one fragment. `emit` receives every record that becomes ready and
    /// reports whether it was delivered; the return value is true only if
    /// every emission succeeded.
    pub fn feed<E>(&mut self, level: LogLevel, tag: &str, text: &str, emit: &mut E) -> bool
    where
        E: FnMut(LogLevel, &str, &str) -> bool,
    {
        if text.is_empty() {
            return true;
        }

        let tag = FixedString::truncated(tag, TAG_CAPACITY);
        let mut all_ok = true;

        let key_changed = matches!(
            &self.state,
            LineState::Accumulating { level: cur_level, tag: cur_tag }
                if *cur_level != level || *cur_tag != tag
        );
        if key_changed {
            all_ok &= self.flush(emit);
        }

        let mut rest = text;
        while !rest.is_empty() {
            if self.state == LineState::Empty {
                self.state = LineState::Accumulating {
                    level,
                    tag: tag.clone(),
                };
            }

            let brk = rest.find(['\r', '\n']);
            let segment = match brk {
                Some(idx) => &rest[..idx],
                None => rest,
            };
            all_ok &= self.append_segment(level, &tag, segment, emit);

            match brk {
                Some(idx) => {
                    all_ok &= self.complete_line(emit);
                    rest = &rest[idx + terminator_len(&rest.as_bytes()[idx..])..];
                }
                None => rest = "",
            }
        }

        all_ok
    }

    /// Emit the buffered partial line, if there is one, and return to
    /// [`LineState::Empty`].
    pub fn flush<E>(&mut self, emit: &mut E) -> bool
    where
        E: FnMut(LogLevel, &str, &str) -> bool,
    {
        if self.buf.is_empty() {
            self.state = LineState::Empty;
            return true;
        }
        self.complete_line(emit)
    }

    /// Emit the buffered line, empty or not.
    fn complete_line<E>(&mut self, emit: &mut E) -> bool
    where
        E: FnMut(LogLevel, &str, &str) -> bool,
    {
        let state = std::mem::replace(&mut self.state, LineState::Empty);
        let ok = match &state {
            LineState::Accumulating { level, tag } => emit(*level, tag.as_str(), self.buf.as_str()),
            LineState::Empty => true,
        };
        self.buf.clear();
        ok
    }

    fn append_segment<E>(&mut self, level: LogLevel, tag: &FixedString, segment: &str, emit: &mut E) -> bool
    where
        E: FnMut(LogLevel, &str, &str) -> bool,
    {
        let mut all_ok = true;
        let mut segment = segment;

        if !self.buf.fits(segment) {
            if !self.buf.is_empty() {
                all_ok &= emit(level, tag.as_str(), self.buf.as_str());
                self.buf.clear();
            }

            let capacity = self.buf.capacity();
            while segment.len() > capacity {
                let cut = floor_char_boundary(segment, capacity);
                all_ok &= emit(level, tag.as_str(), &segment[..cut]);
                segment = &segment[cut..];
            }
        }

        let pushed = self.buf.try_push_str(segment);
        debug_assert!(pushed.is_ok());
        all_ok
    }
}

impl Default for LineAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_CAPACITY)
    }
}

/// Length of the terminator starting at `bytes[0]`, which is `\r` or `\n`.
fn terminator_len(bytes: &[u8]) -> usize {
    match bytes {
        [b'\r', b'\n', ..] | [b'\n', b'\r', ..] => 2,
        _ => 1,
    }
}
