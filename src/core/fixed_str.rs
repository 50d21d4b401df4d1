//! Capacity-bounded string types
//!
//! [`BoundedString`] refuses appends that would exceed its capacity and says
//! so; [`FixedString`] is for identifiers (hostname, app name, tag) that are
//! truncated once at construction instead.

use std::fmt;

/// Returned when an append would exceed a [`BoundedString`]'s capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow {
    pub needed: usize,
    pub capacity: usize,
}

/// Largest index `<= max` that falls on a char boundary of `s`.
pub fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// A UTF-8 buffer that holds at most `capacity` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedString {
    buf: String,
    capacity: usize,
}

impl BoundedString {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes that can still be appended.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.buf.len()
    }

    #[inline]
    pub fn fits(&self, s: &str) -> bool {
        s.len() <= self.remaining()
    }

    /// Append `s` whole, or leave the buffer untouched and report the overflow.
    pub fn try_push_str(&mut self, s: &str) -> Result<(), Overflow> {
        if !self.fits(s) {
            return Err(Overflow {
                needed: self.buf.len() + s.len(),
                capacity: self.capacity,
            });
        }
        self.buf.push_str(s);
        Ok(())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl fmt::Write for BoundedString {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.try_push_str(s).map_err(|_| fmt::Error)
    }
}

/// An identifier truncated (at a char boundary) to a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FixedString(String);

impl FixedString {
    pub fn truncated(s: &str, capacity: usize) -> Self {
        FixedString(s[..floor_char_boundary(s, capacity)].to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FixedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for FixedString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
