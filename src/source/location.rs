//! # Source Location
//!
//! A [`SourceLocation`] is the triple `(ch, co, ln)`: the byte count
//! consumed from the stream since it was opened, the codepoint column on
//! the current line, and the line number. Grounded on
//! `original_source/include/clox/source/source_location.h`
//! (`CloxSourceLocation_t`).

/// A position within a [`crate::source::stream::SourceStream`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// Character (byte) index consumed from the stream since open.
    pub ch: u64,
    /// Column, counting codepoints since the last line break.
    pub co: u32,
    /// Line number, counting line breaks since open.
    pub ln: u32,
}

impl SourceLocation {
    /// A location at the very start of a stream.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Reset all three fields to zero.
    pub fn reset(&mut self) {
        *self = Self::zero();
    }
}
