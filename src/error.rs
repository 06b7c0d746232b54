//! # Error Handling for the Bytecode VM Core
//!
//! This module defines [`VmError`], the single error type returned at every
//! fallible boundary in this crate: byte-buffer bounds checks, code-block
//! reader over/under-runs, and source-buffer I/O.
//!
//! ## Design
//! - Bounds and buffer-arithmetic failures are distinct variants so callers
//!   (and tests) can match on the exact invariant that broke, rather than a
//!   single opaque "out of range" string.
//! - I/O failures wrap `std::io::Error` directly, keeping `errno`-style
//!   detail (`ErrorKind`, OS error code) instead of re-stringifying it.
//! - Out-of-memory is not a variant here: allocation failure aborts the
//!   process via the global allocator, which already matches the "fatal,
//!   abort" policy for that error kind with no code of ours involved.

use std::fmt;
use std::io;

/// Errors returned by the byte buffer, code block, and source buffer APIs.
#[derive(Debug)]
pub enum VmError {
    /// `get`/`peek` addressed a position at or past the element count.
    IndexOutOfBounds { index: usize, len: usize },
    /// A reader or bulk read would consume more bytes than remain.
    BufferOverrun { index: usize, len: usize },
    /// A reader stepped back past the start of the buffer.
    BufferUnderrun,
    /// `top`/`pop` was called on an empty buffer.
    StackUnderflow,
    /// `expand`/`shrink` arithmetic would overflow or underflow `usize`.
    CapacityOverflow,
    /// A source file or stream could not be read.
    Io(io::Error),
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmError::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: index {index}, len {len}")
            }
            VmError::BufferOverrun { index, len } => {
                write!(f, "buffer overrun: index {index}, len {len}")
            }
            VmError::BufferUnderrun => write!(f, "buffer underrun"),
            VmError::StackUnderflow => write!(f, "stack underflow"),
            VmError::CapacityOverflow => write!(f, "capacity overflow"),
            VmError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for VmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VmError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for VmError {
    fn from(e: io::Error) -> Self {
        VmError::Io(e)
    }
}

/// Convenience alias used throughout this crate's fallible APIs.
pub type VmResult<T> = Result<T, VmError>;
