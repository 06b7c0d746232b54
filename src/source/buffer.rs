//! # Source Buffer
//!
//! A [`SourceBuffer`] owns a fixed-size window of raw source bytes plus its
//! size, and knows how to decode a single codepoint starting at a given byte
//! position. Grounded on
//! `original_source/include/clox/source/source_buffer.h` and
//! `lib/source/source_buffer.c`.
//!
//! The buffer is opaque to character encoding: it stores bytes only.
//! Decoding happens on demand in [`SourceBuffer::get_char`].

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

/// A decoded Unicode scalar value, or a sentinel.
///
/// `-1` means end-of-input; `-2` means a malformed UTF-8 sequence was
/// encountered (the caller still advances by the returned width, which is
/// always 1 for an error, so a scanner can never loop forever on bad input).
pub type Codepoint = i32;

/// End-of-input sentinel.
pub const EOF: Codepoint = -1;
/// Malformed-UTF-8 sentinel. Distinct from [`EOF`] so callers can tell a
/// decode failure from exhausted input.
pub const UTF8_ERROR: Codepoint = -2;

const PAGE_SIZE: usize = 4096;

/// The encoding a [`SourceBuffer`] is interpreted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// One byte, one codepoint.
    Ascii,
    /// 1-4 bytes per codepoint, Unicode 15.1.
    #[default]
    Utf8,
}

/// A fixed-capacity window of source bytes.
#[derive(Debug, Clone, Default)]
pub struct SourceBuffer {
    data: Vec<u8>,
}

impl SourceBuffer {
    /// Wrap a byte string, appending a trailing NUL sentinel.
    pub fn from_text(text: &[u8]) -> Self {
        let mut data = Vec::with_capacity(text.len() + 1);
        data.extend_from_slice(text);
        data.push(0);
        SourceBuffer { data }
    }

    /// Load the entire contents of a file at `path`, then append a trailing
    /// NUL sentinel.
    pub fn from_path(path: &std::path::Path) -> io::Result<Self> {
        let mut file = File::open(path)?;
        Self::from_file(&mut file)
    }

    /// Load the entire contents of an already-open file, draining it in
    /// page-sized reads. Does not take ownership of `file`.
    pub fn from_file(file: &mut File) -> io::Result<Self> {
        let size = file.seek(SeekFrom::End(0))? as usize;
        file.seek(SeekFrom::Start(0))?;

        let mut data = vec![0u8; size];
        let mut filled = 0;
        while filled < size {
            let end = (filled + PAGE_SIZE).min(size);
            let n = file.read(&mut data[filled..end])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        data.truncate(filled);
        data.push(0);

        Ok(SourceBuffer { data })
    }

    /// Read a single line from standard input (interactive mode).
    pub fn from_stdin() -> io::Result<Self> {
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(SourceBuffer::from_text(line.as_bytes()))
    }

    /// A zero-filled buffer of exactly `size` bytes, used as the initial
    /// window for a paginated, refillable stream.
    pub(crate) fn with_capacity_zeroed(size: usize) -> Self {
        SourceBuffer { data: vec![0u8; size] }
    }

    /// Number of bytes stored, including the trailing NUL sentinel.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutably borrow the raw bytes, for a refill to shift and overwrite.
    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Shrink the buffer's logical size to `new_size`, discarding the tail.
    pub(crate) fn truncate(&mut self, new_size: usize) {
        self.data.truncate(new_size);
    }

    /// Decode the codepoint starting at `position`, returning it together
    /// with its byte width. Returns `(EOF, 0)` past the end of the buffer.
    pub fn get_char(&self, encoding: Encoding, position: u64) -> (Codepoint, usize) {
        let position = position as usize;
        if position >= self.data.len() {
            return (EOF, 0);
        }

        match encoding {
            Encoding::Ascii => (self.data[position] as Codepoint, 1),
            Encoding::Utf8 => decode_utf8(&self.data[position..]),
        }
    }

    /// Zero every byte in the buffer, keeping its size.
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|b| *b = 0);
    }
}

/// Decode one UTF-8 codepoint from the start of `bytes`.
///
/// Rejects overlong encodings, surrogates (U+D800..U+DFFF), and codepoints
/// above U+10FFFF via the standard per-leading-byte tightened ranges. On any
/// malformed sequence returns `(UTF8_ERROR, 1)` so the caller always makes
/// forward progress.
fn decode_utf8(bytes: &[u8]) -> (Codepoint, usize) {
    let b0 = bytes[0];

    if b0 < 0x80 {
        return (b0 as Codepoint, 1);
    }

    let len = match b0 {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return (UTF8_ERROR, 1),
    };

    if bytes.len() < len {
        return (UTF8_ERROR, 1);
    }

    let b1 = bytes[1];
    let b1_in_range = match b0 {
        0xE0 => (0xA0..=0xBF).contains(&b1),
        0xED => (0x80..=0x9F).contains(&b1),
        0xF0 => (0x90..=0xBF).contains(&b1),
        0xF4 => (0x80..=0x8F).contains(&b1),
        _ => (0x80..=0xBF).contains(&b1),
    };
    if !b1_in_range {
        return (UTF8_ERROR, 1);
    }

    for &b in &bytes[2..len] {
        if !(0x80..=0xBF).contains(&b) {
            return (UTF8_ERROR, 1);
        }
    }

    let cp: u32 = match len {
        2 => ((b0 as u32 & 0x1F) << 6) | (b1 as u32 & 0x3F),
        3 => ((b0 as u32 & 0x0F) << 12) | ((b1 as u32 & 0x3F) << 6) | (bytes[2] as u32 & 0x3F),
        4 => {
            ((b0 as u32 & 0x07) << 18)
                | ((b1 as u32 & 0x3F) << 12)
                | ((bytes[2] as u32 & 0x3F) << 6)
                | (bytes[3] as u32 & 0x3F)
        }
        _ => unreachable!("len is always 2..=4"),
    };

    (cp as Codepoint, len)
}
