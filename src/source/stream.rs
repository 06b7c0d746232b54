//! # Source Stream
//!
//! A [`SourceStream`] presents a single logical, codepoint-accurate cursor
//! over a possibly unbounded source, refilling its [`SourceBuffer`] from a
//! file handle when the lookahead position would cross the buffer end.
//! Grounded on `original_source/include/clox/source/source_stream.h` and
//! `lib/source/source_stream.c`.
//!
//! Three locations are tracked: `stream` (the absolute cursor, never
//! rewound by a refill), `begin` (the start of the current lexeme) and
//! `forward` (the lookahead position). `begin`/`forward` are positions into
//! the *current* buffer window and are adjusted when a refill slides that
//! window down; `stream` is a true cumulative count since the stream was
//! opened.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::buffer::{Codepoint, Encoding, SourceBuffer, EOF};
use super::location::SourceLocation;

const PAGE_SIZE: usize = 4096;
const EOL: Codepoint = b'\n' as Codepoint;
const NUL: Codepoint = 0;

/// The refillable backing for an open, paginated stream.
enum RefillSource {
    File(File, bool),
    Stdin(bool),
}

impl RefillSource {
    fn is_eof(&self) -> bool {
        match self {
            RefillSource::File(_, eof) | RefillSource::Stdin(eof) => *eof,
        }
    }

    /// Fill as much of `dst` as the source currently has available,
    /// returning the number of bytes written.
    fn fill(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        match self {
            RefillSource::File(file, eof) => {
                let n = file.read(dst)?;
                if n == 0 {
                    *eof = true;
                }
                Ok(n)
            }
            RefillSource::Stdin(eof) => {
                let mut line = String::new();
                let read = io::stdin().read_line(&mut line)?;
                if read == 0 {
                    *eof = true;
                    return Ok(0);
                }
                let bytes = line.as_bytes();
                let n = bytes.len().min(dst.len());
                dst[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
        }
    }
}

/// A refillable, codepoint-accurate cursor over a source buffer.
pub struct SourceStream {
    path: String,
    handle: Option<RefillSource>,
    is_stdin: bool,
    is_initialized: bool,
    is_open: bool,
    encoding: Encoding,
    buffer: SourceBuffer,
    stream: SourceLocation,
    begin: SourceLocation,
    forward: SourceLocation,
}

impl SourceStream {
    /// Wrap a NUL-terminated byte string. The whole buffer is preloaded; no
    /// refill ever touches a file handle.
    pub fn from_text(text: &[u8], encoding: Encoding) -> Self {
        SourceStream::new("<text>".to_string(), None, false, encoding, SourceBuffer::from_text(text))
    }

    /// Load the entire contents of a file, preloaded into one buffer.
    pub fn from_path(path: &Path, encoding: Encoding) -> io::Result<Self> {
        let buffer = SourceBuffer::from_path(path)?;
        Ok(SourceStream::new(
            path.display().to_string(),
            None,
            false,
            encoding,
            buffer,
        ))
    }

    /// Load the entire contents of an already-open file without taking
    /// ownership of it.
    pub fn from_file(file: &mut File, encoding: Encoding) -> io::Result<Self> {
        let buffer = SourceBuffer::from_file(file)?;
        Ok(SourceStream::new("<stream>".to_string(), None, false, encoding, buffer))
    }

    /// Open `path`, refilling a page-sized window from it as the cursor
    /// advances.
    pub fn open_file(path: &Path, encoding: Encoding) -> io::Result<Self> {
        let file = File::open(path)?;
        let mut stream = SourceStream::new(
            path.display().to_string(),
            Some(RefillSource::File(file, false)),
            false,
            encoding,
            SourceBuffer::with_capacity_zeroed(PAGE_SIZE),
        );
        stream.is_open = true;
        Ok(stream)
    }

    /// Open standard input, read one line at a time.
    pub fn open_stdin(encoding: Encoding) -> Self {
        let mut stream = SourceStream::new(
            "<stdin>".to_string(),
            Some(RefillSource::Stdin(false)),
            true,
            encoding,
            SourceBuffer::with_capacity_zeroed(PAGE_SIZE),
        );
        stream.is_open = true;
        stream
    }

    fn new(
        path: String,
        handle: Option<RefillSource>,
        is_stdin: bool,
        encoding: Encoding,
        buffer: SourceBuffer,
    ) -> Self {
        SourceStream {
            path,
            handle,
            is_stdin,
            is_initialized: false,
            is_open: false,
            encoding,
            buffer,
            stream: SourceLocation::zero(),
            begin: SourceLocation::zero(),
            forward: SourceLocation::zero(),
        }
    }

    /// Display path or name of this stream.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The absolute cursor location.
    pub fn stream_location(&self) -> SourceLocation {
        self.stream
    }

    /// The start-of-lexeme location.
    pub fn begin_location(&self) -> SourceLocation {
        self.begin
    }

    /// The lookahead location.
    pub fn forward_location(&self) -> SourceLocation {
        self.forward
    }

    /// The bytes of the buffer between `begin` and `forward`.
    pub fn lexeme(&self) -> &[u8] {
        let start = (self.begin.ch as usize).min(self.buffer.size());
        let end = (self.forward.ch as usize).min(self.buffer.size());
        &self.buffer.as_bytes()[start..end.max(start)]
    }

    /// Mark `forward` as the start of the next lexeme, the way a lexer
    /// commits a token before scanning the next one. Without this, `begin`
    /// never moves except on refill, so the window can never free the bytes
    /// of an already-consumed lexeme to make room for more input.
    pub fn sync_begin(&mut self) {
        self.begin = self.forward;
    }

    fn needs_refill(&self, offset: u32) -> bool {
        !self.is_initialized || (self.forward.ch + offset as u64) >= self.buffer.size() as u64
    }

    /// Discard bytes before `begin`, pull more data in from the file
    /// handle, and adjust `begin`/`forward` to the new window.
    fn refill(&mut self) -> bool {
        let first_init = !self.is_initialized;
        self.is_initialized = true;

        if !first_init && !self.is_open {
            return false;
        }

        let handle = match self.handle.as_mut() {
            Some(h) => h,
            None => return first_init,
        };

        if !first_init && handle.is_eof() {
            return false;
        }

        let begin = self.begin.ch as usize;
        let total = self.buffer.size();
        // On the very first refill there is no prior live data to preserve
        // (the buffer was only ever zero-filled); everything from offset 0
        // is free. On a later refill, the unread tail `[begin, total)` is
        // live and gets shifted down to make room at the end.
        let keep = if first_init { 0 } else { total - begin };

        if !first_init && begin > 0 {
            self.buffer.as_mut_bytes().copy_within(begin..total, 0);
        }

        let filled = match handle.fill(&mut self.buffer.as_mut_bytes()[keep..total]) {
            Ok(n) => n,
            Err(_) => return false,
        };

        self.buffer.truncate(keep + filled);

        if !first_init {
            // Only `ch` is a window-relative offset; `co`/`ln` are absolute
            // textual position and must not move when the byte window slides.
            self.forward.ch -= self.begin.ch;
            self.begin.reset();
        }

        true
    }

    /// Peek the codepoint at `forward` without advancing.
    pub fn peek(&mut self) -> Codepoint {
        if self.needs_refill(0) && !self.refill() {
            return EOF;
        }
        self.buffer.get_char(self.encoding, self.forward.ch).0
    }

    /// Read the codepoint at `forward`, advancing `stream`/`forward` and
    /// updating `column`/`line`.
    pub fn read(&mut self) -> Codepoint {
        if self.needs_refill(0) && !self.refill() {
            return EOF;
        }

        let (cp, width) = self.buffer.get_char(self.encoding, self.forward.ch);

        match cp {
            EOL => {
                self.stream.co = 0;
                self.stream.ln += 1;
                self.forward.co = 0;
                self.forward.ln += 1;
            }
            NUL | EOF => {}
            _ => {
                self.stream.co += width as u32;
                self.forward.co += width as u32;
            }
        }

        self.stream.ch += width as u64;
        self.forward.ch += width as u64;

        cp
    }

    /// Read `offset` codepoints without advancing the stream; the buffer
    /// window may still be refilled as a side effect, but `begin`,
    /// `forward`, and `stream` are restored to their pre-call values. An
    /// offset of zero is equivalent to [`SourceStream::peek`].
    pub fn peek_offset(&mut self, offset: u32) -> Codepoint {
        if offset == 0 {
            return self.peek();
        }

        let saved_stream = self.stream;
        // `co`/`ln` are absolute textual position and survive a refill
        // untouched, so they're saved directly. `ch` is a window-relative
        // offset that a refill may shift down relative to `begin`, so it has
        // to be restored relative to `begin` instead of by saved value.
        let saved_co = self.forward.co;
        let saved_ln = self.forward.ln;
        let rel_ch = self.forward.ch.saturating_sub(self.begin.ch);

        let mut result = EOF;
        for _ in 0..offset {
            result = self.read();
        }

        self.stream = saved_stream;
        self.forward = SourceLocation {
            ch: self.begin.ch + rel_ch,
            co: saved_co,
            ln: saved_ln,
        };

        result
    }

    /// Read `offset` codepoints, advancing the stream each time. An offset
    /// of zero performs no reads and returns the would-be next codepoint.
    pub fn read_offset(&mut self, offset: u32) -> Codepoint {
        let mut result = self.peek();
        for _ in 0..offset {
            result = self.read();
        }
        result
    }

    /// Release the file handle. Idempotent: returns `false` if already
    /// closed or never open.
    pub fn close(&mut self) -> bool {
        if self.is_open {
            self.is_open = false;
            self.handle = None;
            true
        } else {
            false
        }
    }

    /// Zero the backing buffer's bytes.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// True when this stream reads stdin one line at a time.
    pub fn is_interactive(&self) -> bool {
        self.is_stdin
    }

    /// The stream's encoding tag.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl Drop for SourceStream {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests;
