//! # Code Block
//!
//! [`CodeBlock`] is a [`crate::byte_buffer::ByteBuffer`] specialized as a
//! bytecode store: the same growth/push/pop contract, plus a reader
//! (`CodeBlockReader`) shaped for consuming whole instructions rather than
//! single bytes. Grounded on
//! `original_source/include/clox/vm/code_block.h`.

use crate::byte_buffer::ByteBuffer;
use crate::error::{VmError, VmResult};

/// A growable bytecode store built on the generic byte-buffer discipline.
#[derive(Debug, Clone, Default)]
pub struct CodeBlock {
    bytes: ByteBuffer,
}

impl CodeBlock {
    /// Allocate a block whose capacity is `capacity` rounded to a word
    /// boundary.
    pub fn new(capacity: usize) -> Self {
        CodeBlock {
            bytes: ByteBuffer::new(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Total usable capacity.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Append a single byte, growing if necessary.
    pub fn push(&mut self, value: u8) -> u8 {
        self.bytes.push(value)
    }

    /// Remove and return the last byte written.
    pub fn pop(&mut self) -> VmResult<u8> {
        self.bytes.pop()
    }

    /// Return the last byte written without removing it.
    pub fn top(&self) -> VmResult<u8> {
        self.bytes.top()
    }

    /// Bounds-checked read at `index`.
    pub fn get(&self, index: usize) -> VmResult<u8> {
        self.bytes.get(index)
    }

    /// Peek the byte `offset` positions back from the top, e.g. to patch a
    /// jump displacement that was just written.
    pub fn peek_at_offset(&self, offset: usize) -> VmResult<u8> {
        let index = self
            .bytes
            .len()
            .checked_sub(1 + offset)
            .ok_or(VmError::BufferUnderrun)?;
        self.bytes.get(index)
    }

    /// Copy `bytes` into the block, extending capacity in a single resize
    /// if the incoming span would overflow it.
    pub fn write(&mut self, bytes: &[u8]) {
        self.bytes.write(bytes)
    }

    /// Borrow the written bytes as a slice.
    pub fn as_slice(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Build a reader cursor borrowing this block's written bytes.
    pub fn reader(&self) -> CodeBlockReader<'_> {
        CodeBlockReader {
            array: self.bytes.as_slice(),
            index: 0,
        }
    }
}

/// A cursor over a [`CodeBlock`]'s bytes, shaped for consuming whole
/// instructions: `top`/`get` read one byte, `read` copies an operand span,
/// `peek` looks ahead by an offset. Borrows the owner and cannot outlive it.
#[derive(Debug)]
pub struct CodeBlockReader<'a> {
    array: &'a [u8],
    index: usize,
}

impl<'a> CodeBlockReader<'a> {
    /// Current read position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// True once `index` has reached the end of the block.
    pub fn at_end(&self) -> bool {
        self.index >= self.array.len()
    }

    /// The next byte without advancing.
    pub fn top(&self) -> VmResult<u8> {
        self.array
            .get(self.index)
            .copied()
            .ok_or(VmError::BufferOverrun {
                index: self.index,
                len: self.array.len(),
            })
    }

    /// The next byte, advancing past it.
    pub fn get(&mut self) -> VmResult<u8> {
        let value = self.top()?;
        self.index += 1;
        Ok(value)
    }

    /// Copy `out.len()` bytes starting at the cursor into `out`, advancing
    /// past them. Fails with a buffer overrun if that would read past the
    /// end of the block.
    pub fn read(&mut self, out: &mut [u8]) -> VmResult<()> {
        let n = out.len();
        let end = self.index + n;
        if end > self.array.len() {
            return Err(VmError::BufferOverrun {
                index: end,
                len: self.array.len(),
            });
        }
        out.copy_from_slice(&self.array[self.index..end]);
        self.index = end;
        Ok(())
    }

    /// The byte at `index + offset`, without advancing.
    pub fn peek(&self, offset: usize) -> VmResult<u8> {
        let at = self.index + offset;
        self.array.get(at).copied().ok_or(VmError::BufferOverrun {
            index: at,
            len: self.array.len(),
        })
    }
}
