//! Source-level primitives: byte-addressable buffers, a UTF-8/ASCII
//! codepoint decoder, and the refillable cursor built on top of them.

pub mod buffer;
pub mod location;
pub mod stream;

pub use buffer::{Codepoint, Encoding, SourceBuffer, EOF, UTF8_ERROR};
pub use location::SourceLocation;
pub use stream::SourceStream;
