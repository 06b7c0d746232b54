//! Core of a stack-oriented bytecode VM: a UTF-8 source cursor, a growable
//! bytecode container with a disciplined reader, and an opcode model with a
//! deterministic disassembler.

pub mod byte_buffer;
pub mod code_block;
pub mod disasm;
pub mod error;
pub mod opcode;
pub mod source;
pub mod value;

pub use byte_buffer::{ByteBuffer, ByteBufferReader};
pub use code_block::{CodeBlock, CodeBlockReader};
pub use disasm::{disassemble, disassemble_to_string};
pub use error::{VmError, VmResult};
pub use opcode::{get_opcode_info, InstrKind, OpcodeDescriptor};
pub use source::{Codepoint, Encoding, SourceBuffer, SourceLocation, SourceStream, EOF};
pub use value::Value;
