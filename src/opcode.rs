//! # Opcode Model
//!
//! An [`Opcode`] is a raw `u8` identifying an instruction; every opcode has
//! an immutable [`OpcodeDescriptor`] (name, code, [`InstrKind`]) looked up
//! through a process-wide, lazily-built table. Grounded on
//! `original_source/include/clox/vm/opcode.h`. The eight-kind scheme below
//! is adopted as canonical per the redesign note replacing the original's
//! unfinished `NONE`/`BYTE`/`SCAN` mode tagging — no opcode beyond `nop` is
//! defined in the source this was distilled from, so the table here carries
//! only `nop` plus the "unknown" fallback.
//!
//! The descriptor table is built once behind `once_cell::sync::Lazy`, the
//! same static-table idiom the teacher uses for its builtin dispatch table
//! (`vm/builtins.rs`'s `FILE_HANDLES`), keeping the table process-wide,
//! read-only, and `Sync` without any `unsafe`.

use once_cell::sync::Lazy;

/// Argument layout associated with an opcode, determining total instruction
/// width. Represented in the original as a 16-bit tag (low byte: layout id,
/// high byte: width in bytes); [`InstrKind::tag`] reproduces that encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrKind {
    /// Opcode only, no operand.
    Byte,
    /// One 8-bit register/index.
    Fast,
    /// One 16-bit index plus one 8-bit flag.
    Ctrl,
    /// 8-bit destination register plus 16-bit source index.
    Data,
    /// Three 8-bit register fields.
    Regs,
    /// 8-bit destination plus two 16-bit source indices.
    Long,
    /// 32-bit signed displacement plus one 8-bit flag.
    Jump,
    /// 8-bit destination, three 16-bit fields, one 8-bit flag.
    Full,
}

impl InstrKind {
    /// Total instruction width in bytes, opcode byte included.
    pub fn width(self) -> usize {
        match self {
            InstrKind::Byte => 1,
            InstrKind::Fast => 2,
            InstrKind::Ctrl => 4,
            InstrKind::Data => 4,
            InstrKind::Regs => 4,
            InstrKind::Long => 6,
            InstrKind::Jump => 6,
            InstrKind::Full => 8,
        }
    }

    /// Number of operand bytes following the opcode byte.
    pub fn operand_len(self) -> usize {
        self.width() - 1
    }

    fn layout_id(self) -> u8 {
        match self {
            InstrKind::Byte => 0,
            InstrKind::Fast => 1,
            InstrKind::Ctrl => 2,
            InstrKind::Data => 3,
            InstrKind::Regs => 4,
            InstrKind::Long => 5,
            InstrKind::Jump => 6,
            InstrKind::Full => 7,
        }
    }

    /// The 16-bit tag: high byte is `width()`, low byte is the layout id.
    pub fn tag(self) -> u16 {
        ((self.width() as u16) << 8) | self.layout_id() as u16
    }
}

/// The immutable metadata associated with an opcode value.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeDescriptor {
    /// Display name, e.g. `"nop"`.
    pub name: &'static str,
    /// The opcode byte this descriptor was looked up for.
    pub code: u8,
    /// Argument layout.
    pub kind: InstrKind,
}

/// The name used for an opcode with no table entry.
pub const UNKNOWN_NAME: &str = "unknown";

/// Declare the opcode table from a single list of `code => name, kind`
/// entries, so the table and any future dispatch stay in lock-step. Plays
/// the role the original's `CLOX_VM_OPCODES_INC_` X-macro played for a C
/// enum plus descriptor array generated from one source list.
macro_rules! opcode_table {
    ( $( $code:expr => $name:literal, $kind:ident );* $(;)? ) => {
        fn build_table() -> [Option<OpcodeDescriptor>; 256] {
            let mut table: [Option<OpcodeDescriptor>; 256] = [None; 256];
            $(
                table[$code as usize] = Some(OpcodeDescriptor {
                    name: $name,
                    code: $code,
                    kind: InstrKind::$kind,
                });
            )*
            table
        }
    };
}

opcode_table! {
    0x00 => "nop", Byte;
}

static OPCODE_TABLE: Lazy<[Option<OpcodeDescriptor>; 256]> = Lazy::new(build_table);

/// Look up the descriptor for `code`. Unassigned entries resolve to an
/// "unknown" descriptor with kind [`InstrKind::Byte`], never a null name.
///
/// Returns `(found, descriptor)`: `found` is `false` for any code with no
/// table entry, in which case `descriptor.code` still carries the queried
/// byte so a disassembler can print it.
pub fn get_opcode_info(code: u8) -> (bool, OpcodeDescriptor) {
    match OPCODE_TABLE[code as usize] {
        Some(descriptor) => (true, descriptor),
        None => (
            false,
            OpcodeDescriptor {
                name: UNKNOWN_NAME,
                code,
                kind: InstrKind::Byte,
            },
        ),
    }
}

#[cfg(test)]
mod tests;
