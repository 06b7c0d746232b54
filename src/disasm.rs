//! # Disassembler
//!
//! Prints a deterministic, one-line-per-instruction textual listing of a
//! [`CodeBlock`]. Grounded on `original_source/lib/vm/debug.c`'s
//! `OFFSET NAME [operand bytes]` shape, adapted to the eight fixed-width
//! kinds in [`crate::opcode`] rather than the original's unfinished
//! `NONE`/`BYTE`/`SCAN` mode dispatch.

use std::io::Write;

use crate::code_block::CodeBlock;
use crate::error::VmResult;
use crate::opcode::get_opcode_info;

/// Hex digit width of a printed offset: 8 on a 64-bit host, 4 otherwise.
fn offset_width() -> usize {
    if cfg!(target_pointer_width = "64") {
        8
    } else {
        4
    }
}

/// Disassemble every instruction in `block`, writing one line per
/// instruction to `out`. A zero-length block produces no output.
///
/// For each instruction: read the opcode byte, look up its descriptor,
/// print `<offset-hex> <name left-justified to 8>`, consume the descriptor
/// kind's operand bytes, and print them as space-separated hex pairs
/// followed by a newline. An opcode with no table entry instead prints
/// `<offset-hex> unknown (<hex>)` and consumes no operand bytes. Any
/// operand read that would cross the block's length is a fatal buffer
/// overrun, propagated to the caller.
pub fn disassemble(block: &CodeBlock, out: &mut impl Write) -> VmResult<()> {
    let width = offset_width();
    let mut reader = block.reader();

    while !reader.at_end() {
        let offset = reader.index();
        let opcode = reader.get()?;
        let (found, descriptor) = get_opcode_info(opcode);

        if !found {
            writeln!(out, "{:0width$X} unknown ({:02X})", offset, opcode, width = width)?;
            continue;
        }

        let mut operand = vec![0u8; descriptor.kind.operand_len()];
        reader.read(&mut operand)?;

        let operand_str = operand
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");

        writeln!(
            out,
            "{:0width$X} {:<8} {}",
            offset,
            descriptor.name,
            operand_str,
            width = width
        )?;
    }

    Ok(())
}

/// Disassemble `block` into an owned `String`, for callers that want the
/// listing in memory rather than streamed to a writer.
pub fn disassemble_to_string(block: &CodeBlock) -> VmResult<String> {
    let mut buf = Vec::new();
    disassemble(block, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
