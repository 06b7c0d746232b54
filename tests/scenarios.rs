//! End-to-end scenarios S1-S6, exercising the public API the way a
//! consumer crate would: through `clox_vm`'s re-exports rather than
//! internal module paths.

use clox_vm::{disassemble_to_string, ByteBuffer, CodeBlock, Encoding, SourceLocation, SourceStream, EOF};

#[test]
fn s1_empty_disassembly() {
    let block = CodeBlock::new(16);
    assert_eq!(disassemble_to_string(&block).unwrap(), "");
}

#[test]
fn s2_nop_disassembly() {
    let mut block = CodeBlock::new(0);
    block.write(&[0x00]);
    assert_eq!(disassemble_to_string(&block).unwrap(), "00000000 nop      \n");
}

#[test]
fn s3_unknown_opcode() {
    let mut block = CodeBlock::new(0);
    block.write(&[0xFE]);
    assert_eq!(disassemble_to_string(&block).unwrap(), "00000000 unknown (FE)\n");
}

#[test]
fn s4_source_location_tracking() {
    let mut stream = SourceStream::from_text(b"ab\ncd", Encoding::Utf8);

    stream.read();
    assert_eq!(stream.forward_location(), SourceLocation { ch: 1, co: 1, ln: 0 });

    stream.read();
    assert_eq!(stream.forward_location(), SourceLocation { ch: 2, co: 2, ln: 0 });

    stream.read();
    assert_eq!(stream.forward_location(), SourceLocation { ch: 3, co: 0, ln: 1 });

    stream.read();
    assert_eq!(stream.forward_location(), SourceLocation { ch: 4, co: 1, ln: 1 });
}

#[test]
fn s5_utf8_multibyte_read() {
    let mut stream = SourceStream::from_text(&[0xE4, 0xB8, 0xAD], Encoding::Utf8);
    assert_eq!(stream.read(), 0x4E2D);
    // The buffer still has its trailing NUL sentinel before EOF.
    assert_eq!(stream.read(), 0);
    assert_eq!(stream.read(), EOF);
}

#[test]
fn s6_byte_buffer_growth() {
    let word = std::mem::size_of::<usize>();
    let mut buf = ByteBuffer::new(0);

    for i in 0..17u8 {
        let pushed = buf.push(i);
        assert_eq!(pushed, i);
        assert_eq!(buf.top().unwrap(), i);
        assert_eq!(buf.len(), i as usize + 1);
        assert_eq!(buf.capacity() % word, 0);
        assert!(buf.len() <= buf.capacity());
    }
}
