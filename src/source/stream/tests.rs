use super::*;

#[test]
fn location_tracking_s4() {
    // S4 — "ab\ncd": after 'a' (1,1,0), after 'b' (2,2,0), after '\n' (3,0,1),
    // after 'c' (4,1,1).
    let mut stream = SourceStream::from_text(b"ab\ncd", Encoding::Utf8);

    assert_eq!(stream.read(), 'a' as Codepoint);
    assert_eq!(stream.forward_location(), SourceLocation { ch: 1, co: 1, ln: 0 });

    assert_eq!(stream.read(), 'b' as Codepoint);
    assert_eq!(stream.forward_location(), SourceLocation { ch: 2, co: 2, ln: 0 });

    assert_eq!(stream.read(), '\n' as Codepoint);
    assert_eq!(stream.forward_location(), SourceLocation { ch: 3, co: 0, ln: 1 });

    assert_eq!(stream.read(), 'c' as Codepoint);
    assert_eq!(stream.forward_location(), SourceLocation { ch: 4, co: 1, ln: 1 });
}

#[test]
fn multibyte_read_then_eof_s5() {
    // S5 — a single "中" (E4 B8 AD) then EOF on the next read.
    let mut stream = SourceStream::from_text(&[0xE4, 0xB8, 0xAD], Encoding::Utf8);
    assert_eq!(stream.read(), 0x4E2D);
    assert_eq!(stream.read(), 0);
    assert_eq!(stream.read(), EOF);
}

#[test]
fn peek_is_idempotent() {
    let mut stream = SourceStream::from_text(b"xy", Encoding::Utf8);
    assert_eq!(stream.peek(), 'x' as Codepoint);
    let loc = stream.forward_location();
    assert_eq!(stream.peek(), 'x' as Codepoint);
    assert_eq!(stream.forward_location(), loc);
}

#[test]
fn read_advances_past_peek() {
    let mut stream = SourceStream::from_text(b"xy", Encoding::Utf8);
    assert_eq!(stream.peek(), 'x' as Codepoint);
    assert_eq!(stream.read(), 'x' as Codepoint);
    assert_eq!(stream.peek(), 'y' as Codepoint);
}

#[test]
fn invariant_begin_le_forward_le_stream() {
    let mut stream = SourceStream::from_text(b"abc", Encoding::Utf8);
    for _ in 0..3 {
        stream.read();
        let begin = stream.begin_location();
        let forward = stream.forward_location();
        let cursor = stream.stream_location();
        assert!(begin.ch <= forward.ch);
        assert!(forward.ch <= cursor.ch);
    }
}

#[test]
fn close_is_idempotent() {
    let mut path = std::env::temp_dir();
    path.push(format!("clox_vm_test_source_stream_{}", std::process::id()));
    std::fs::write(&path, b"data").unwrap();

    let mut stream = SourceStream::open_file(&path, Encoding::Utf8).unwrap();
    assert!(stream.close());
    assert!(!stream.close());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_offset_advances_n_times() {
    let mut stream = SourceStream::from_text(b"abcd", Encoding::Utf8);
    let cp = stream.read_offset(3);
    assert_eq!(cp, 'c' as Codepoint);
    assert_eq!(stream.peek(), 'd' as Codepoint);
}

#[test]
fn peek_offset_does_not_advance() {
    let mut stream = SourceStream::from_text(b"abcd", Encoding::Utf8);
    let before = stream.forward_location();
    let cp = stream.peek_offset(3);
    assert_eq!(cp, 'c' as Codepoint);
    assert_eq!(stream.forward_location(), before);
    assert_eq!(stream.peek(), 'a' as Codepoint);
}

#[test]
fn open_file_refills_across_page_boundary() {
    let mut path = std::env::temp_dir();
    path.push(format!("clox_vm_test_source_stream_refill_{}", std::process::id()));
    let content: Vec<u8> = (0..(PAGE_SIZE * 2 + 10)).map(|i| b'a' + (i % 26) as u8).collect();
    std::fs::write(&path, &content).unwrap();

    let mut stream = SourceStream::open_file(&path, Encoding::Ascii).unwrap();
    let mut out = Vec::with_capacity(content.len());
    loop {
        let cp = stream.read();
        if cp == EOF {
            break;
        }
        out.push(cp as u8);
        // Simulate a lexer committing a one-byte lexeme on every read, the
        // way it would between tokens. Without this, `begin` never moves and
        // refill can never free room for the next page.
        stream.sync_begin();
    }
    assert_eq!(out, content);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn refill_does_not_rewind_line_or_column() {
    // Every third byte is a newline, so `begin`/`forward` cross several page
    // boundaries at different columns and lines. A refill must shift only
    // `forward.ch`; `co`/`ln` are absolute and must keep climbing.
    let mut path = std::env::temp_dir();
    path.push(format!("clox_vm_test_source_stream_refill_lines_{}", std::process::id()));
    let content: Vec<u8> = (0..(PAGE_SIZE * 2 + 10))
        .map(|i| if i % 3 == 2 { b'\n' } else { b'x' })
        .collect();
    std::fs::write(&path, &content).unwrap();

    let mut stream = SourceStream::open_file(&path, Encoding::Ascii).unwrap();
    let mut last_ln = 0u32;
    loop {
        let cp = stream.read();
        if cp == EOF {
            break;
        }
        let ln = stream.forward_location().ln;
        assert!(ln >= last_ln, "line went backwards: {} -> {}", last_ln, ln);
        last_ln = ln;
        stream.sync_begin();
    }
    assert!(last_ln > 0);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn clear_zeroes_buffer() {
    let mut stream = SourceStream::from_text(b"hi", Encoding::Utf8);
    stream.clear();
    assert_eq!(stream.peek(), 0);
}
