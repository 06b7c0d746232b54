use super::*;

#[test]
fn nop_is_always_present_with_byte_kind() {
    // Testable property #4.
    let (found, descriptor) = get_opcode_info(0x00);
    assert!(found);
    assert_eq!(descriptor.name, "nop");
    assert_eq!(descriptor.kind, InstrKind::Byte);
}

#[test]
fn unknown_opcode_never_has_a_null_name() {
    for code in 0u8..=255 {
        let (_, descriptor) = get_opcode_info(code);
        assert!(!descriptor.name.is_empty());
    }
}

#[test]
fn unassigned_opcode_resolves_unknown() {
    let (found, descriptor) = get_opcode_info(0xFE);
    assert!(!found);
    assert_eq!(descriptor.name, "unknown");
    assert_eq!(descriptor.code, 0xFE);
    assert_eq!(descriptor.kind, InstrKind::Byte);
}

#[test]
fn kind_widths_match_the_eight_kind_table() {
    assert_eq!(InstrKind::Byte.width(), 1);
    assert_eq!(InstrKind::Fast.width(), 2);
    assert_eq!(InstrKind::Ctrl.width(), 4);
    assert_eq!(InstrKind::Data.width(), 4);
    assert_eq!(InstrKind::Regs.width(), 4);
    assert_eq!(InstrKind::Long.width(), 6);
    assert_eq!(InstrKind::Jump.width(), 6);
    assert_eq!(InstrKind::Full.width(), 8);
}

#[test]
fn tag_high_byte_is_width_low_byte_is_layout_id() {
    let tag = InstrKind::Jump.tag();
    assert_eq!((tag >> 8) as usize, InstrKind::Jump.width());
    assert_eq!(tag & 0xFF, 6);
}
