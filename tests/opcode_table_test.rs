//! Opcode table validation tests
//!
//! Verifies that the opcode metadata and the structural decoder agree for
//! every byte value.

use ls8::{decode, Opcode};

#[test]
fn test_opcode_table_completeness() {
    assert_eq!(Opcode::ALL.len(), 30);

    let defined = (0..=255u8).filter(|b| Opcode::from_byte(*b).is_some()).count();
    assert_eq!(defined, 30, "exactly 30 bytes encode an instruction");
}

#[test]
fn test_encoding_round_trips() {
    for op in Opcode::ALL {
        assert_eq!(
            Opcode::from_byte(op.byte()),
            Some(op),
            "{} (0x{:02X}) does not decode to itself",
            op,
            op.byte()
        );
        assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(op));
    }
}

#[test]
fn test_mnemonic_lookup_is_case_insensitive() {
    assert_eq!(Opcode::from_mnemonic("ldi"), Some(Opcode::Ldi));
    assert_eq!(Opcode::from_mnemonic("Iret"), Some(Opcode::Iret));
    assert_eq!(Opcode::from_mnemonic("BRK"), None);
}

#[test]
fn test_defined_opcodes_use_at_most_two_operands() {
    for op in Opcode::ALL {
        assert!(
            op.arg_count() <= 2,
            "{} has invalid operand count {}",
            op,
            op.arg_count()
        );
        assert_eq!(op.size_bytes(), op.arg_count() + 1);
    }
}

#[test]
fn test_operand_counts() {
    assert_eq!(Opcode::Hlt.arg_count(), 0);
    assert_eq!(Opcode::Iret.arg_count(), 0);
    assert_eq!(Opcode::Prn.arg_count(), 1);
    assert_eq!(Opcode::Jmp.arg_count(), 1);
    assert_eq!(Opcode::Not.arg_count(), 1);
    assert_eq!(Opcode::Ldi.arg_count(), 2);
    assert_eq!(Opcode::Cmp.arg_count(), 2);
}

#[test]
fn test_alu_classification() {
    let alu: Vec<Opcode> = Opcode::ALL.iter().copied().filter(|op| op.is_alu()).collect();

    assert_eq!(
        alu,
        vec![
            Opcode::Not,
            Opcode::Inc,
            Opcode::Dec,
            Opcode::Cmp,
            Opcode::Add,
            Opcode::Sub,
            Opcode::Mul,
            Opcode::Div,
            Opcode::Mod,
            Opcode::Or,
            Opcode::Xor,
            Opcode::And,
        ]
    );

    for op in &alu {
        assert!(op.alu_op().is_some(), "{} has no ALU operation", op);
    }
    assert_eq!(Opcode::Ldi.alu_op(), None);
}

#[test]
fn test_only_cmp_sets_flags() {
    for op in Opcode::ALL {
        assert_eq!(op.sets_flags(), op == Opcode::Cmp, "{}", op);
    }
}

#[test]
fn test_pc_setting_opcodes() {
    let sets_pc: Vec<&str> = Opcode::ALL
        .iter()
        .filter(|op| op.sets_pc())
        .map(|op| op.mnemonic())
        .collect();

    assert_eq!(
        sets_pc,
        vec!["RET", "IRET", "CALL", "JMP", "JEQ", "JNE", "JLT", "JGT"]
    );
}

#[test]
fn test_decoder_matches_table() {
    for raw in 0..=255u8 {
        let decoded = decode(raw);

        assert_eq!(decoded.raw, raw);
        assert_eq!(decoded.arg_count, raw >> 6);
        assert_eq!(decoded.is_alu, raw & 0b0010_0000 != 0);
        assert_eq!(decoded.opcode, Opcode::from_byte(raw));
        assert_eq!(decoded.is_reserved(), raw >= 0b1100_0000);

        if let Some(op) = decoded.opcode {
            assert_eq!(decoded.arg_count, op.arg_count());
            assert_eq!(decoded.is_alu, op.is_alu());
            assert_eq!(decoded.sets_flags, op.sets_flags());
        } else {
            assert!(!decoded.sets_flags);
        }
    }
}
