//! Structural instruction decoder.
//!
//! Decoding never fails: every byte has a shape even when it does not encode a
//! defined instruction.

use crate::opcodes::Opcode;

/// The decoded shape of a single instruction byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// The raw instruction byte.
    pub raw: u8,

    /// Instruction identity, `None` for undefined bytes.
    pub opcode: Option<Opcode>,

    /// Number of operand bytes following the opcode (`raw >> 6`, 0-3).
    pub arg_count: u8,

    /// ALU bit (`raw` bit 5).
    pub is_alu: bool,

    /// Whether executing the instruction writes the flags register.
    pub sets_flags: bool,
}

impl DecodedInstruction {
    /// Total instruction size in bytes (opcode + operands).
    pub fn size_bytes(&self) -> u8 {
        self.arg_count + 1
    }

    /// An argument count of 3 is structurally possible but no instruction uses it.
    pub fn is_reserved(&self) -> bool {
        self.arg_count == 3
    }
}

/// Decodes a raw instruction byte.
///
/// # Examples
///
/// ```
/// use ls8::{decode, Opcode};
///
/// let mul = decode(0b1010_1010);
/// assert_eq!(mul.opcode, Some(Opcode::Mul));
/// assert_eq!(mul.arg_count, 2);
/// assert!(mul.is_alu);
/// assert!(!mul.sets_flags);
///
/// let unknown = decode(0b0100_0000);
/// assert_eq!(unknown.opcode, None);
/// assert_eq!(unknown.arg_count, 1);
/// ```
pub const fn decode(raw: u8) -> DecodedInstruction {
    let opcode = Opcode::from_byte(raw);
    let sets_flags = match opcode {
        Some(op) => op.sets_flags(),
        None => false,
    };

    DecodedInstruction {
        raw,
        opcode,
        arg_count: raw >> 6,
        is_alu: (raw >> 5) & 1 == 1,
        sets_flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ldi() {
        let d = decode(0b1001_1001);
        assert_eq!(d.opcode, Some(Opcode::Ldi));
        assert_eq!(d.arg_count, 2);
        assert_eq!(d.size_bytes(), 3);
        assert!(!d.is_alu);
        assert!(!d.sets_flags);
    }

    #[test]
    fn test_decode_cmp_sets_flags() {
        let d = decode(0b1010_0000);
        assert_eq!(d.opcode, Some(Opcode::Cmp));
        assert!(d.is_alu);
        assert!(d.sets_flags);
    }

    #[test]
    fn test_decode_reserved_arg_count() {
        let d = decode(0b1100_0000);
        assert_eq!(d.opcode, None);
        assert_eq!(d.arg_count, 3);
        assert!(d.is_reserved());
        assert_eq!(d.size_bytes(), 4);
    }

    #[test]
    fn test_decode_matches_opcode_metadata() {
        for op in Opcode::ALL {
            let d = decode(op.byte());
            assert_eq!(d.arg_count, op.arg_count());
            assert_eq!(d.is_alu, op.is_alu());
            assert!(!d.is_reserved());
        }
    }
}
