//! Formatting functions for disassembled instructions

use std::fmt::Write;

use crate::disassembler::{decode_instruction, Instruction};
use crate::opcodes::Opcode;

/// Format a single instruction as assembly text
///
/// Register operands print as `R0`-`R7`; the LDI immediate prints in decimal.
/// Undefined opcodes print as a `.byte` directive.
pub fn format_instruction(instr: &Instruction) -> String {
    let opcode = match instr.opcode {
        Some(op) => op,
        None => return format!(".byte 0x{:02X}", instr.raw),
    };

    let operand = format_operand(opcode, &instr.operand_bytes);

    if operand.is_empty() {
        opcode.mnemonic().to_string()
    } else {
        format!("{} {}", opcode.mnemonic(), operand)
    }
}

/// Format the operands of an instruction
fn format_operand(opcode: Opcode, operands: &[u8]) -> String {
    match (opcode, operands) {
        (_, []) => String::new(),
        (Opcode::Ldi, [reg, value]) => format!("{},{}", register(*reg), value),
        (_, [reg]) => register(*reg),
        (_, [reg_a, reg_b]) => format!("{},{}", register(*reg_a), register(*reg_b)),
        (_, _) => String::new(),
    }
}

fn register(index: u8) -> String {
    format!("R{}", index & 0b111)
}

/// Format the instruction starting at `bytes[0]`, for tracing.
pub fn format_bytes(bytes: &[u8], address: u8) -> String {
    match decode_instruction(bytes, address) {
        Some(instr) => format_instruction(&instr),
        None => format!(".byte 0x{:02X}", bytes.first().copied().unwrap_or(0)),
    }
}

/// Format instructions as a listing with addresses and raw bytes.
///
/// ```text
/// 00: 99 00 08  LDI R0,8
/// 03: 43 00     PRN R0
/// 05: 01        HLT
/// ```
pub fn format_listing(instructions: &[Instruction]) -> String {
    let mut out = String::new();

    for instr in instructions {
        let mut hex = format!("{:02X}", instr.raw);
        for byte in &instr.operand_bytes {
            // Writing to a String cannot fail
            let _ = write!(hex, " {:02X}", byte);
        }
        let _ = writeln!(
            out,
            "{:02X}: {:<9} {}",
            instr.address,
            hex,
            format_instruction(instr)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::disassemble;

    fn fmt(bytes: &[u8]) -> String {
        format_bytes(bytes, 0)
    }

    #[test]
    fn test_format_register_operands() {
        assert_eq!(fmt(&[0b1010_1010, 0, 1]), "MUL R0,R1");
        assert_eq!(fmt(&[0b1001_1000, 2, 3]), "LD R2,R3");
        assert_eq!(fmt(&[0b0100_1101, 7]), "PUSH R7");
        assert_eq!(fmt(&[0b0000_1011]), "IRET");
    }

    #[test]
    fn test_format_ldi_immediate() {
        assert_eq!(fmt(&[0b1001_1001, 1, 255]), "LDI R1,255");
    }

    #[test]
    fn test_format_unknown() {
        assert_eq!(fmt(&[0xFF, 0, 0]), ".byte 0xFF");
    }

    #[test]
    fn test_format_listing() {
        let program = [0b1001_1001, 0, 8, 0b0100_0011, 0, 0b0000_0001];
        let listing = format_listing(&disassemble(&program, 0));

        assert_eq!(
            listing,
            "00: 99 00 08  LDI R0,8\n03: 43 00     PRN R0\n05: 01        HLT\n"
        );
    }
}
