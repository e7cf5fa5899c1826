//! LS-8 Disassembler Module
//!
//! Converts binary machine code into human-readable assembly mnemonics.

pub mod formatter;

pub use formatter::{format_bytes, format_instruction, format_listing};

use crate::decoder::decode;
use crate::opcodes::Opcode;

/// A single disassembled instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u8,

    /// The instruction byte
    pub raw: u8,

    /// Instruction identity, `None` when emitted as a `.byte` directive
    pub opcode: Option<Opcode>,

    /// Operand bytes (0-2)
    pub operand_bytes: Vec<u8>,
}

impl Instruction {
    /// Total size in bytes (opcode + operands)
    pub fn size_bytes(&self) -> usize {
        match self.opcode {
            Some(_) => 1 + self.operand_bytes.len(),
            None => 1,
        }
    }
}

/// Decode a single instruction from a byte slice.
///
/// Returns `None` for undefined opcodes or when `bytes` is too short to hold
/// the operands.
pub fn decode_instruction(bytes: &[u8], address: u8) -> Option<Instruction> {
    let raw = *bytes.first()?;
    let opcode = decode(raw).opcode?;
    let size = opcode.size_bytes() as usize;

    if bytes.len() < size {
        return None;
    }

    Some(Instruction {
        address,
        raw,
        opcode: Some(opcode),
        operand_bytes: bytes[1..size].to_vec(),
    })
}

/// Disassemble a byte slice into a vector of instructions.
///
/// Undefined opcodes and truncated instructions become one-byte `.byte`
/// entries so that decoding resynchronizes on the next byte.
///
/// # Examples
///
/// ```
/// use ls8::{disassemble, format_instruction};
///
/// let program = [0b1001_1001, 0, 8, 0b0100_0011, 0, 0b0000_0001];
/// let text: Vec<String> = disassemble(&program, 0)
///     .iter()
///     .map(format_instruction)
///     .collect();
///
/// assert_eq!(text, vec!["LDI R0,8", "PRN R0", "HLT"]);
/// ```
pub fn disassemble(bytes: &[u8], start_address: u8) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut address = start_address;

    while offset < bytes.len() {
        let instr = decode_instruction(&bytes[offset..], address).unwrap_or(Instruction {
            address,
            raw: bytes[offset],
            opcode: None,
            operand_bytes: Vec::new(),
        });

        let size = instr.size_bytes();
        offset += size;
        address = address.wrapping_add(size as u8);
        instructions.push(instr);
    }

    instructions
}
