//! Fuzz target for the disassembler.
//!
//! Feeds arbitrary byte sequences to the disassembler and the listing
//! formatter to find edge cases in instruction decoding.

#![no_main]

use arbitrary::Arbitrary;
use ls8::{disassemble, disassembler::format_listing};
use libfuzzer_sys::fuzz_target;

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    start_address: u8,
}

fuzz_target!(|input: FuzzInput| {
    // Memory never holds more than 256 bytes
    if input.bytes.len() > 256 {
        return;
    }

    let instructions = disassemble(&input.bytes, input.start_address);

    // Verify invariants
    let mut total_size: usize = 0;
    let mut expected_address = input.start_address;

    for instr in &instructions {
        assert_eq!(instr.address, expected_address);
        assert!(instr.size_bytes() >= 1 && instr.size_bytes() <= 3);
        match instr.opcode {
            Some(op) => assert_eq!(instr.operand_bytes.len(), op.arg_count() as usize),
            None => assert!(instr.operand_bytes.is_empty()),
        }

        total_size += instr.size_bytes();
        expected_address = expected_address.wrapping_add(instr.size_bytes() as u8);
    }

    // Every input byte is covered exactly once
    assert_eq!(total_size, input.bytes.len());

    let listing = format_listing(&instructions);
    assert_eq!(listing.lines().count(), instructions.len());
});
