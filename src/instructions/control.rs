//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to the address in a register
//! - JEQ, JNE, JGT, JLT: Jump if the flag condition holds
//! - CALL: Push the return address and jump
//! - RET: Pop the return address
//! - HLT: Halt the CPU
//!
//! Every jump handler leaves PC at its final value, including the
//! fall-through case of a conditional jump that is not taken.

use crate::{MemoryBus, Opcode, OutputSink, CPU};

/// Executes JMP: `PC = reg[reg_a]`.
pub(crate) fn execute_jmp<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>, reg_a: u8) {
    cpu.pc = cpu.reg(reg_a);
}

/// Executes JEQ, JNE, JGT or JLT.
///
/// | Opcode | Taken when |
/// |--------|------------|
/// | JEQ    | E set      |
/// | JNE    | E clear    |
/// | JGT    | G set      |
/// | JLT    | L set      |
///
/// When not taken, PC advances past the 2-byte instruction.
pub(crate) fn execute_conditional_jump<M: MemoryBus, O: OutputSink>(
    cpu: &mut CPU<M, O>,
    opcode: Opcode,
    reg_a: u8,
) {
    let taken = match opcode {
        Opcode::Jeq => cpu.flag_e(),
        Opcode::Jne => !cpu.flag_e(),
        Opcode::Jgt => cpu.flag_g(),
        Opcode::Jlt => cpu.flag_l(),
        _ => panic!("Invalid opcode for conditional jump: {}", opcode),
    };

    if taken {
        cpu.pc = cpu.reg(reg_a);
    } else {
        cpu.pc = cpu.pc.wrapping_add(opcode.size_bytes());
    }
}

/// Executes CALL.
///
/// Pushes the address of the next instruction (PC + 2) and jumps to
/// `reg[reg_a]`.
pub(crate) fn execute_call<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>, reg_a: u8) {
    // Read the target first: the push must not affect it
    let target = cpu.reg(reg_a);
    let return_address = cpu.pc.wrapping_add(Opcode::Call.size_bytes());

    cpu.push_byte(return_address);
    cpu.pc = target;
}

/// Executes RET: pops PC from the stack.
pub(crate) fn execute_ret<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>) {
    cpu.pc = cpu.pop_byte();
}

/// Executes HLT.
pub(crate) fn execute_hlt<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>) {
    log::debug!("HLT at 0x{:02X} after {} cycles", cpu.pc, cpu.cycles);
    cpu.halted = true;
}
