//! # Load and Store Instructions
//!
//! - LDI: load an immediate value into a register
//! - LD: load a register from the address held in another register
//! - ST: store a register at the address held in another register

use crate::{MemoryBus, OutputSink, CPU};

/// Executes LDI: `reg[reg_a] = value`.
pub(crate) fn execute_ldi<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>, reg_a: u8, value: u8) {
    cpu.set_reg(reg_a, value);
}

/// Executes LD: `reg[reg_a] = memory[reg[reg_b]]`.
pub(crate) fn execute_ld<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>, reg_a: u8, reg_b: u8) {
    let value = cpu.memory.read(cpu.reg(reg_b));
    cpu.set_reg(reg_a, value);
}

/// Executes ST: `memory[reg[reg_a]] = reg[reg_b]`.
pub(crate) fn execute_st<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>, reg_a: u8, reg_b: u8) {
    let addr = cpu.reg(reg_a);
    let value = cpu.reg(reg_b);
    cpu.memory.write(addr, value);
}
