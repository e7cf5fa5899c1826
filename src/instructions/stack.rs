//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PUSH: Push a register on the stack
//! - POP: Pop the top of stack into a register
//!
//! The LS-8 stack lives in main memory and grows downward from 0xF4. SP points
//! at the most recently pushed byte. There is no overflow guard: pushing past
//! address 0 wraps to 0xFF and will overwrite the vector table and program.

use crate::{MemoryBus, OutputSink, CPU};

/// Register that mirrors the value of every PUSH.
const PUSH_MIRROR: u8 = 7;

/// Executes the PUSH instruction.
///
/// Stack operation:
/// 1. Copy `reg[reg_a]` into R7
/// 2. Decrement SP
/// 3. Write the value to memory at SP
///
/// # Examples
///
/// ```
/// use ls8::{FlatMemory, Output, CPU};
///
/// // LDI R0,42; PUSH R0
/// let program = [0b1001_1001, 0, 42, 0b0100_1101, 0];
/// let mut cpu = CPU::new(FlatMemory::with_contents(&program), Vec::<Output>::new());
/// cpu.run_for_cycles(2).unwrap();
///
/// assert_eq!(cpu.sp(), 0xF3);
/// assert_eq!(cpu.peek(0xF3), 42);
/// assert_eq!(cpu.register(7), 42);
/// ```
pub(crate) fn execute_push<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>, reg_a: u8) {
    let value = cpu.reg(reg_a);
    cpu.set_reg(PUSH_MIRROR, value);
    cpu.push_byte(value);
}

/// Executes the POP instruction: `reg[reg_a] = memory[SP]; SP += 1`.
pub(crate) fn execute_pop<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>, reg_a: u8) {
    let value = cpu.pop_byte();
    cpu.set_reg(reg_a, value);
}
