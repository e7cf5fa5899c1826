//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the LS-8 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: R0-R7. R5 doubles as the interrupt mask (IM), R6 as the
//!   interrupt status (IS), and R7 mirrors the last value pushed.
//! - **Program counter** (PC): address of the next instruction
//! - **Stack pointer** (SP): starts at 0xF4 and grows downward
//! - **Flags** (FL): `00000LGE`, written by CMP
//! - **Interrupt latch**: cleared while a handler runs, set again by IRET
//! - **Cycle counter**: one per executed cycle
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Execute one instruction cycle
//! - `run()`: Execute until HLT
//! - `run_for_cycles()`: Execute until the cycle budget is exhausted or HLT
//!
//! Before each fetch, a pending unmasked interrupt takes priority and consumes
//! the cycle.

use crate::decoder::decode;
use crate::disassembler;
use crate::instructions;
use crate::loader::LoadError;
use crate::memory::{MemoryBus, MEMORY_SIZE};
use crate::output::OutputSink;
use crate::ExecutionError;

/// Initial stack pointer value.
pub const INITIAL_SP: u8 = 0xF4;

/// Register holding the interrupt mask.
pub const IM: u8 = 5;

/// Register holding the interrupt status (pending interrupts).
pub const IS: u8 = 6;

/// Base of the interrupt vector table. Interrupt `n` jumps to the address
/// stored at `VECTOR_TABLE + n`.
pub const VECTOR_TABLE: u8 = 0xF8;

/// Less-than flag.
pub const FLAG_L: u8 = 0b0000_0100;

/// Greater-than flag.
pub const FLAG_G: u8 = 0b0000_0010;

/// Equal flag.
pub const FLAG_E: u8 = 0b0000_0001;

/// LS-8 CPU state and execution context.
///
/// The CPU owns its memory bus and output sink.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation
/// * `O` - Receiver for PRN/PRA output
///
/// # Examples
///
/// ```
/// use ls8::{FlatMemory, Output, CPU, INITIAL_SP};
///
/// let cpu = CPU::new(FlatMemory::new(), Vec::<Output>::new());
///
/// assert_eq!(cpu.pc(), 0);
/// assert_eq!(cpu.sp(), INITIAL_SP);
/// assert_eq!(cpu.registers(), &[0; 8]);
/// assert!(!cpu.is_halted());
/// ```
pub struct CPU<M: MemoryBus, O: OutputSink> {
    /// General purpose registers R0-R7
    pub(crate) reg: [u8; 8],

    /// Program counter (address of next instruction)
    pub(crate) pc: u8,

    /// Stack pointer
    pub(crate) sp: u8,

    /// Flags register (00000LGE)
    pub(crate) fl: u8,

    /// Cleared while an interrupt handler runs
    pub(crate) interrupts_enabled: bool,

    pub(crate) halted: bool,

    /// Total cycles executed
    pub(crate) cycles: u64,

    pub(crate) memory: M,

    pub(crate) output: O,
}

impl<M: MemoryBus, O: OutputSink> CPU<M, O> {
    /// Creates a new CPU in the power-on state.
    ///
    /// - All registers zeroed, PC = 0, FL = 0
    /// - SP = 0xF4
    /// - Interrupts enabled (but masked, since IM = 0)
    pub fn new(memory: M, output: O) -> Self {
        Self {
            reg: [0; 8],
            pc: 0,
            sp: INITIAL_SP,
            fl: 0,
            interrupts_enabled: true,
            halted: false,
            cycles: 0,
            memory,
            output,
        }
    }

    /// Restores the power-on register state. Memory is left untouched.
    pub fn reset(&mut self) {
        self.reg = [0; 8];
        self.pc = 0;
        self.sp = INITIAL_SP;
        self.fl = 0;
        self.interrupts_enabled = true;
        self.halted = false;
        self.cycles = 0;
    }

    /// Writes `program` into memory starting at address 0.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::ProgramTooLarge` if the program does not fit in the
    /// address space. Memory is not modified in that case.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MEMORY_SIZE {
            return Err(LoadError::ProgramTooLarge { len: program.len() });
        }

        for (addr, &byte) in program.iter().enumerate() {
            self.memory.write(addr as u8, byte);
        }

        Ok(())
    }

    /// Executes one instruction cycle and advances the CPU state.
    ///
    /// 1. Service a pending interrupt if one is enabled and unmasked
    /// 2. Fetch the opcode at PC and the two bytes after it
    /// 3. Decode and dispatch on the instruction identity
    /// 4. Advance PC by `1 + arg_count` unless the instruction set PC itself
    ///
    /// Stepping a halted CPU does nothing.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::DivisionByZero` for DIV/MOD by zero. The CPU
    /// is halted when this happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::{FlatMemory, MemoryBus, Output, CPU};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0x00, 0b1001_1001); // LDI R2,42
    /// mem.write(0x01, 2);
    /// mem.write(0x02, 42);
    ///
    /// let mut cpu = CPU::new(mem, Vec::<Output>::new());
    /// cpu.step().unwrap();
    ///
    /// assert_eq!(cpu.register(2), 42);
    /// assert_eq!(cpu.pc(), 3);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        if self.halted {
            return Ok(());
        }

        if instructions::interrupts::service_pending(self) {
            self.cycles += 1;
            return Ok(());
        }

        // Fetch
        let ir = self.memory.read(self.pc);
        let operand_a = self.memory.read(self.pc.wrapping_add(1));
        let operand_b = self.memory.read(self.pc.wrapping_add(2));

        // Decode
        let decoded = decode(ir);

        log::trace!(
            "{:02X}: {:<12} FL={:03b} SP={:02X} R={:02X?}",
            self.pc,
            disassembler::format_bytes(&[ir, operand_a, operand_b], self.pc),
            self.fl,
            self.sp,
            self.reg
        );

        self.cycles += 1;

        // Execute
        let sets_pc = match decoded.opcode {
            Some(opcode) => {
                instructions::execute(self, opcode, operand_a, operand_b)?;
                opcode.sets_pc()
            }
            None => {
                log::warn!(
                    "Unknown opcode: 0x{:02X} at PC: 0x{:02X}, skipping {} operand byte(s)",
                    ir,
                    self.pc,
                    decoded.arg_count
                );
                false
            }
        };

        if !sets_pc {
            self.pc = self.pc.wrapping_add(decoded.size_bytes());
        }

        Ok(())
    }

    /// Runs the CPU until it halts.
    ///
    /// Returns the number of cycles executed. A program that never executes
    /// HLT makes this loop forever; use [`run_for_cycles`](Self::run_for_cycles)
    /// or [`Clock`](crate::Clock) with a cycle limit to bound execution.
    pub fn run(&mut self) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;

        while !self.halted {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Runs the CPU for at most `cycle_budget` cycles.
    ///
    /// Stops early when the CPU halts. Returns the number of cycles consumed.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles && !self.halted {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Marks interrupt `n` (0-7) as pending by setting bit `n` of IS.
    ///
    /// The interrupt is serviced at the next cycle boundary if its mask bit is
    /// set and no handler is running.
    pub fn raise_interrupt(&mut self, n: u8) {
        let bit = 1u8 << (n & 0b111);
        self.set_reg(IS, self.reg(IS) | bit);
    }

    // ========== Internal Helpers ==========

    /// Reads register `index` (wrapped to 0-7).
    pub(crate) fn reg(&self, index: u8) -> u8 {
        self.reg[(index & 0b111) as usize]
    }

    /// Writes register `index` (wrapped to 0-7).
    pub(crate) fn set_reg(&mut self, index: u8, value: u8) {
        self.reg[(index & 0b111) as usize] = value;
    }

    /// Decrements SP, then stores `value` at the new top of stack.
    pub(crate) fn push_byte(&mut self, value: u8) {
        self.sp = self.sp.wrapping_sub(1);
        self.memory.write(self.sp, value);
    }

    /// Loads the top of stack, then increments SP.
    pub(crate) fn pop_byte(&mut self) -> u8 {
        let value = self.memory.read(self.sp);
        self.sp = self.sp.wrapping_add(1);
        value
    }

    // ========== Register Getters ==========

    /// Returns the value of register `index` (wrapped to 0-7).
    pub fn register(&self, index: u8) -> u8 {
        self.reg(index)
    }

    /// Returns all eight registers.
    pub fn registers(&self) -> &[u8; 8] {
        &self.reg
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u8 {
        self.pc
    }

    /// Returns the stack pointer value.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the flags register (`00000LGE`).
    pub fn fl(&self) -> u8 {
        self.fl
    }

    /// Returns true if the last CMP found its operands equal.
    pub fn flag_e(&self) -> bool {
        self.fl & FLAG_E != 0
    }

    /// Returns true if the last CMP found the first operand greater.
    pub fn flag_g(&self) -> bool {
        self.fl & FLAG_G != 0
    }

    /// Returns true if the last CMP found the first operand less.
    pub fn flag_l(&self) -> bool {
        self.fl & FLAG_L != 0
    }

    /// Returns the interrupt mask (R5).
    pub fn interrupt_mask(&self) -> u8 {
        self.reg(IM)
    }

    /// Returns the pending interrupts (R6).
    pub fn interrupt_status(&self) -> u8 {
        self.reg(IS)
    }

    /// Returns false while an interrupt handler is running.
    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    /// Returns true once HLT has executed or a fatal error occurred.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Returns the total number of cycles executed since initialization.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Reads a byte of memory without affecting CPU state.
    pub fn peek(&self, addr: u8) -> u8 {
        self.memory.read(addr)
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Consumes the CPU, returning its memory and output sink.
    pub fn into_parts(self) -> (M, O) {
        (self.memory, self.output)
    }

    // ========== Setters ==========

    /// Stores a byte in memory, useful for program loading.
    pub fn poke(&mut self, addr: u8, value: u8) {
        self.memory.write(addr, value);
    }

    /// Sets register `index` (wrapped to 0-7).
    pub fn set_register(&mut self, index: u8, value: u8) {
        self.set_reg(index, value);
    }

    pub fn set_pc(&mut self, pc: u8) {
        self.pc = pc;
    }

    pub fn set_sp(&mut self, sp: u8) {
        self.sp = sp;
    }

    pub fn set_fl(&mut self, fl: u8) {
        self.fl = fl;
    }

    /// Sets the interrupt mask (R5).
    pub fn set_interrupt_mask(&mut self, mask: u8) {
        self.set_reg(IM, mask);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlatMemory, Output};

    fn cpu_with(program: &[u8]) -> CPU<FlatMemory, Vec<Output>> {
        CPU::new(FlatMemory::with_contents(program), Vec::<Output>::new())
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = cpu_with(&[]);

        assert_eq!(cpu.pc(), 0);
        assert_eq!(cpu.sp(), 0xF4);
        assert_eq!(cpu.fl(), 0);
        assert_eq!(cpu.registers(), &[0; 8]);
        assert_eq!(cpu.cycles(), 0);
        assert!(cpu.interrupts_enabled());
        assert!(!cpu.is_halted());
    }

    #[test]
    fn test_push_pop_helpers() {
        let mut cpu = cpu_with(&[]);

        cpu.push_byte(0x11);
        cpu.push_byte(0x22);
        assert_eq!(cpu.sp(), 0xF2);
        assert_eq!(cpu.peek(0xF3), 0x11);
        assert_eq!(cpu.peek(0xF2), 0x22);

        assert_eq!(cpu.pop_byte(), 0x22);
        assert_eq!(cpu.pop_byte(), 0x11);
        assert_eq!(cpu.sp(), 0xF4);
    }

    #[test]
    fn test_register_index_wraps() {
        let mut cpu = cpu_with(&[]);
        cpu.set_register(9, 0x55);
        assert_eq!(cpu.register(1), 0x55);
    }

    #[test]
    fn test_step_halted_is_inert() {
        let mut cpu = cpu_with(&[0b0000_0001, 0b1001_1001, 0, 7]);

        cpu.step().unwrap();
        assert!(cpu.is_halted());
        let pc = cpu.pc();
        let cycles = cpu.cycles();

        cpu.step().unwrap();
        assert_eq!(cpu.pc(), pc);
        assert_eq!(cpu.cycles(), cycles);
        assert_eq!(cpu.register(0), 0);
    }

    #[test]
    fn test_unknown_opcode_advances_by_arg_count() {
        // 0b0100_0001 is undefined with one operand byte
        let mut cpu = cpu_with(&[0b0100_0001, 0xAA, 0b1100_0000]);

        cpu.step().unwrap();
        assert_eq!(cpu.pc(), 2);

        // Reserved argument count 3
        cpu.step().unwrap();
        assert_eq!(cpu.pc(), 6);
        assert!(!cpu.is_halted());
    }

    #[test]
    fn test_reset_keeps_memory() {
        let mut cpu = cpu_with(&[0b1001_1001, 3, 9, 0b0000_0001]);
        cpu.run().unwrap();
        assert_eq!(cpu.register(3), 9);

        cpu.reset();
        assert_eq!(cpu.register(3), 0);
        assert_eq!(cpu.pc(), 0);
        assert!(!cpu.is_halted());
        assert_eq!(cpu.peek(0), 0b1001_1001);
    }

    #[test]
    fn test_load_program_too_large() {
        let mut cpu = cpu_with(&[]);
        let err = cpu.load_program(&[0; 257]).unwrap_err();
        assert!(matches!(err, LoadError::ProgramTooLarge { len: 257 }));
        assert!(cpu.load_program(&[0; 256]).is_ok());
    }

    #[test]
    fn test_run_for_cycles_stops_at_budget() {
        // JMP R0 with R0 = 0: spins forever
        let mut cpu = cpu_with(&[0b0101_0000, 0]);
        assert_eq!(cpu.run_for_cycles(10).unwrap(), 10);
        assert_eq!(cpu.pc(), 0);
        assert!(!cpu.is_halted());
    }
}
