//! # Interrupts
//!
//! The LS-8 has eight interrupt lines. Bit `n` of IS (R6) marks interrupt `n`
//! pending; bit `n` of IM (R5) unmasks it. INT raises an interrupt from
//! software and hosts raise them with [`CPU::raise_interrupt`].
//!
//! ## Interrupt Service Sequence
//!
//! At the start of a cycle, if interrupts are enabled and `IM & IS != 0`, the
//! CPU takes the lowest pending interrupt `n` instead of fetching:
//!
//! 1. Clears bit `n` in IS
//! 2. Disables further interrupts
//! 3. Pushes PC
//! 4. Pushes FL
//! 5. Pushes R0 through R6, in that order
//! 6. Loads PC from the vector table entry at `0xF8 + n`
//!
//! IRET undoes steps 5 to 3 in reverse and re-enables interrupts. Interrupts
//! raised while a handler runs stay pending until then.

use crate::cpu::{IM, IS, VECTOR_TABLE};
use crate::{MemoryBus, OutputSink, CPU};

/// Number of registers saved on interrupt entry (R0-R6).
const SAVED_REGISTERS: u8 = 7;

/// Enters the handler of the lowest pending unmasked interrupt.
///
/// Returns `false`, leaving the CPU untouched, when no interrupt can be taken.
pub(crate) fn service_pending<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>) -> bool {
    if !cpu.interrupts_enabled {
        return false;
    }

    let pending = cpu.reg(IM) & cpu.reg(IS);
    if pending == 0 {
        return false;
    }

    let n = pending.trailing_zeros() as u8;
    cpu.set_reg(IS, cpu.reg(IS) & !(1 << n));
    cpu.interrupts_enabled = false;

    cpu.push_byte(cpu.pc);
    cpu.push_byte(cpu.fl);
    for r in 0..SAVED_REGISTERS {
        cpu.push_byte(cpu.reg(r));
    }

    let handler = cpu.memory.read(VECTOR_TABLE.wrapping_add(n));
    log::debug!(
        "interrupt {} at PC 0x{:02X}, jumping to handler 0x{:02X}",
        n,
        cpu.pc,
        handler
    );
    cpu.pc = handler;

    true
}

/// Executes INT: sets the IS bit numbered by `reg[reg_a]`.
pub(crate) fn execute_int<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>, reg_a: u8) {
    let n = cpu.reg(reg_a);
    cpu.raise_interrupt(n);
}

/// Executes IRET: restores R6-R0, FL and PC from the stack and re-enables
/// interrupts.
///
/// IS keeps the handler's current value rather than the saved one: bits raised
/// while the handler ran stay pending and bits it cleared stay acknowledged.
pub(crate) fn execute_iret<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>) {
    let pending = cpu.reg(IS);
    for r in (0..SAVED_REGISTERS).rev() {
        let value = cpu.pop_byte();
        cpu.set_reg(r, value);
    }
    cpu.set_reg(IS, pending);
    cpu.fl = cpu.pop_byte();
    cpu.pc = cpu.pop_byte();
    cpu.interrupts_enabled = true;

    log::debug!("IRET to 0x{:02X}", cpu.pc);
}
