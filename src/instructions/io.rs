//! Console output instructions (PRN, PRA).

use crate::{MemoryBus, Output, OutputSink, CPU};

/// Executes PRN: emits the decimal value of `reg[reg_a]`.
pub(crate) fn execute_prn<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>, reg_a: u8) {
    let value = cpu.reg(reg_a);
    cpu.output.emit(Output::Number(value));
}

/// Executes PRA: emits `reg[reg_a]` as an ASCII character.
pub(crate) fn execute_pra<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>, reg_a: u8) {
    let value = cpu.reg(reg_a);
    cpu.output.emit(Output::Char(value));
}
