//! Fuzz target for CPU execution.
//!
//! Builds an arbitrary machine state and memory image, then runs a bounded
//! number of cycles looking for panics and broken invariants.

#![no_main]

use arbitrary::Arbitrary;
use ls8::{ExecutionError, FlatMemory, Output, CPU};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    /// R0-R7, including IM (R5) and IS (R6)
    registers: [u8; 8],
    pc: u8,
    sp: u8,
    fl: u8,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: [u8; 256],
    cycles: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut cpu = CPU::new(FlatMemory::with_contents(&input.memory), Vec::<Output>::new());

    for (r, &value) in input.cpu_state.registers.iter().enumerate() {
        cpu.set_register(r as u8, value);
    }
    cpu.set_pc(input.cpu_state.pc);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_fl(input.cpu_state.fl);

    match cpu.run_for_cycles(input.cycles as u64) {
        Ok(executed) => {
            assert!(executed <= input.cycles as u64);
            assert!(cpu.is_halted() || executed == input.cycles as u64);
        }
        // Division by zero is the only fault and always halts
        Err(ExecutionError::DivisionByZero { .. }) => assert!(cpu.is_halted()),
    }

    // A halted CPU stays put
    if cpu.is_halted() {
        let pc = cpu.pc();
        let cycles = cpu.cycles();
        assert!(cpu.step().is_ok());
        assert_eq!(cpu.pc(), pc);
        assert_eq!(cpu.cycles(), cycles);
    }
});
