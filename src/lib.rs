//! # LS-8 CPU Emulator Core
//!
//! An emulator for the LS-8, a small 8-bit von Neumann CPU with eight general
//! purpose registers, a downward-growing stack, comparison flags and eight
//! maskable interrupts, all sharing a single 256-byte address space.
//!
//! ## Quick Start
//!
//! ```rust
//! use ls8::{FlatMemory, Output, CPU};
//!
//! // LDI R0,8; LDI R1,9; MUL R0,R1; PRN R0; HLT
//! let program = [
//!     0b1001_1001, 0, 8,
//!     0b1001_1001, 1, 9,
//!     0b1010_1010, 0, 1,
//!     0b0100_0011, 0,
//!     0b0000_0001,
//! ];
//!
//! let mut cpu = CPU::new(FlatMemory::new(), Vec::<Output>::new());
//! cpu.load_program(&program).unwrap();
//! cpu.run().unwrap();
//!
//! assert_eq!(cpu.register(0), 72);
//! assert_eq!(cpu.output(), &vec![Output::Number(72)]);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the instruction cycle
//! - `memory` - MemoryBus trait and the flat 256-byte implementation
//! - `opcodes` - Closed set of instruction identities
//! - `decoder` - Structural decoding of instruction bytes
//! - `output` - Sinks for PRN/PRA output
//! - `loader` - `.ls8` program text parsing
//! - `clock` - Run loop with pacing, cycle limits and a timer interrupt
//! - `disassembler` - Byte stream to assembly text

pub mod clock;
pub mod cpu;
pub mod decoder;
pub mod disassembler;
pub mod loader;
pub mod memory;
pub mod opcodes;
pub mod output;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use clock::{Clock, ClockConfig, ClockError};
pub use cpu::{FLAG_E, FLAG_G, FLAG_L, CPU, IM, INITIAL_SP, IS, VECTOR_TABLE};
pub use decoder::{decode, DecodedInstruction};
pub use disassembler::{disassemble, format_instruction, Instruction};
pub use loader::{load_file, parse_program, LoadError};
pub use memory::{FlatMemory, MemoryBus, MEMORY_SIZE};
pub use opcodes::{AluOp, Opcode};
pub use output::{Output, OutputSink, WriterSink};

#[cfg(feature = "wasm")]
pub use wasm::Ls8Emulator;

/// Errors that can occur during CPU execution.
///
/// Every execution error is fatal: the CPU is halted before the error is
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// DIV or MOD with a zero divisor.
    #[error("{opcode} by zero at address 0x{address:02X}")]
    DivisionByZero {
        /// The faulting instruction.
        opcode: Opcode,
        /// Address of the faulting instruction.
        address: u8,
    },
}
