//! WASM API for the LS-8 emulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection,
//! program loading and disassembly.

use crate::{
    disassemble, format_instruction, parse_program, FlatMemory, MemoryBus, Output, OutputSink,
    CPU,
};
use wasm_bindgen::prelude::*;

/// Forwards PRN/PRA output to a JavaScript callback as text.
struct JsOutput {
    on_output: js_sys::Function,
}

impl OutputSink for JsOutput {
    fn emit(&mut self, output: Output) {
        let text = JsValue::from_str(&output.to_string());
        if let Err(e) = self.on_output.call1(&JsValue::NULL, &text) {
            log::error!("output callback failed: {:?}", e);
        }
    }
}

/// Result of disassembly operation
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u8,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u8 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Ls8Emulator {
    cpu: CPU<FlatMemory, JsOutput>,
}

#[wasm_bindgen]
impl Ls8Emulator {
    /// Create a new emulator. `on_output` receives each PRN/PRA emission as a string.
    #[wasm_bindgen(constructor)]
    pub fn new(on_output: js_sys::Function) -> Self {
        Ls8Emulator {
            cpu: CPU::new(FlatMemory::new(), JsOutput { on_output }),
        }
    }

    /// Execute a single instruction cycle
    pub fn step(&mut self) -> Result<(), JsError> {
        self.cpu.step().map_err(|e| JsError::new(&e.to_string()))
    }

    /// Execute multiple cycles and return actual cycles executed
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        self.cpu
            .run_for_cycles(cycles as u64)
            .map(|c| c as u32)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Reset registers, keeping memory
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Parse `.ls8` text and load it at address 0
    pub fn load_source(&mut self, source: &str) -> Result<(), JsError> {
        let program = parse_program(source).map_err(|e| JsError::new(&e.to_string()))?;
        self.load_program(&program)
    }

    /// Load raw program bytes at address 0
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), JsError> {
        self.cpu
            .load_program(program)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Mark an interrupt line pending
    pub fn raise_interrupt(&mut self, n: u8) {
        self.cpu.raise_interrupt(n);
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn registers(&self) -> Vec<u8> {
        self.cpu.registers().to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u8 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn fl(&self) -> u8 {
        self.cpu.fl()
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.is_halted()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&self, addr: u8) -> u8 {
        self.cpu.memory().read(addr)
    }

    /// Write a single byte to memory
    pub fn write_memory(&mut self, addr: u8, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Copy of all 256 bytes of memory
    pub fn memory(&self) -> Vec<u8> {
        self.cpu.memory().as_slice().to_vec()
    }

    /// Disassemble memory starting at an address
    pub fn disassemble(&self, start_addr: u8, num_instructions: u32) -> Vec<JsValue> {
        let memory = &self.cpu.memory().as_slice()[start_addr as usize..];

        disassemble(memory, start_addr)
            .iter()
            .take(num_instructions as usize)
            .map(|instr| {
                let mut bytes = vec![instr.raw];
                bytes.extend_from_slice(&instr.operand_bytes);

                JsValue::from(DisassemblyLine {
                    address: instr.address,
                    bytes,
                    text: format_instruction(instr),
                })
            })
            .collect()
    }
}
