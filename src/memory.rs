//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations.
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows LS-8 hardware behavior:
//! - 256 addressable bytes shared by code, data and the stack
//! - Addresses are `u8`, so every access wraps modulo 256
//! - No bus errors - reads/writes always succeed

/// Size of the LS-8 address space in bytes.
pub const MEMORY_SIZE: usize = 256;

/// Memory bus trait for CPU to read/write bytes.
///
/// The CPU accesses instructions, data, the stack and the interrupt vector
/// table through this abstraction.
///
/// # Examples
///
/// ```
/// use ls8::{FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x42, 0x99);
/// assert_eq!(mem.read(0x42), 0x99);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use ls8::MemoryBus;
///
/// /// Memory whose upper half ignores writes.
/// struct HalfRom {
///     data: [u8; 256],
/// }
///
/// impl MemoryBus for HalfRom {
///     fn read(&self, addr: u8) -> u8 {
///         self.data[addr as usize]
///     }
///
///     fn write(&mut self, addr: u8, value: u8) {
///         if addr < 0x80 {
///             self.data[addr as usize] = value;
///         }
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified address.
    ///
    /// This method must never panic.
    fn read(&self, addr: u8) -> u8;

    /// Writes a byte to the specified address.
    ///
    /// This method must never panic. Implementations may ignore the write.
    fn write(&mut self, addr: u8, value: u8);
}

/// Simple 256-byte flat memory implementation.
///
/// All addresses (0x00-0xFF) are writable RAM initialized to 0x00.
///
/// # Examples
///
/// ```
/// use ls8::{FlatMemory, MemoryBus, Output, CPU};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0x00, 0b0000_0001); // HLT
///
/// let mut cpu = CPU::new(memory, Vec::<Output>::new());
/// cpu.step().unwrap();
/// assert!(cpu.is_halted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatMemory {
    data: [u8; MEMORY_SIZE],
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: [0; MEMORY_SIZE],
        }
    }

    /// Creates memory pre-filled with `bytes` starting at address 0.
    ///
    /// Bytes beyond the 256-byte address space are ignored.
    pub fn with_contents(bytes: &[u8]) -> Self {
        let mut mem = Self::new();
        let len = bytes.len().min(MEMORY_SIZE);
        mem.data[..len].copy_from_slice(&bytes[..len]);
        mem
    }

    /// Returns the raw memory contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u8) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u8, value: u8) {
        self.data[addr as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        assert_eq!(mem.read(0x00), 0x00);
        assert_eq!(mem.read(0xFF), 0x00);

        mem.write(0x34, 0x42);
        assert_eq!(mem.read(0x34), 0x42);

        // Neighbours untouched
        assert_eq!(mem.read(0x33), 0x00);
        assert_eq!(mem.read(0x35), 0x00);
    }

    #[test]
    fn test_flat_memory_with_contents() {
        let mem = FlatMemory::with_contents(&[1, 2, 3]);
        assert_eq!(mem.read(0), 1);
        assert_eq!(mem.read(2), 3);
        assert_eq!(mem.read(3), 0);

        let oversized = vec![0xAA; 300];
        let mem = FlatMemory::with_contents(&oversized);
        assert_eq!(mem.read(0xFF), 0xAA);
        assert_eq!(mem.as_slice().len(), MEMORY_SIZE);
    }
}
