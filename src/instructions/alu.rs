//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic, logical and comparison operations:
//! - ADD, SUB, MUL: modulo-256 arithmetic on two registers
//! - DIV, MOD: integer division; a zero divisor halts the machine
//! - INC, DEC: modulo-256 increment/decrement of one register
//! - AND, OR, XOR, NOT: bitwise operations
//! - CMP: sets exactly one of the L, G, E flags
//!
//! Only CMP touches the flags register.

use std::cmp::Ordering;

use crate::cpu::{FLAG_E, FLAG_G, FLAG_L};
use crate::{AluOp, ExecutionError, MemoryBus, Opcode, OutputSink, CPU};

/// Executes an ALU operation on registers `reg_a` and `reg_b`.
///
/// The result is written to `reg_a`. For unary operations (INC, DEC, NOT)
/// `reg_b` is ignored.
///
/// # Errors
///
/// DIV and MOD with `reg[reg_b] == 0` halt the CPU and return
/// `ExecutionError::DivisionByZero`; `reg_a` is left unchanged.
pub(crate) fn execute_alu<M: MemoryBus, O: OutputSink>(
    cpu: &mut CPU<M, O>,
    op: AluOp,
    reg_a: u8,
    reg_b: u8,
) -> Result<(), ExecutionError> {
    let a = cpu.reg(reg_a);
    let b = cpu.reg(reg_b);

    let result = match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Div | AluOp::Mod => {
            if b == 0 {
                return Err(division_by_zero(cpu, op));
            }
            if op == AluOp::Div {
                a / b
            } else {
                a % b
            }
        }
        AluOp::Inc => a.wrapping_add(1),
        AluOp::Dec => a.wrapping_sub(1),
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Not => !a,
        AluOp::Cmp => {
            cpu.fl = compare(a, b);
            return Ok(());
        }
    };

    cpu.set_reg(reg_a, result);

    Ok(())
}

/// Returns the flags value for comparing `a` against `b`.
fn compare(a: u8, b: u8) -> u8 {
    match a.cmp(&b) {
        Ordering::Less => FLAG_L,
        Ordering::Greater => FLAG_G,
        Ordering::Equal => FLAG_E,
    }
}

/// Halts the CPU and builds the diagnostic for a zero divisor.
fn division_by_zero<M: MemoryBus, O: OutputSink>(cpu: &mut CPU<M, O>, op: AluOp) -> ExecutionError {
    let opcode = if op == AluOp::Div {
        Opcode::Div
    } else {
        Opcode::Mod
    };

    cpu.halted = true;
    log::error!("{} by zero at 0x{:02X}, halting", opcode, cpu.pc);

    ExecutionError::DivisionByZero {
        opcode,
        address: cpu.pc,
    }
}
