//! # LS-8 Instruction Implementations
//!
//! This module contains the implementations of all LS-8 instructions, organized by category.
//! Each handler takes a mutable reference to the CPU and the raw operand bytes.
//!
//! Handlers for instructions that set PC themselves (see [`Opcode::sets_pc`])
//! must always leave PC at its final value; every other handler leaves PC alone
//! and the CPU applies the generic advance.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic, logic and comparison (ADD, SUB, MUL, DIV, MOD, INC, DEC, CMP, AND, OR, XOR, NOT)
//! - **load_store**: Register and memory moves (LDI, LD, ST)
//! - **stack**: Stack operations (PUSH, POP)
//! - **control**: Control flow (JMP, JEQ, JNE, JGT, JLT, CALL, RET, HLT, NOP)
//! - **io**: Console output (PRN, PRA)
//! - **interrupts**: Interrupt raise, entry and return (INT, IRET)

pub(crate) mod alu;
pub(crate) mod control;
pub(crate) mod interrupts;
pub(crate) mod io;
pub(crate) mod load_store;
pub(crate) mod stack;

use crate::{ExecutionError, MemoryBus, Opcode, OutputSink, CPU};

/// Dispatches one decoded instruction to its handler.
pub(crate) fn execute<M: MemoryBus, O: OutputSink>(
    cpu: &mut CPU<M, O>,
    opcode: Opcode,
    operand_a: u8,
    operand_b: u8,
) -> Result<(), ExecutionError> {
    if let Some(op) = opcode.alu_op() {
        return alu::execute_alu(cpu, op, operand_a, operand_b);
    }

    match opcode {
        Opcode::Ldi => load_store::execute_ldi(cpu, operand_a, operand_b),
        Opcode::Ld => load_store::execute_ld(cpu, operand_a, operand_b),
        Opcode::St => load_store::execute_st(cpu, operand_a, operand_b),

        Opcode::Push => stack::execute_push(cpu, operand_a),
        Opcode::Pop => stack::execute_pop(cpu, operand_a),

        Opcode::Jmp => control::execute_jmp(cpu, operand_a),
        Opcode::Jeq | Opcode::Jne | Opcode::Jgt | Opcode::Jlt => {
            control::execute_conditional_jump(cpu, opcode, operand_a)
        }
        Opcode::Call => control::execute_call(cpu, operand_a),
        Opcode::Ret => control::execute_ret(cpu),
        Opcode::Hlt => control::execute_hlt(cpu),
        Opcode::Nop => {}

        Opcode::Prn => io::execute_prn(cpu, operand_a),
        Opcode::Pra => io::execute_pra(cpu, operand_a),

        Opcode::Int => interrupts::execute_int(cpu, operand_a),
        Opcode::Iret => interrupts::execute_iret(cpu),

        // Routed to the ALU above
        Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::Div
        | Opcode::Mod
        | Opcode::Inc
        | Opcode::Dec
        | Opcode::Cmp
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Not => unreachable!("ALU opcode {} not routed to ALU", opcode),
    }

    Ok(())
}
