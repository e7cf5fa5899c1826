//! Tests for the ALU instructions executed through the instruction cycle.
//!
//! Tests cover:
//! - Modulo-256 arithmetic (ADD, SUB, MUL, INC, DEC)
//! - Integer division and modulo, including the divide-by-zero halt
//! - Bitwise operations (AND, OR, XOR, NOT)
//! - CMP flag results
//! - PC advancement by instruction size

use ls8::{ExecutionError, FlatMemory, Opcode, Output, CPU, FLAG_E, FLAG_G, FLAG_L};

/// Helper: CPU with R0 = a, R1 = b and `program` at address 0
fn setup_cpu(a: u8, b: u8, program: &[u8]) -> CPU<FlatMemory, Vec<Output>> {
    let mut cpu = CPU::new(FlatMemory::with_contents(program), Vec::<Output>::new());
    cpu.set_register(0, a);
    cpu.set_register(1, b);
    cpu
}

/// Runs a single two-register ALU instruction on R0, R1 and returns R0.
fn binary_op(op: Opcode, a: u8, b: u8) -> u8 {
    let mut cpu = setup_cpu(a, b, &[op.byte(), 0, 1]);
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 3, "{} should advance PC by 3", op);
    cpu.register(0)
}

/// Runs a single one-register ALU instruction on R0 and returns R0.
fn unary_op(op: Opcode, a: u8) -> u8 {
    let mut cpu = setup_cpu(a, 0, &[op.byte(), 0]);
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 2, "{} should advance PC by 2", op);
    cpu.register(0)
}

// ========== Arithmetic ==========

#[test]
fn test_add() {
    assert_eq!(binary_op(Opcode::Add, 2, 3), 5);
    assert_eq!(binary_op(Opcode::Add, 255, 1), 0);
    assert_eq!(binary_op(Opcode::Add, 200, 100), 44);
}

#[test]
fn test_sub() {
    assert_eq!(binary_op(Opcode::Sub, 9, 4), 5);
    assert_eq!(binary_op(Opcode::Sub, 0, 1), 255);
}

#[test]
fn test_mul() {
    assert_eq!(binary_op(Opcode::Mul, 8, 9), 72);
    assert_eq!(binary_op(Opcode::Mul, 128, 2), 0);
}

#[test]
fn test_div_and_mod() {
    assert_eq!(binary_op(Opcode::Div, 72, 9), 8);
    assert_eq!(binary_op(Opcode::Div, 7, 2), 3);
    assert_eq!(binary_op(Opcode::Mod, 7, 2), 1);
    assert_eq!(binary_op(Opcode::Mod, 255, 16), 15);
}

#[test]
fn test_inc_dec() {
    assert_eq!(unary_op(Opcode::Inc, 41), 42);
    assert_eq!(unary_op(Opcode::Inc, 255), 0);
    assert_eq!(unary_op(Opcode::Dec, 1), 0);
    assert_eq!(unary_op(Opcode::Dec, 0), 255);
}

#[test]
fn test_same_register_operands() {
    // ADD R0,R0 doubles R0
    assert_eq!(binary_op(Opcode::Add, 0, 0), 0);
    let mut cpu = setup_cpu(21, 0, &[Opcode::Add.byte(), 0, 0]);
    cpu.step().unwrap();
    assert_eq!(cpu.register(0), 42);
}

// ========== Division by Zero ==========

#[test]
fn test_div_by_zero_halts_without_writing() {
    let mut cpu = setup_cpu(10, 0, &[0, Opcode::Div.byte(), 0, 1]);
    cpu.step().unwrap(); // NOP

    let err = cpu.step().unwrap_err();

    assert_eq!(
        err,
        ExecutionError::DivisionByZero {
            opcode: Opcode::Div,
            address: 1
        }
    );
    assert_eq!(err.to_string(), "DIV by zero at address 0x01");
    assert!(cpu.is_halted());
    assert_eq!(cpu.register(0), 10, "destination must be untouched");
}

#[test]
fn test_mod_by_zero_halts() {
    let mut cpu = setup_cpu(10, 0, &[Opcode::Mod.byte(), 0, 1, 0b0000_0001]);

    assert!(matches!(
        cpu.run(),
        Err(ExecutionError::DivisionByZero {
            opcode: Opcode::Mod,
            ..
        })
    ));
    assert!(cpu.is_halted());
    assert_eq!(cpu.register(0), 10);

    // Further steps are inert
    let pc = cpu.pc();
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), pc);
}

// ========== Bitwise ==========

#[test]
fn test_bitwise() {
    assert_eq!(binary_op(Opcode::And, 0b1100_1100, 0b1010_1010), 0b1000_1000);
    assert_eq!(binary_op(Opcode::Or, 0b1100_1100, 0b1010_1010), 0b1110_1110);
    assert_eq!(binary_op(Opcode::Xor, 0b1100_1100, 0b1010_1010), 0b0110_0110);
    assert_eq!(unary_op(Opcode::Not, 0b1100_1100), 0b0011_0011);
}

// ========== CMP ==========

fn compare(a: u8, b: u8) -> CPU<FlatMemory, Vec<Output>> {
    let mut cpu = setup_cpu(a, b, &[Opcode::Cmp.byte(), 0, 1]);
    cpu.step().unwrap();
    cpu
}

#[test]
fn test_cmp_equal() {
    let cpu = compare(42, 42);
    assert_eq!(cpu.fl(), FLAG_E);
    assert!(cpu.flag_e() && !cpu.flag_g() && !cpu.flag_l());
}

#[test]
fn test_cmp_greater() {
    let cpu = compare(43, 42);
    assert_eq!(cpu.fl(), FLAG_G);
}

#[test]
fn test_cmp_less() {
    let cpu = compare(0, 255);
    assert_eq!(cpu.fl(), FLAG_L);
}

#[test]
fn test_cmp_replaces_previous_flags() {
    let mut cpu = setup_cpu(1, 2, &[Opcode::Cmp.byte(), 0, 1, Opcode::Cmp.byte(), 1, 0]);
    cpu.step().unwrap();
    assert_eq!(cpu.fl(), FLAG_L);
    cpu.step().unwrap();
    assert_eq!(cpu.fl(), FLAG_G);
}

#[test]
fn test_cmp_does_not_modify_registers() {
    let cpu = compare(7, 9);
    assert_eq!(cpu.register(0), 7);
    assert_eq!(cpu.register(1), 9);
}

#[test]
fn test_arithmetic_leaves_flags() {
    let mut cpu = setup_cpu(5, 5, &[Opcode::Cmp.byte(), 0, 1, Opcode::Sub.byte(), 0, 1]);
    cpu.run_for_cycles(2).unwrap();
    assert_eq!(cpu.register(0), 0);
    assert_eq!(cpu.fl(), FLAG_E);
}
