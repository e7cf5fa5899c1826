//! # Opcode Table
//!
//! This module contains the closed set of LS-8 v2 instruction identities and the
//! static metadata each one carries.
//!
//! The high bits of every instruction byte encode its shape:
//!
//! ```text
//! AABxxxxx
//! ||+------ 1 if the instruction is executed by the ALU
//! ++------- number of operand bytes following the opcode
//! ```
//!
//! The shape alone does not identify an instruction, so dispatch is keyed on
//! the full byte via [`Opcode::from_byte`].

/// An LS-8 instruction identity.
///
/// The discriminant of each variant is its machine encoding.
///
/// # Examples
///
/// ```
/// use ls8::Opcode;
///
/// let ldi = Opcode::from_byte(0b1001_1001).unwrap();
/// assert_eq!(ldi, Opcode::Ldi);
/// assert_eq!(ldi.mnemonic(), "LDI");
/// assert_eq!(ldi.arg_count(), 2);
/// assert!(!ldi.is_alu());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Nop = 0b0000_0000,
    Hlt = 0b0000_0001,
    Ret = 0b0000_1001,
    Iret = 0b0000_1011,
    Pra = 0b0100_0010,
    Prn = 0b0100_0011,
    Call = 0b0100_1000,
    Int = 0b0100_1010,
    Pop = 0b0100_1100,
    Push = 0b0100_1101,
    Jmp = 0b0101_0000,
    Jeq = 0b0101_0001,
    Jne = 0b0101_0010,
    Jlt = 0b0101_0011,
    Jgt = 0b0101_0100,
    Not = 0b0111_0000,
    Inc = 0b0111_1000,
    Dec = 0b0111_1001,
    Ld = 0b1001_1000,
    Ldi = 0b1001_1001,
    St = 0b1001_1010,
    Cmp = 0b1010_0000,
    Add = 0b1010_1000,
    Sub = 0b1010_1001,
    Mul = 0b1010_1010,
    Div = 0b1010_1011,
    Mod = 0b1010_1100,
    Or = 0b1011_0001,
    Xor = 0b1011_0010,
    And = 0b1011_0011,
}

/// Operations executed by the ALU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,
    Cmp,
    And,
    Or,
    Xor,
    Not,
}

impl Opcode {
    /// Every defined opcode, ordered by encoding.
    pub const ALL: [Opcode; 30] = [
        Opcode::Nop,
        Opcode::Hlt,
        Opcode::Ret,
        Opcode::Iret,
        Opcode::Pra,
        Opcode::Prn,
        Opcode::Call,
        Opcode::Int,
        Opcode::Pop,
        Opcode::Push,
        Opcode::Jmp,
        Opcode::Jeq,
        Opcode::Jne,
        Opcode::Jlt,
        Opcode::Jgt,
        Opcode::Not,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Ld,
        Opcode::Ldi,
        Opcode::St,
        Opcode::Cmp,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::Or,
        Opcode::Xor,
        Opcode::And,
    ];

    /// Looks up the instruction identity of a raw byte.
    ///
    /// Returns `None` for bytes that do not encode a defined instruction.
    pub const fn from_byte(byte: u8) -> Option<Opcode> {
        let op = match byte {
            0b0000_0000 => Opcode::Nop,
            0b0000_0001 => Opcode::Hlt,
            0b0000_1001 => Opcode::Ret,
            0b0000_1011 => Opcode::Iret,
            0b0100_0010 => Opcode::Pra,
            0b0100_0011 => Opcode::Prn,
            0b0100_1000 => Opcode::Call,
            0b0100_1010 => Opcode::Int,
            0b0100_1100 => Opcode::Pop,
            0b0100_1101 => Opcode::Push,
            0b0101_0000 => Opcode::Jmp,
            0b0101_0001 => Opcode::Jeq,
            0b0101_0010 => Opcode::Jne,
            0b0101_0011 => Opcode::Jlt,
            0b0101_0100 => Opcode::Jgt,
            0b0111_0000 => Opcode::Not,
            0b0111_1000 => Opcode::Inc,
            0b0111_1001 => Opcode::Dec,
            0b1001_1000 => Opcode::Ld,
            0b1001_1001 => Opcode::Ldi,
            0b1001_1010 => Opcode::St,
            0b1010_0000 => Opcode::Cmp,
            0b1010_1000 => Opcode::Add,
            0b1010_1001 => Opcode::Sub,
            0b1010_1010 => Opcode::Mul,
            0b1010_1011 => Opcode::Div,
            0b1010_1100 => Opcode::Mod,
            0b1011_0001 => Opcode::Or,
            0b1011_0010 => Opcode::Xor,
            0b1011_0011 => Opcode::And,
            _ => return None,
        };
        Some(op)
    }

    /// Looks up an opcode by its assembly mnemonic (case-insensitive).
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(mnemonic))
    }

    /// Returns the machine encoding of this opcode.
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Returns the assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Hlt => "HLT",
            Opcode::Ret => "RET",
            Opcode::Iret => "IRET",
            Opcode::Pra => "PRA",
            Opcode::Prn => "PRN",
            Opcode::Call => "CALL",
            Opcode::Int => "INT",
            Opcode::Pop => "POP",
            Opcode::Push => "PUSH",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
            Opcode::Jlt => "JLT",
            Opcode::Jgt => "JGT",
            Opcode::Not => "NOT",
            Opcode::Inc => "INC",
            Opcode::Dec => "DEC",
            Opcode::Ld => "LD",
            Opcode::Ldi => "LDI",
            Opcode::St => "ST",
            Opcode::Cmp => "CMP",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::And => "AND",
        }
    }

    /// Number of operand bytes following the opcode (0-2).
    pub const fn arg_count(self) -> u8 {
        self.byte() >> 6
    }

    /// Total instruction size in bytes (opcode + operands).
    pub const fn size_bytes(self) -> u8 {
        self.arg_count() + 1
    }

    /// Whether the instruction is executed by the ALU.
    pub const fn is_alu(self) -> bool {
        (self.byte() >> 5) & 1 == 1
    }

    /// Whether the instruction writes the flags register.
    pub const fn sets_flags(self) -> bool {
        matches!(self, Opcode::Cmp)
    }

    /// Whether the instruction sets PC itself instead of taking the generic
    /// `PC += 1 + arg_count` advance.
    ///
    /// Conditional jumps are included; when not taken they advance PC
    /// explicitly.
    pub const fn sets_pc(self) -> bool {
        matches!(
            self,
            Opcode::Jmp
                | Opcode::Jeq
                | Opcode::Jne
                | Opcode::Jgt
                | Opcode::Jlt
                | Opcode::Call
                | Opcode::Ret
                | Opcode::Iret
        )
    }

    /// Returns the ALU operation for ALU opcodes.
    pub const fn alu_op(self) -> Option<AluOp> {
        let op = match self {
            Opcode::Add => AluOp::Add,
            Opcode::Sub => AluOp::Sub,
            Opcode::Mul => AluOp::Mul,
            Opcode::Div => AluOp::Div,
            Opcode::Mod => AluOp::Mod,
            Opcode::Inc => AluOp::Inc,
            Opcode::Dec => AluOp::Dec,
            Opcode::Cmp => AluOp::Cmp,
            Opcode::And => AluOp::And,
            Opcode::Or => AluOp::Or,
            Opcode::Xor => AluOp::Xor,
            Opcode::Not => AluOp::Not,
            _ => return None,
        };
        Some(op)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
