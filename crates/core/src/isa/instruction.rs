//! The tagged instruction record produced by the decoder.
//!
//! [`Instruction`] is what the engine dispatches on: one variant per form,
//! carrying the already-extracted operand fields. Undefined encodings never
//! reach it — [`Opcode::from_byte`], [`SubOp::from_bits`], and
//! [`BranchCond::from_index`] reject them during decode, so the dispatch
//! match is exhaustive over *defined* operations only.

use crate::isa::opcodes as op;

/// A form-1 operation (the defined part of the 8-bit opcode space).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Load 32-bit immediate.
    LdiL,
    /// Register-to-register move.
    Mov,
    /// Call subroutine at an absolute 32-bit target.
    Jsra,
    /// Return from subroutine.
    Ret,
    /// Wrapping add.
    Add,
    /// Decrement pointer register, store word.
    Push,
    /// Load word, increment pointer register.
    Pop,
    /// Load word from an absolute address.
    LdaL,
    /// Store word to an absolute address.
    StaL,
    /// Register-indirect load word.
    LdL,
    /// Register-indirect store word.
    StL,
    /// Load word at base + offset.
    LdoL,
    /// Store word at base + offset.
    StoL,
    /// Compare two registers into the condition codes.
    Cmp,
    /// No operation.
    Nop,
    /// Sign-extend byte.
    SexB,
    /// Sign-extend halfword.
    SexS,
    /// Zero-extend byte.
    ZexB,
    /// Zero-extend halfword.
    ZexS,
    /// Unsigned widening multiply, high word.
    UmulX,
    /// Signed widening multiply, high word.
    MulX,
    /// Call subroutine at a register target.
    Jsr,
    /// Jump to an absolute 32-bit target.
    Jmpa,
    /// Load immediate (byte mnemonic; consumes a full word).
    LdiB,
    /// Register-indirect load byte.
    LdB,
    /// Load byte from an absolute address.
    LdaB,
    /// Register-indirect store byte.
    StB,
    /// Store byte to an absolute address.
    StaB,
    /// Load immediate (halfword mnemonic; consumes a full word).
    LdiS,
    /// Register-indirect load halfword.
    LdS,
    /// Load halfword from an absolute address.
    LdaS,
    /// Register-indirect store halfword.
    StS,
    /// Store halfword to an absolute address.
    StaS,
    /// Jump to a register target.
    Jmp,
    /// Bitwise and.
    And,
    /// Logical shift right.
    Lshr,
    /// Shift left.
    Ashl,
    /// Wrapping subtract.
    Sub,
    /// Two's-complement negate.
    Neg,
    /// Bitwise or.
    Or,
    /// Bitwise complement.
    Not,
    /// Arithmetic shift right.
    Ashr,
    /// Bitwise exclusive or.
    Xor,
    /// Wrapping multiply.
    Mul,
    /// Software interrupt.
    Swi,
    /// Signed divide.
    Div,
    /// Unsigned divide.
    Udiv,
    /// Signed remainder.
    Mod,
    /// Unsigned remainder.
    Umod,
    /// Breakpoint trap.
    Brk,
    /// Load byte at base + offset.
    LdoB,
    /// Store byte at base + offset.
    StoB,
    /// Load halfword at base + offset.
    LdoS,
    /// Store halfword at base + offset.
    StoS,
}

impl Opcode {
    /// Maps an opcode byte to its operation. `None` for the undefined
    /// encodings: `0x00`, the reserved `0x16..=0x18` block, and everything
    /// past `0x39`.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            op::OP_LDI_L => Self::LdiL,
            op::OP_MOV => Self::Mov,
            op::OP_JSRA => Self::Jsra,
            op::OP_RET => Self::Ret,
            op::OP_ADD => Self::Add,
            op::OP_PUSH => Self::Push,
            op::OP_POP => Self::Pop,
            op::OP_LDA_L => Self::LdaL,
            op::OP_STA_L => Self::StaL,
            op::OP_LD_L => Self::LdL,
            op::OP_ST_L => Self::StL,
            op::OP_LDO_L => Self::LdoL,
            op::OP_STO_L => Self::StoL,
            op::OP_CMP => Self::Cmp,
            op::OP_NOP => Self::Nop,
            op::OP_SEX_B => Self::SexB,
            op::OP_SEX_S => Self::SexS,
            op::OP_ZEX_B => Self::ZexB,
            op::OP_ZEX_S => Self::ZexS,
            op::OP_UMUL_X => Self::UmulX,
            op::OP_MUL_X => Self::MulX,
            op::OP_JSR => Self::Jsr,
            op::OP_JMPA => Self::Jmpa,
            op::OP_LDI_B => Self::LdiB,
            op::OP_LD_B => Self::LdB,
            op::OP_LDA_B => Self::LdaB,
            op::OP_ST_B => Self::StB,
            op::OP_STA_B => Self::StaB,
            op::OP_LDI_S => Self::LdiS,
            op::OP_LD_S => Self::LdS,
            op::OP_LDA_S => Self::LdaS,
            op::OP_ST_S => Self::StS,
            op::OP_STA_S => Self::StaS,
            op::OP_JMP => Self::Jmp,
            op::OP_AND => Self::And,
            op::OP_LSHR => Self::Lshr,
            op::OP_ASHL => Self::Ashl,
            op::OP_SUB => Self::Sub,
            op::OP_NEG => Self::Neg,
            op::OP_OR => Self::Or,
            op::OP_NOT => Self::Not,
            op::OP_ASHR => Self::Ashr,
            op::OP_XOR => Self::Xor,
            op::OP_MUL => Self::Mul,
            op::OP_SWI => Self::Swi,
            op::OP_DIV => Self::Div,
            op::OP_UDIV => Self::Udiv,
            op::OP_MOD => Self::Mod,
            op::OP_UMOD => Self::Umod,
            op::OP_BRK => Self::Brk,
            op::OP_LDO_B => Self::LdoB,
            op::OP_STO_B => Self::StoB,
            op::OP_LDO_S => Self::LdoS,
            op::OP_STO_S => Self::StoS,
            _ => return None,
        })
    }

    /// The assembler mnemonic, for trace output.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::LdiL => "ldi.l",
            Self::Mov => "mov",
            Self::Jsra => "jsra",
            Self::Ret => "ret",
            Self::Add => "add",
            Self::Push => "push",
            Self::Pop => "pop",
            Self::LdaL => "lda.l",
            Self::StaL => "sta.l",
            Self::LdL => "ld.l",
            Self::StL => "st.l",
            Self::LdoL => "ldo.l",
            Self::StoL => "sto.l",
            Self::Cmp => "cmp",
            Self::Nop => "nop",
            Self::SexB => "sex.b",
            Self::SexS => "sex.s",
            Self::ZexB => "zex.b",
            Self::ZexS => "zex.s",
            Self::UmulX => "umul.x",
            Self::MulX => "mul.x",
            Self::Jsr => "jsr",
            Self::Jmpa => "jmpa",
            Self::LdiB => "ldi.b",
            Self::LdB => "ld.b",
            Self::LdaB => "lda.b",
            Self::StB => "st.b",
            Self::StaB => "sta.b",
            Self::LdiS => "ldi.s",
            Self::LdS => "ld.s",
            Self::LdaS => "lda.s",
            Self::StS => "st.s",
            Self::StaS => "sta.s",
            Self::Jmp => "jmp",
            Self::And => "and",
            Self::Lshr => "lshr",
            Self::Ashl => "ashl",
            Self::Sub => "sub",
            Self::Neg => "neg",
            Self::Or => "or",
            Self::Not => "not",
            Self::Ashr => "ashr",
            Self::Xor => "xor",
            Self::Mul => "mul",
            Self::Swi => "swi",
            Self::Div => "div",
            Self::Udiv => "udiv",
            Self::Mod => "mod",
            Self::Umod => "umod",
            Self::Brk => "brk",
            Self::LdoB => "ldo.b",
            Self::StoB => "sto.b",
            Self::LdoS => "ldo.s",
            Self::StoS => "sto.s",
        }
    }
}

/// A form-2 operation (the 2-bit sub-opcode space).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubOp {
    /// Add the 8-bit immediate to the register.
    Inc,
    /// Subtract the 8-bit immediate from the register.
    Dec,
    /// Read special register `imm` into the register.
    Gsr,
    /// Write the register to special register `imm`.
    Ssr,
}

impl SubOp {
    /// Maps the 2-bit sub-opcode field. Any value outside the defined four
    /// is illegal (unreachable through a masked field, kept explicit).
    pub const fn from_bits(bits: u16) -> Option<Self> {
        Some(match bits {
            op::SUBOP_INC => Self::Inc,
            op::SUBOP_DEC => Self::Dec,
            op::SUBOP_GSR => Self::Gsr,
            op::SUBOP_SSR => Self::Ssr,
            _ => return None,
        })
    }

    /// The assembler mnemonic, for trace output.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Inc => "inc",
            Self::Dec => "dec",
            Self::Gsr => "gsr",
            Self::Ssr => "ssr",
        }
    }
}

/// One of the ten form-3 branch condition tests.
///
/// Declaration order matches the architectural condition index (bits
/// 13–10 of the instruction word), so [`BranchCond::index`] is a plain
/// cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchCond {
    /// Equal.
    Eq,
    /// Not equal (the complement-mask test; see
    /// [`cond`](crate::core::arch::cond)).
    Ne,
    /// Signed less-than.
    Lt,
    /// Signed greater-than.
    Gt,
    /// Unsigned less-than.
    Ltu,
    /// Unsigned greater-than.
    Gtu,
    /// Signed greater-or-equal.
    Ge,
    /// Signed less-or-equal.
    Le,
    /// Unsigned greater-or-equal.
    Geu,
    /// Unsigned less-or-equal.
    Leu,
}

impl BranchCond {
    /// Maps a condition index. Indices 10–15 are illegal encodings.
    pub const fn from_index(index: u16) -> Option<Self> {
        Some(match index {
            0 => Self::Eq,
            1 => Self::Ne,
            2 => Self::Lt,
            3 => Self::Gt,
            4 => Self::Ltu,
            5 => Self::Gtu,
            6 => Self::Ge,
            7 => Self::Le,
            8 => Self::Geu,
            9 => Self::Leu,
            _ => return None,
        })
    }

    /// The architectural condition index.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The assembler mnemonic, for trace output.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Eq => "beq",
            Self::Ne => "bne",
            Self::Lt => "blt",
            Self::Gt => "bgt",
            Self::Ltu => "bltu",
            Self::Gtu => "bgtu",
            Self::Ge => "bge",
            Self::Le => "ble",
            Self::Geu => "bgeu",
            Self::Leu => "bleu",
        }
    }
}

/// A decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Form 1: an operation and two 4-bit register fields.
    Op {
        /// The operation.
        op: Opcode,
        /// First register field (bits 7–4).
        a: usize,
        /// Second register field (bits 3–0).
        b: usize,
    },
    /// Form 2: a sub-operation, one register field, and an 8-bit
    /// immediate (which doubles as the special-register index).
    Imm {
        /// The sub-operation.
        op: SubOp,
        /// Register field (bits 11–8).
        reg: usize,
        /// Unsigned 8-bit immediate.
        imm: u8,
    },
    /// Form 3: a conditional branch.
    Branch {
        /// Condition test against the condition-code register.
        cond: BranchCond,
        /// Byte displacement (the 10-bit word displacement, sign-extended
        /// and scaled).
        disp: i32,
    },
}

impl Instruction {
    /// The mnemonic of the underlying operation, for trace output.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Op { op, .. } => op.mnemonic(),
            Self::Imm { op, .. } => op.mnemonic(),
            Self::Branch { cond, .. } => cond.mnemonic(),
        }
    }
}
