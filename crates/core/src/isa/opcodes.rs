//! Opcode values.
//!
//! Form-1 opcodes occupy the top byte of the instruction word (the top bit
//! is zero, so the opcode space is `0x00..=0x7f`; the architecture defines
//! `0x01..=0x39` minus a reserved hole at `0x16..=0x18`). Form-2
//! sub-opcodes occupy bits 13–12.

/// `ldi.l` — load 32-bit immediate.
pub const OP_LDI_L: u8 = 0x01;
/// `mov` — register-to-register move.
pub const OP_MOV: u8 = 0x02;
/// `jsra` — call subroutine at an absolute 32-bit target.
pub const OP_JSRA: u8 = 0x03;
/// `ret` — return from subroutine.
pub const OP_RET: u8 = 0x04;
/// `add` — 32-bit wrapping add.
pub const OP_ADD: u8 = 0x05;
/// `push` — decrement pointer register, store word.
pub const OP_PUSH: u8 = 0x06;
/// `pop` — load word, increment pointer register.
pub const OP_POP: u8 = 0x07;
/// `lda.l` — load word from an absolute address.
pub const OP_LDA_L: u8 = 0x08;
/// `sta.l` — store word to an absolute address.
pub const OP_STA_L: u8 = 0x09;
/// `ld.l` — register-indirect load word.
pub const OP_LD_L: u8 = 0x0a;
/// `st.l` — register-indirect store word.
pub const OP_ST_L: u8 = 0x0b;
/// `ldo.l` — load word at base register + 16-bit offset.
pub const OP_LDO_L: u8 = 0x0c;
/// `sto.l` — store word at base register + 16-bit offset.
pub const OP_STO_L: u8 = 0x0d;
/// `cmp` — compare, setting the condition-code register.
pub const OP_CMP: u8 = 0x0e;
/// `nop` — no operation.
pub const OP_NOP: u8 = 0x0f;
/// `sex.b` — sign-extend byte.
pub const OP_SEX_B: u8 = 0x10;
/// `sex.s` — sign-extend halfword.
pub const OP_SEX_S: u8 = 0x11;
/// `zex.b` — zero-extend byte.
pub const OP_ZEX_B: u8 = 0x12;
/// `zex.s` — zero-extend halfword.
pub const OP_ZEX_S: u8 = 0x13;
/// `umul.x` — unsigned widening multiply, keep the high word.
pub const OP_UMUL_X: u8 = 0x14;
/// `mul.x` — signed widening multiply, keep the high word.
pub const OP_MUL_X: u8 = 0x15;
/// `jsr` — call subroutine at a register target.
pub const OP_JSR: u8 = 0x19;
/// `jmpa` — jump to an absolute 32-bit target.
pub const OP_JMPA: u8 = 0x1a;
/// `ldi.b` — load immediate, byte mnemonic (engine consumes a full word).
pub const OP_LDI_B: u8 = 0x1b;
/// `ld.b` — register-indirect load byte.
pub const OP_LD_B: u8 = 0x1c;
/// `lda.b` — load byte from an absolute address.
pub const OP_LDA_B: u8 = 0x1d;
/// `st.b` — register-indirect store byte.
pub const OP_ST_B: u8 = 0x1e;
/// `sta.b` — store byte to an absolute address.
pub const OP_STA_B: u8 = 0x1f;
/// `ldi.s` — load immediate, halfword mnemonic (engine consumes a word).
pub const OP_LDI_S: u8 = 0x20;
/// `ld.s` — register-indirect load halfword.
pub const OP_LD_S: u8 = 0x21;
/// `lda.s` — load halfword from an absolute address.
pub const OP_LDA_S: u8 = 0x22;
/// `st.s` — register-indirect store halfword.
pub const OP_ST_S: u8 = 0x23;
/// `sta.s` — store halfword to an absolute address.
pub const OP_STA_S: u8 = 0x24;
/// `jmp` — jump to a register target.
pub const OP_JMP: u8 = 0x25;
/// `and` — bitwise and.
pub const OP_AND: u8 = 0x26;
/// `lshr` — logical shift right.
pub const OP_LSHR: u8 = 0x27;
/// `ashl` — shift left.
pub const OP_ASHL: u8 = 0x28;
/// `sub` — 32-bit wrapping subtract.
pub const OP_SUB: u8 = 0x29;
/// `neg` — two's-complement negate.
pub const OP_NEG: u8 = 0x2a;
/// `or` — bitwise or.
pub const OP_OR: u8 = 0x2b;
/// `not` — bitwise complement.
pub const OP_NOT: u8 = 0x2c;
/// `ashr` — arithmetic shift right.
pub const OP_ASHR: u8 = 0x2d;
/// `xor` — bitwise exclusive or.
pub const OP_XOR: u8 = 0x2e;
/// `mul` — 32-bit wrapping multiply.
pub const OP_MUL: u8 = 0x2f;
/// `swi` — software interrupt with a 32-bit interrupt number.
pub const OP_SWI: u8 = 0x30;
/// `div` — signed divide.
pub const OP_DIV: u8 = 0x31;
/// `udiv` — unsigned divide.
pub const OP_UDIV: u8 = 0x32;
/// `mod` — signed remainder.
pub const OP_MOD: u8 = 0x33;
/// `umod` — unsigned remainder.
pub const OP_UMOD: u8 = 0x34;
/// `brk` — breakpoint trap.
pub const OP_BRK: u8 = 0x35;
/// `ldo.b` — load byte at base register + 16-bit offset.
pub const OP_LDO_B: u8 = 0x36;
/// `sto.b` — store byte at base register + 16-bit offset.
pub const OP_STO_B: u8 = 0x37;
/// `ldo.s` — load halfword at base register + 16-bit offset.
pub const OP_LDO_S: u8 = 0x38;
/// `sto.s` — store halfword at base register + 16-bit offset.
pub const OP_STO_S: u8 = 0x39;

/// Form-2 sub-opcode: `inc` — add an 8-bit immediate to a register.
pub const SUBOP_INC: u16 = 0x0;
/// Form-2 sub-opcode: `dec` — subtract an 8-bit immediate from a register.
pub const SUBOP_DEC: u16 = 0x1;
/// Form-2 sub-opcode: `gsr` — read a special register.
pub const SUBOP_GSR: u16 = 0x2;
/// Form-2 sub-opcode: `ssr` — write a special register.
pub const SUBOP_SSR: u16 = 0x3;
