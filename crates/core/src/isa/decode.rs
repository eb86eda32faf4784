//! Instruction-word decoder.
//!
//! This module classifies a 16-bit instruction word into one of the three
//! encoding forms and extracts its operand fields into a structured
//! [`Instruction`] record. Undefined encodings — unassigned form-1 opcodes
//! and form-3 condition indices above 9 — decode to
//! [`Fault::IllegalInstruction`] so the engine never dispatches on them.

use crate::common::fault::Fault;
use crate::isa::instruction::{BranchCond, Instruction, Opcode, SubOp};

/// Total width of an instruction word in bits.
const WORD_WIDTH: u32 = 16;

/// Bit shift isolating the form discriminator (bits 15-14).
///
/// Form 1 has bit 15 clear (`0b00` or `0b01`), form 2 is `0b10`, and
/// form 3 is `0b11`.
const FORM_SHIFT: u32 = 14;

/// Discriminator value for form 2.
const FORM_2: u16 = 0b10;

/// Discriminator value for form 3.
const FORM_3: u16 = 0b11;

/// Bit shift for the form-1 opcode field (bits 15-8).
///
/// Form 1 layout: `0ooooooo aaaabbbb` — an 8-bit opcode followed by two
/// 4-bit register fields.
const OPCODE_SHIFT: u32 = 8;

/// Bit shift for the form-1 `a` register field (bits 7-4).
const REG_A_SHIFT: u32 = 4;

/// Bit mask for a 4-bit register field.
const REG_MASK: u16 = 0xF;

/// Bit shift for the form-2 sub-opcode field (bits 13-12).
///
/// Form 2 layout: `10ssrrrr iiiiiiii` — a 2-bit sub-opcode, one 4-bit
/// register field, and an 8-bit immediate.
const SUBOP_SHIFT: u32 = 12;

/// Bit mask for the 2-bit sub-opcode field.
const SUBOP_MASK: u16 = 0x3;

/// Bit shift for the form-2 register field (bits 11-8).
const F2_REG_SHIFT: u32 = 8;

/// Bit mask for the form-2 immediate field (8 bits).
const IMM_MASK: u16 = 0xFF;

/// Bit shift for the form-3 condition field (bits 13-10).
///
/// Form 3 layout: `11ccccdd dddddddd` — a 4-bit condition index and a
/// signed 10-bit displacement counted in instruction words.
const COND_SHIFT: u32 = 10;

/// Bit mask for the 4-bit condition field.
const COND_MASK: u16 = 0xF;

/// Bit mask for the 10-bit displacement field.
const DISP_MASK: u16 = 0x3FF;

/// Total number of bits in the displacement field (sign-extended).
const DISP_BITS: u32 = 10;

/// Decodes an instruction word into its tagged record.
///
/// # Errors
///
/// Returns [`Fault::IllegalInstruction`] for any encoding the
/// architecture leaves undefined.
pub fn decode(word: u16) -> Result<Instruction, Fault> {
    match word >> FORM_SHIFT {
        FORM_2 => decode_form_2(word),
        FORM_3 => decode_form_3(word),
        _ => decode_form_1(word),
    }
}

/// Decodes a form-1 word: opcode plus two register fields.
fn decode_form_1(word: u16) -> Result<Instruction, Fault> {
    let Some(op) = Opcode::from_byte((word >> OPCODE_SHIFT) as u8) else {
        return Err(Fault::IllegalInstruction);
    };
    Ok(Instruction::Op {
        op,
        a: usize::from((word >> REG_A_SHIFT) & REG_MASK),
        b: usize::from(word & REG_MASK),
    })
}

/// Decodes a form-2 word: sub-opcode, register field, 8-bit immediate.
fn decode_form_2(word: u16) -> Result<Instruction, Fault> {
    let Some(op) = SubOp::from_bits((word >> SUBOP_SHIFT) & SUBOP_MASK) else {
        return Err(Fault::IllegalInstruction);
    };
    Ok(Instruction::Imm {
        op,
        reg: usize::from((word >> F2_REG_SHIFT) & REG_MASK),
        imm: (word & IMM_MASK) as u8,
    })
}

/// Decodes a form-3 word: condition index plus scaled displacement.
fn decode_form_3(word: u16) -> Result<Instruction, Fault> {
    let Some(cond) = BranchCond::from_index((word >> COND_SHIFT) & COND_MASK) else {
        return Err(Fault::IllegalInstruction);
    };
    Ok(Instruction::Branch {
        cond,
        disp: decode_branch_disp(word),
    })
}

/// Extracts the branch displacement as a byte offset.
///
/// The encoded field counts instruction words, so the sign-extended value
/// is scaled by two.
fn decode_branch_disp(word: u16) -> i32 {
    i32::from(sign_extend(word & DISP_MASK, DISP_BITS)) << 1
}

/// Sign extends a value of `bits` width to a 16-bit signed integer.
fn sign_extend(val: u16, bits: u32) -> i16 {
    let shift = WORD_WIDTH - bits;
    ((val as i16) << shift) >> shift
}
