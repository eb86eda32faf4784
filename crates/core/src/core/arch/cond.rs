//! Condition codes and branch condition tests.
//!
//! A compare instruction folds every ordering relation between its two
//! operands into one flag word: equality, the signed order, and the
//! unsigned order are all recorded at once. A conditional branch then
//! tests the flag word against a per-condition mask and is taken when any
//! selected flag is set. Signed and unsigned comparisons of the same bit
//! pattern can disagree (`0xFFFF_FFFF` is below `1` signed and above it
//! unsigned), which is why both orders are kept.

use crate::isa::instruction::BranchCond;

/// Flag bit: operands compared equal.
pub const CC_EQ: u32 = 0x1;

/// Flag bit: first operand was less than the second, signed.
pub const CC_LT: u32 = 0x2;

/// Flag bit: first operand was greater than the second, signed.
pub const CC_GT: u32 = 0x4;

/// Flag bit: first operand was less than the second, unsigned.
pub const CC_LTU: u32 = 0x8;

/// Flag bit: first operand was greater than the second, unsigned.
pub const CC_GTU: u32 = 0x10;

/// Per-condition flag masks, indexed by [`BranchCond::index`].
///
/// The not-equal mask is the bitwise complement of [`CC_EQ`]: any flag a
/// compare can set besides equality satisfies it. Compound conditions
/// (`>=`, `<=`) accept the strict flag or equality.
const BRANCH_MASKS: [u32; 10] = [
    CC_EQ,
    !CC_EQ,
    CC_LT,
    CC_GT,
    CC_LTU,
    CC_GTU,
    CC_GT | CC_EQ,
    CC_LT | CC_EQ,
    CC_GTU | CC_EQ,
    CC_LTU | CC_EQ,
];

/// Compares two register values and returns the resulting flag word.
///
/// Exactly one of equal / less / greater holds per ordering, so the
/// result always has the equality flag alone, or one signed and one
/// unsigned flag set.
#[must_use]
pub fn compare(a: u32, b: u32) -> u32 {
    let mut cc = 0;
    if a == b {
        cc |= CC_EQ;
    }
    if (a as i32) < (b as i32) {
        cc |= CC_LT;
    }
    if (a as i32) > (b as i32) {
        cc |= CC_GT;
    }
    if a < b {
        cc |= CC_LTU;
    }
    if a > b {
        cc |= CC_GTU;
    }
    cc
}

/// Tests whether a branch condition is satisfied by a flag word.
#[must_use]
pub const fn is_taken(cc: u32, cond: BranchCond) -> bool {
    cc & BRANCH_MASKS[cond.index()] != 0
}
