//! Condition-code truth table: compare flags and the ten branch tests.

use proptest::prelude::*;
use rstest::rstest;
use sbxsim_core::core::arch::cond::{self, CC_EQ, CC_GT, CC_GTU, CC_LT, CC_LTU};
use sbxsim_core::isa::instruction::BranchCond;

#[test]
fn equal_sets_only_the_equal_flag() {
    assert_eq!(cond::compare(5, 5), CC_EQ);
    assert_eq!(cond::compare(0, 0), CC_EQ);
    assert_eq!(cond::compare(0xFFFF_FFFF, 0xFFFF_FFFF), CC_EQ);
}

#[test]
fn signed_and_unsigned_orderings_disagree() {
    // -1 signed is below 1; 0xFFFF_FFFF unsigned is above it.
    assert_eq!(cond::compare(0xFFFF_FFFF, 1), CC_LT | CC_GTU);
    assert_eq!(cond::compare(1, 0xFFFF_FFFF), CC_GT | CC_LTU);
}

#[test]
fn agreeing_orderings_set_both_flags_the_same_way() {
    assert_eq!(cond::compare(1, 2), CC_LT | CC_LTU);
    assert_eq!(cond::compare(7, 3), CC_GT | CC_GTU);
}

// Truth table for compare(0xFFFF_FFFF, 1): signed-less, unsigned-greater.
#[rstest]
#[case(BranchCond::Eq, false)]
#[case(BranchCond::Ne, true)]
#[case(BranchCond::Lt, true)]
#[case(BranchCond::Gt, false)]
#[case(BranchCond::Ltu, false)]
#[case(BranchCond::Gtu, true)]
#[case(BranchCond::Ge, false)]
#[case(BranchCond::Le, true)]
#[case(BranchCond::Geu, true)]
#[case(BranchCond::Leu, false)]
fn mixed_ordering_branch_table(#[case] cond: BranchCond, #[case] taken: bool) {
    let cc = cond::compare(0xFFFF_FFFF, 1);
    assert_eq!(cond::is_taken(cc, cond), taken, "{}", cond.mnemonic());
}

// Truth table for equal operands: every -or-equal test is taken.
#[rstest]
#[case(BranchCond::Eq, true)]
#[case(BranchCond::Ne, false)]
#[case(BranchCond::Lt, false)]
#[case(BranchCond::Gt, false)]
#[case(BranchCond::Ltu, false)]
#[case(BranchCond::Gtu, false)]
#[case(BranchCond::Ge, true)]
#[case(BranchCond::Le, true)]
#[case(BranchCond::Geu, true)]
#[case(BranchCond::Leu, true)]
fn equal_operands_branch_table(#[case] cond: BranchCond, #[case] taken: bool) {
    let cc = cond::compare(42, 42);
    assert_eq!(cond::is_taken(cc, cond), taken, "{}", cond.mnemonic());
}

#[test]
fn not_equal_uses_the_complement_mask() {
    // The ne mask is the bitwise complement of the equal flag, so any
    // flag a compare can produce besides equality satisfies it.
    assert!(!cond::is_taken(CC_EQ, BranchCond::Ne));
    assert!(cond::is_taken(CC_LT | CC_GTU, BranchCond::Ne));
    assert!(cond::is_taken(CC_GT | CC_LTU, BranchCond::Ne));
}

proptest! {
    #[test]
    fn compare_matches_twos_complement_interpretation(a: u32, b: u32) {
        let cc = cond::compare(a, b);
        prop_assert_eq!(cc & CC_EQ != 0, a == b);
        prop_assert_eq!(cc & CC_LT != 0, (a as i32) < (b as i32));
        prop_assert_eq!(cc & CC_GT != 0, (a as i32) > (b as i32));
        prop_assert_eq!(cc & CC_LTU != 0, a < b);
        prop_assert_eq!(cc & CC_GTU != 0, a > b);
    }

    #[test]
    fn exactly_one_ordering_per_interpretation(a: u32, b: u32) {
        let cc = cond::compare(a, b);
        let signed = (cc & (CC_LT | CC_GT)).count_ones();
        let unsigned = (cc & (CC_LTU | CC_GTU)).count_ones();
        if a == b {
            prop_assert_eq!(cc, CC_EQ);
        } else {
            prop_assert_eq!(signed, 1);
            prop_assert_eq!(unsigned, 1);
        }
    }
}
