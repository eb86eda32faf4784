//! Resume contract: budgets, pending faults, determinism, resumability.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sbxsim_core::Fault;
use sbxsim_core::isa::instruction::BranchCond;

use crate::common::builder::Asm;
use crate::common::harness::{CODE_BASE, TestContext};

/// A straight-line program: `count` increments of r2, then exit.
fn counting_program(count: usize) -> Asm {
    let mut asm = Asm::new();
    for _ in 0..count {
        asm = asm.inc(2, 1);
    }
    asm.exit()
}

#[test]
fn zero_budget_runs_until_fault() {
    let mut ctx = TestContext::new().load_program(counting_program(10));
    assert_eq!(ctx.run(0), Some(Fault::Quit));
    assert_eq!(ctx.reg(2), 10);
    assert_eq!(ctx.machine.cpu.insts, 11);
}

#[test]
fn budget_exhaustion_is_not_a_fault() {
    let mut ctx = TestContext::new().load_program(counting_program(10));
    assert_eq!(ctx.run(4), None);
    assert_eq!(ctx.reg(2), 4);
    assert_eq!(ctx.machine.cpu.insts, 4);
    assert_eq!(ctx.pc(), CODE_BASE + 8);
    assert!(ctx.machine.cpu.fault.is_none());
}

#[test]
fn budget_bounds_each_call_not_the_lifetime() {
    let mut ctx = TestContext::new().load_program(counting_program(10));
    assert_eq!(ctx.run(4), None);
    // A second call with the same budget retires four more, not zero.
    assert_eq!(ctx.run(4), None);
    assert_eq!(ctx.machine.cpu.insts, 8);
}

#[test]
fn fault_cuts_a_generous_budget_short() {
    let mut ctx = TestContext::new().load_program(counting_program(3));
    assert_eq!(ctx.run(1000), Some(Fault::Quit));
    assert_eq!(ctx.machine.cpu.insts, 4);
}

#[test]
fn pending_fault_returns_without_executing() {
    let mut ctx = TestContext::new().load_program(counting_program(3));
    ctx.machine.cpu.fault = Some(Fault::IllegalInstruction);
    assert_eq!(ctx.run(0), Some(Fault::IllegalInstruction));
    assert_eq!(ctx.machine.cpu.insts, 0);
    assert_eq!(ctx.reg(2), 0);
}

#[test]
fn fetch_from_unmapped_pc_faults() {
    let mut ctx = TestContext::new().load_program(Asm::new().nop());
    ctx.machine.cpu.pc = 0xFFFF_0000;
    assert_eq!(ctx.run(0), Some(Fault::InvalidMemoryAccess));
    assert_eq!(ctx.pc(), 0xFFFF_0000);
}

#[test]
fn split_runs_match_a_single_run() {
    let mut oneshot = TestContext::new().load_program(counting_program(20));
    assert_eq!(oneshot.run(0), Some(Fault::Quit));

    let mut split = TestContext::new().load_program(counting_program(20));
    assert_eq!(split.run(7), None);
    assert_eq!(split.run(7), None);
    assert_eq!(split.run(0), Some(Fault::Quit));

    assert_eq!(
        split.machine.cpu.regs.dump_gpr(),
        oneshot.machine.cpu.regs.dump_gpr()
    );
    assert_eq!(split.machine.cpu.insts, oneshot.machine.cpu.insts);
    assert_eq!(split.pc(), oneshot.pc());
}

/// A small looping program exercising compare, branch, and memory.
fn looping_ctx(iters: u32) -> TestContext {
    let mut ctx = TestContext::new().load_program(
        Asm::new()
            .push(1, 2) // 0x1000
            .pop(1, 4) // 0x1002
            .dec(2, 1) // 0x1004
            .cmp(2, 3) // 0x1006
            .branch(BranchCond::Ne, -5) // 0x1008, back to the push
            .exit(),
    );
    ctx.set_reg(2, iters);
    ctx
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn resumable_under_any_budget_split(splits in prop::collection::vec(1u64..5, 1..40)) {
        let mut oneshot = looping_ctx(8);
        prop_assert_eq!(oneshot.run(0), Some(Fault::Quit));

        let mut split = looping_ctx(8);
        let mut outcome = None;
        for budget in splits {
            outcome = split.run(budget);
            if outcome.is_some() {
                break;
            }
        }
        if outcome.is_none() {
            outcome = split.run(0);
        }

        prop_assert_eq!(outcome, Some(Fault::Quit));
        prop_assert_eq!(split.machine.cpu.insts, oneshot.machine.cpu.insts);
        prop_assert_eq!(split.pc(), oneshot.pc());
        prop_assert_eq!(split.machine.cpu.cc, oneshot.machine.cpu.cc);
        prop_assert_eq!(
            split.machine.cpu.regs.dump_gpr(),
            oneshot.machine.cpu.regs.dump_gpr()
        );
    }

    #[test]
    fn identical_initial_state_runs_identically(r2: u32, r3: u32, budget in 0u64..30) {
        let program = |a: u32, b: u32| {
            let mut ctx = TestContext::new().load_program(
                Asm::new()
                    .cmp(2, 3)
                    .branch(BranchCond::Ltu, 1)
                    .inc(4, 1)
                    .op(sbxsim_core::isa::opcodes::OP_ADD, 2, 3)
                    .exit(),
            );
            ctx.set_reg(2, a);
            ctx.set_reg(3, b);
            ctx
        };

        let mut first = program(r2, r3);
        let mut second = program(r2, r3);
        let fault_a = first.run(budget);
        let fault_b = second.run(budget);

        prop_assert_eq!(fault_a, fault_b);
        prop_assert_eq!(first.pc(), second.pc());
        prop_assert_eq!(first.machine.cpu.cc, second.machine.cpu.cc);
        prop_assert_eq!(first.machine.cpu.insts, second.machine.cpu.insts);
        prop_assert_eq!(
            first.machine.cpu.regs.dump_gpr(),
            second.machine.cpu.regs.dump_gpr()
        );
    }
}
