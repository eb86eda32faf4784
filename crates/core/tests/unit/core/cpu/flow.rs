//! Control flow: jumps, branches, calls, returns, breakpoints.

use pretty_assertions::assert_eq;
use sbxsim_core::isa::instruction::BranchCond;
use sbxsim_core::{Fault, MachineConfig, MemoryMap};

use crate::common::builder::Asm;
use crate::common::harness::{CODE_BASE, STACK_TOP, TestContext};

#[test]
fn register_jump_lands_exactly_on_the_target() {
    let mut ctx = TestContext::new().load_program(Asm::new().jmp(2));
    ctx.set_reg(2, CODE_BASE + 0x20);
    assert_eq!(ctx.run(1), None);
    assert_eq!(ctx.pc(), CODE_BASE + 0x20);
}

#[test]
fn absolute_jump_lands_exactly_on_the_target() {
    let mut ctx = TestContext::new().load_program(Asm::new().jmpa(CODE_BASE + 0x10));
    assert_eq!(ctx.run(1), None);
    assert_eq!(ctx.pc(), CODE_BASE + 0x10);
}

#[test]
fn untaken_branch_falls_through() {
    let mut ctx = TestContext::new().load_program(
        Asm::new()
            .cmp(2, 3) // 1 vs 2: not equal
            .branch(BranchCond::Eq, 4),
    );
    ctx.set_reg(2, 1);
    ctx.set_reg(3, 2);
    assert_eq!(ctx.run(2), None);
    assert_eq!(ctx.pc(), CODE_BASE + 4);
}

#[test]
fn taken_backward_branch_loops() {
    // dec r2; cmp r2, r3; bne back to the dec.
    let mut ctx = TestContext::new().load_program(
        Asm::new()
            .dec(2, 1)
            .cmp(2, 3)
            .branch(BranchCond::Ne, -3)
            .exit(),
    );
    ctx.set_reg(2, 5);
    ctx.set_reg(3, 0);
    assert_eq!(ctx.run(0), Some(Fault::Quit));
    assert_eq!(ctx.reg(2), 0);
    // 5 iterations of 3 instructions, plus the exit.
    assert_eq!(ctx.machine.cpu.insts, 16);
}

#[test]
fn equal_compare_then_branch_skips_one_instruction() {
    // The §8 end-to-end scenario: 5 == 5, branch 4 bytes past the
    // branch instruction, skipping the inc in between.
    let mut ctx = TestContext::new().load_program(
        Asm::new()
            .ldi_l(2, 5) // 0x1000
            .ldi_l(3, 5) // 0x1006
            .cmp(2, 3) // 0x100c
            .branch(BranchCond::Eq, 1) // 0x100e, lands at 0x1012
            .inc(2, 0x63) // 0x1010, skipped
            .exit(), // 0x1012
    );
    assert_eq!(ctx.run(0), Some(Fault::Quit));
    assert_eq!(ctx.reg(2), 5);
    assert_eq!(ctx.pc(), CODE_BASE + 0x12 + 6);
}

#[test]
fn call_pushes_frame_and_return_lands_after_the_call() {
    let fn_addr = CODE_BASE + 0x10;
    let mut ctx = TestContext::new().load_program(
        Asm::new()
            .jsra(fn_addr) // 0x1000..0x1006
            .exit() // 0x1006
            .nop() // 0x100c
            .nop() // 0x100e
            .inc(2, 1) // 0x1010: function body
            .ret(),
    );
    let fp0 = ctx.machine.cpu.regs.fp();
    let sp0 = ctx.machine.cpu.regs.sp();

    // After the call: frame built, control at the function.
    assert_eq!(ctx.run(1), None);
    assert_eq!(ctx.pc(), fn_addr);
    assert_eq!(ctx.machine.cpu.regs.sp(), sp0 - 12);
    assert_eq!(ctx.machine.cpu.regs.fp(), sp0 - 12);
    assert_eq!(ctx.machine.mem.read_u32(sp0 - 8), Ok(CODE_BASE + 6));
    assert_eq!(ctx.machine.mem.read_u32(sp0 - 12), Ok(fp0));

    // After the return: both pointers restored, control after the call.
    assert_eq!(ctx.run(0), Some(Fault::Quit));
    assert_eq!(ctx.machine.cpu.regs.sp(), sp0);
    assert_eq!(ctx.machine.cpu.regs.fp(), fp0);
    assert_eq!(ctx.reg(2), 1);
}

#[test]
fn register_call_pushes_the_narrow_return_address() {
    let fn_addr = CODE_BASE + 0x10;
    let mut ctx = TestContext::new().load_program(
        Asm::new()
            .ldi_l(4, fn_addr) // 0x1000
            .jsr(4) // 0x1006, return address 0x1008
            .exit() // 0x1008
            .nop() // 0x100e
            .inc(2, 7) // 0x1010
            .ret(),
    );
    assert_eq!(ctx.run(2), None);
    assert_eq!(ctx.pc(), fn_addr);
    assert_eq!(ctx.machine.mem.read_u32(STACK_TOP - 8), Ok(CODE_BASE + 8));
    assert_eq!(ctx.run(0), Some(Fault::Quit));
    assert_eq!(ctx.reg(2), 7);
}

#[test]
fn call_with_unmapped_stack_faults_before_any_register_commit() {
    let mut ctx = TestContext::new().load_program(Asm::new().jsra(CODE_BASE + 0x10));
    ctx.machine.cpu.regs.set_sp(0xDEAD_0000);
    ctx.machine.cpu.regs.set_fp(0x7777);
    assert_eq!(ctx.run(0), Some(Fault::InvalidMemoryAccess));
    assert_eq!(ctx.machine.cpu.regs.sp(), 0xDEAD_0000);
    assert_eq!(ctx.machine.cpu.regs.fp(), 0x7777);
    assert_eq!(ctx.pc(), CODE_BASE);
}

#[test]
fn breakpoint_pauses_and_is_refetched_after_clearing() {
    let mut ctx = TestContext::new().load_program(Asm::new().nop().brk().exit());
    assert_eq!(ctx.run(0), Some(Fault::Trap));
    // Counter rewound onto the breakpoint; it still counted as retired.
    assert_eq!(ctx.pc(), CODE_BASE + 2);
    assert_eq!(ctx.machine.cpu.insts, 2);

    // Without clearing, the engine refuses to run.
    assert_eq!(ctx.run(0), Some(Fault::Trap));
    assert_eq!(ctx.machine.cpu.insts, 2);

    // Clearing re-fetches the breakpoint itself.
    ctx.machine.clear_fault();
    assert_eq!(ctx.run(0), Some(Fault::Trap));
    assert_eq!(ctx.pc(), CODE_BASE + 2);
    assert_eq!(ctx.machine.cpu.insts, 3);
}

#[test]
fn taken_branches_feed_the_profiling_sink() {
    let config = MachineConfig {
        profiling: true,
        ..MachineConfig::default()
    };
    let mut ctx = TestContext::with_config(&config).load_program(
        Asm::new()
            .dec(2, 1) // 0x1000, branch target
            .cmp(2, 3) // 0x1002
            .branch(BranchCond::Ne, -3) // 0x1004
            .exit(),
    );
    ctx.set_reg(2, 3);
    assert_eq!(ctx.run(0), Some(Fault::Quit));

    let profile = ctx.machine.take_profile().unwrap();
    // Taken twice (r2 = 2, 1), untaken once at zero.
    assert_eq!(profile.get(&CODE_BASE).copied(), Some(2));
    assert_eq!(profile.len(), 1);
    assert!(ctx.machine.profile().is_none());
}

#[test]
fn profiling_disabled_records_nothing() {
    let mut ctx = TestContext::new().load_program(
        Asm::new()
            .cmp(2, 3)
            .branch(BranchCond::Eq, 0)
            .exit(),
    );
    assert_eq!(ctx.run(0), Some(Fault::Quit));
    assert!(ctx.machine.profile().is_none());
}
