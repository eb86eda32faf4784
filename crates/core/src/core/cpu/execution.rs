//! The decode–execute loop.
//!
//! This module implements the execution engine of the machine. It performs
//! the following:
//! 1. **Cycle:** Fetches, decodes, and dispatches one instruction at a
//!    time, committing its effects atomically or not at all.
//! 2. **Preemption:** Bounds each [`Machine::resume`] call by an
//!    instruction budget so the host can timeslice the guest.
//! 3. **Faults:** Records illegal instructions, invalid memory accesses,
//!    breakpoint traps, and guest exits as pending architectural state.
//!
//! The program-counter convention follows the architecture: after every
//! dispatch the counter advances by one instruction word, so operations
//! that redirect control (jumps, calls, returns, taken branches) set it to
//! `target - 2` and let the trailing advance land exactly on the target.
//! The breakpoint rewinds by one word for the same reason: the trailing
//! advance cancels out and the trap is re-fetched on resumption.

use tracing::{debug, trace};

use super::Machine;
use crate::common::constants::{HALF_IMM_BYTES, INST_BYTES, WORD_IMM_BYTES};
use crate::common::fault::Fault;
use crate::core::arch::cond;
use crate::isa::abi;
use crate::isa::decode::decode;
use crate::isa::instruction::{BranchCond, Instruction, Opcode, SubOp};
use crate::mem::traits::MemoryMap;

/// How an instruction left the machine after its effects committed.
pub(super) enum Retire {
    /// Fall through to the next instruction.
    Next,
    /// Breakpoint: pause with [`Fault::Trap`], counter back on the trap.
    Trap,
    /// Guest-requested termination.
    Quit,
}

impl<M: MemoryMap> Machine<M> {
    /// Runs the fetch-decode-execute cycle until a fault is raised or, for
    /// a nonzero `budget`, until that many instructions retire in this
    /// call. A budget of zero runs until fault.
    ///
    /// Returns the terminating fault, or `None` on budget exhaustion. A
    /// fault already pending on entry is returned immediately without
    /// executing anything: clearing faults is the host's job. On return
    /// the program counter and retired count are exact resumable state.
    pub fn resume(&mut self, budget: u64) -> Option<Fault> {
        let mut retired: u64 = 0;
        loop {
            if let Some(fault) = self.step() {
                return Some(fault);
            }
            retired += 1;
            if budget != 0 && retired >= budget {
                return None;
            }
        }
    }

    /// Executes a single instruction, returning the fault it raised, if
    /// any. A pending fault is returned without executing.
    pub fn step(&mut self) -> Option<Fault> {
        if let Some(fault) = self.cpu.fault {
            return Some(fault);
        }
        let start_pc = self.cpu.pc;
        match self.exec_one() {
            Ok(Retire::Next) => {
                self.cpu.insts += 1;
                None
            }
            Ok(Retire::Trap) => {
                self.cpu.insts += 1;
                self.raise(Fault::Trap, start_pc)
            }
            Ok(Retire::Quit) => {
                self.cpu.insts += 1;
                self.raise(Fault::Quit, start_pc)
            }
            Err(fault) => {
                // Nothing committed: leave the counter on the faulting
                // instruction.
                self.cpu.pc = start_pc;
                self.raise(fault, start_pc)
            }
        }
    }

    /// Records a fault on the CPU.
    fn raise(&mut self, fault: Fault, pc: u32) -> Option<Fault> {
        debug!(%fault, pc = format_args!("{pc:#010x}"), "fault raised");
        self.cpu.fault = Some(fault);
        Some(fault)
    }

    /// Fetches, decodes, and dispatches one instruction.
    ///
    /// On `Ok` every effect, including the program-counter update, has
    /// committed. On `Err` no register or counter mutation from this
    /// instruction is visible (the caller restores the counter).
    fn exec_one(&mut self) -> Result<Retire, Fault> {
        let word = self.fetch_inst()?;
        let inst = decode(word)?;
        if self.trace {
            trace!(
                pc = format_args!("{:#010x}", self.cpu.pc),
                op = inst.mnemonic(),
                "exec"
            );
        }
        let retire = match inst {
            Instruction::Op { op, a, b } => self.exec_op(op, a, b)?,
            Instruction::Imm { op, reg, imm } => {
                self.exec_imm(op, reg, imm)?;
                Retire::Next
            }
            Instruction::Branch { cond, disp } => {
                self.exec_branch(cond, disp);
                Retire::Next
            }
        };
        self.cpu.pc = self.cpu.pc.wrapping_add(INST_BYTES);
        Ok(retire)
    }

    /// Dispatches a form-1 operation.
    #[allow(clippy::cognitive_complexity)]
    fn exec_op(&mut self, op: Opcode, a: usize, b: usize) -> Result<Retire, Fault> {
        let ra = self.cpu.regs.gpr(a);
        let rb = self.cpu.regs.gpr(b);
        match op {
            // The byte and halfword immediate-load mnemonics consume a
            // full unmasked word, exactly like ldi.l; narrowing is an
            // assembler concern.
            Opcode::LdiL | Opcode::LdiB | Opcode::LdiS => {
                let val = self.fetch_imm_word()?;
                self.cpu.regs.set_gpr(a, val);
                self.advance(WORD_IMM_BYTES);
            }
            Opcode::Mov => self.cpu.regs.set_gpr(a, rb),

            Opcode::Add => self.cpu.regs.set_gpr(a, ra.wrapping_add(rb)),
            Opcode::Sub => self.cpu.regs.set_gpr(a, ra.wrapping_sub(rb)),
            Opcode::Mul => self.cpu.regs.set_gpr(a, ra.wrapping_mul(rb)),
            Opcode::Div => {
                // A guest divisor of zero must never reach a host divide.
                if rb == 0 {
                    return Err(Fault::IllegalInstruction);
                }
                let quot = (ra as i32).wrapping_div(rb as i32);
                self.cpu.regs.set_gpr(a, quot as u32);
            }
            Opcode::Udiv => {
                if rb == 0 {
                    return Err(Fault::IllegalInstruction);
                }
                self.cpu.regs.set_gpr(a, ra / rb);
            }
            Opcode::Mod => {
                if rb == 0 {
                    return Err(Fault::IllegalInstruction);
                }
                let rem = (ra as i32).wrapping_rem(rb as i32);
                self.cpu.regs.set_gpr(a, rem as u32);
            }
            Opcode::Umod => {
                if rb == 0 {
                    return Err(Fault::IllegalInstruction);
                }
                self.cpu.regs.set_gpr(a, ra % rb);
            }
            Opcode::UmulX => {
                let wide = u64::from(ra) * u64::from(rb);
                self.cpu.regs.set_gpr(a, (wide >> 32) as u32);
            }
            Opcode::MulX => {
                let wide = i64::from(ra as i32) * i64::from(rb as i32);
                self.cpu.regs.set_gpr(a, ((wide as u64) >> 32) as u32);
            }

            Opcode::And => self.cpu.regs.set_gpr(a, ra & rb),
            Opcode::Or => self.cpu.regs.set_gpr(a, ra | rb),
            Opcode::Xor => self.cpu.regs.set_gpr(a, ra ^ rb),
            Opcode::Not => self.cpu.regs.set_gpr(a, !rb),
            Opcode::Neg => self.cpu.regs.set_gpr(a, rb.wrapping_neg()),

            // The wrapping shift intrinsics take the amount modulo 32,
            // pinning down what was platform-dependent in the original
            // architecture.
            Opcode::Ashl => self.cpu.regs.set_gpr(a, ra.wrapping_shl(rb)),
            Opcode::Lshr => self.cpu.regs.set_gpr(a, ra.wrapping_shr(rb)),
            Opcode::Ashr => {
                self.cpu.regs.set_gpr(a, (ra as i32).wrapping_shr(rb) as u32);
            }

            Opcode::SexB => self.cpu.regs.set_gpr(a, i32::from(rb as u8 as i8) as u32),
            Opcode::SexS => self.cpu.regs.set_gpr(a, i32::from(rb as u16 as i16) as u32),
            Opcode::ZexB => self.cpu.regs.set_gpr(a, rb & 0xFF),
            Opcode::ZexS => self.cpu.regs.set_gpr(a, rb & 0xFFFF),

            Opcode::Cmp => self.cpu.cc = cond::compare(ra, rb),
            Opcode::Nop => {}

            Opcode::LdL => {
                let val = self.mem.read_u32(rb)?;
                self.cpu.regs.set_gpr(a, val);
            }
            Opcode::LdS => {
                let val = self.mem.read_u16(rb)?;
                self.cpu.regs.set_gpr(a, u32::from(val));
            }
            Opcode::LdB => {
                let val = self.mem.read_u8(rb)?;
                self.cpu.regs.set_gpr(a, u32::from(val));
            }
            Opcode::StL => self.mem.write_u32(ra, rb)?,
            Opcode::StS => self.mem.write_u16(ra, rb as u16)?,
            Opcode::StB => self.mem.write_u8(ra, rb as u8)?,

            Opcode::LdaL => {
                let addr = self.fetch_imm_word()?;
                let val = self.mem.read_u32(addr)?;
                self.cpu.regs.set_gpr(a, val);
                self.advance(WORD_IMM_BYTES);
            }
            Opcode::LdaS => {
                let addr = self.fetch_imm_word()?;
                let val = self.mem.read_u16(addr)?;
                self.cpu.regs.set_gpr(a, u32::from(val));
                self.advance(WORD_IMM_BYTES);
            }
            Opcode::LdaB => {
                let addr = self.fetch_imm_word()?;
                let val = self.mem.read_u8(addr)?;
                self.cpu.regs.set_gpr(a, u32::from(val));
                self.advance(WORD_IMM_BYTES);
            }
            Opcode::StaL => {
                let addr = self.fetch_imm_word()?;
                self.mem.write_u32(addr, ra)?;
                self.advance(WORD_IMM_BYTES);
            }
            Opcode::StaS => {
                let addr = self.fetch_imm_word()?;
                self.mem.write_u16(addr, ra as u16)?;
                self.advance(WORD_IMM_BYTES);
            }
            Opcode::StaB => {
                let addr = self.fetch_imm_word()?;
                self.mem.write_u8(addr, ra as u8)?;
                self.advance(WORD_IMM_BYTES);
            }

            Opcode::LdoL => {
                let addr = self.fetch_imm_offset()?.wrapping_add(rb);
                let val = self.mem.read_u32(addr)?;
                self.cpu.regs.set_gpr(a, val);
                self.advance(HALF_IMM_BYTES);
            }
            Opcode::LdoS => {
                let addr = self.fetch_imm_offset()?.wrapping_add(rb);
                let val = self.mem.read_u16(addr)?;
                self.cpu.regs.set_gpr(a, u32::from(val));
                self.advance(HALF_IMM_BYTES);
            }
            Opcode::LdoB => {
                let addr = self.fetch_imm_offset()?.wrapping_add(rb);
                let val = self.mem.read_u8(addr)?;
                self.cpu.regs.set_gpr(a, u32::from(val));
                self.advance(HALF_IMM_BYTES);
            }
            Opcode::StoL => {
                let addr = self.fetch_imm_offset()?.wrapping_add(ra);
                self.mem.write_u32(addr, rb)?;
                self.advance(HALF_IMM_BYTES);
            }
            Opcode::StoS => {
                let addr = self.fetch_imm_offset()?.wrapping_add(ra);
                self.mem.write_u16(addr, rb as u16)?;
                self.advance(HALF_IMM_BYTES);
            }
            Opcode::StoB => {
                let addr = self.fetch_imm_offset()?.wrapping_add(ra);
                self.mem.write_u8(addr, rb as u8)?;
                self.advance(HALF_IMM_BYTES);
            }

            Opcode::Push => {
                let ptr = ra.wrapping_sub(4);
                self.mem.write_u32(ptr, rb)?;
                self.cpu.regs.set_gpr(a, ptr);
            }
            Opcode::Pop => {
                let val = self.mem.read_u32(ra)?;
                // Value lands in b before the pointer writeback, so
                // `pop r, r` leaves the incremented pointer in r.
                self.cpu.regs.set_gpr(b, val);
                self.cpu.regs.set_gpr(a, ra.wrapping_add(4));
            }

            Opcode::Jmp => self.jump(ra),
            Opcode::Jmpa => {
                let target = self.fetch_imm_word()?;
                self.jump(target);
            }
            Opcode::Jsr => {
                let ret = self.cpu.pc.wrapping_add(INST_BYTES);
                self.call(ra, ret)?;
            }
            Opcode::Jsra => {
                let target = self.fetch_imm_word()?;
                let ret = self.cpu.pc.wrapping_add(INST_BYTES + WORD_IMM_BYTES);
                self.call(target, ret)?;
            }
            Opcode::Ret => self.ret()?,

            Opcode::Swi => return self.software_interrupt(),
            Opcode::Brk => {
                self.cpu.pc = self.cpu.pc.wrapping_sub(INST_BYTES);
                return Ok(Retire::Trap);
            }
        }
        Ok(Retire::Next)
    }

    /// Dispatches a form-2 operation.
    fn exec_imm(&mut self, op: SubOp, reg: usize, imm: u8) -> Result<(), Fault> {
        let rv = self.cpu.regs.gpr(reg);
        match op {
            SubOp::Inc => self.cpu.regs.set_gpr(reg, rv.wrapping_add(u32::from(imm))),
            SubOp::Dec => self.cpu.regs.set_gpr(reg, rv.wrapping_sub(u32::from(imm))),
            SubOp::Gsr => {
                let val = self.cpu.regs.sreg(usize::from(imm));
                self.cpu.regs.set_gpr(reg, val);
            }
            SubOp::Ssr => self.write_sreg(imm, rv)?,
        }
        Ok(())
    }

    /// Writes a special register, validating the reserved return-buffer
    /// indices against the memory map.
    fn write_sreg(&mut self, idx: u8, val: u32) -> Result<(), Fault> {
        match idx {
            abi::SREG_RET_BUF => {
                if !self.mem.maps(val, 1) {
                    return Err(Fault::InvalidMemoryAccess);
                }
            }
            abi::SREG_RET_LEN => {
                let addr = self.cpu.regs.sreg(usize::from(abi::SREG_RET_BUF));
                if addr == 0 || !self.mem.maps(addr, val) {
                    return Err(Fault::InvalidMemoryAccess);
                }
            }
            _ => {}
        }
        self.cpu.regs.set_sreg(usize::from(idx), val);
        Ok(())
    }

    /// Executes a form-3 conditional branch.
    fn exec_branch(&mut self, cond: BranchCond, disp: i32) {
        if !cond::is_taken(self.cpu.cc, cond) {
            return;
        }
        self.cpu.pc = self.cpu.pc.wrapping_add(disp as u32);
        if let Some(profile) = &mut self.profile {
            // The counter still trails the landing address by one word.
            let target = self.cpu.pc.wrapping_add(INST_BYTES);
            *profile.entry(target).or_insert(0) += 1;
        }
    }

    /// Redirects control to `target` (trailing-advance convention).
    const fn jump(&mut self, target: u32) {
        self.cpu.pc = target.wrapping_sub(INST_BYTES);
    }

    /// Subroutine call: reserve the static-chain slot, push the return
    /// address, push the frame pointer, then move both stack and frame
    /// pointers to the new top and jump.
    fn call(&mut self, target: u32, ret: u32) -> Result<(), Fault> {
        let sp = self.cpu.regs.sp();
        let ret_slot = sp.wrapping_sub(8);
        let fp_slot = sp.wrapping_sub(12);
        self.mem.write_u32(ret_slot, ret)?;
        self.mem.write_u32(fp_slot, self.cpu.regs.fp())?;
        self.cpu.regs.set_sp(fp_slot);
        self.cpu.regs.set_fp(fp_slot);
        self.jump(target);
        Ok(())
    }

    /// Return: pop the frame pointer and return address from the frame
    /// base, skip the static-chain slot, restore the stack pointer.
    fn ret(&mut self) -> Result<(), Fault> {
        let frame = self.cpu.regs.fp();
        let saved_fp = self.mem.read_u32(frame)?;
        let ret = self.mem.read_u32(frame.wrapping_add(4))?;
        self.cpu.regs.set_fp(saved_fp);
        self.cpu.regs.set_sp(frame.wrapping_add(12));
        self.jump(ret);
        Ok(())
    }

    /// Advances the program counter past a trailing immediate field.
    const fn advance(&mut self, bytes: u32) {
        self.cpu.pc = self.cpu.pc.wrapping_add(bytes);
    }
}
