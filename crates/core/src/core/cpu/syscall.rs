//! Software-interrupt dispatch and the memory-mapping syscall emulator.
//!
//! This module services the guest's `swi` instruction. It performs the
//! following:
//! 1. **Recording:** Stores the interrupt class and number in special
//!    registers 2 and 3 for host inspection, whichever interrupt fired.
//! 2. **Dispatch:** Interrupt 1 raises the quit fault; interrupt 90 runs
//!    the anonymous memory-mapping emulation; everything else is accepted
//!    as a no-op.
//! 3. **Mapping:** Validates the guest's mmap parameters, enforces the
//!    heap quota, and installs a fresh writable region on success.
//!
//! Mapping failures never raise a CPU fault: they are reported to the
//! guest as a negative errno in the result register and execution
//! continues.

use tracing::debug;

use super::execution::Retire;
use super::Machine;
use crate::common::constants::{PAGE_SIZE, WORD_IMM_BYTES};
use crate::common::fault::Fault;
use crate::isa::abi;
use crate::mem::traits::MemoryMap;

impl<M: MemoryMap> Machine<M> {
    /// Executes a software interrupt. The interrupt number is the 32-bit
    /// immediate trailing the instruction word; its fetch can fault like
    /// any other immediate, before any register effect applies.
    pub(super) fn software_interrupt(&mut self) -> Result<Retire, Fault> {
        let inum = self.fetch_imm_word()?;
        self.cpu
            .regs
            .set_sreg(usize::from(abi::SREG_EX_CLASS), abi::EX_CLASS_SWI);
        self.cpu.regs.set_sreg(usize::from(abi::SREG_EX_ARG), inum);

        let retire = match inum {
            abi::SYS_EXIT => Retire::Quit,
            abi::SYS_MMAP => {
                self.mmap_emulate();
                Retire::Next
            }
            // Unrecognized interrupt numbers are accepted as no-ops; the
            // special-register effects above already happened.
            _ => Retire::Next,
        };
        self.cpu.pc = self.cpu.pc.wrapping_add(WORD_IMM_BYTES);
        Ok(retire)
    }

    /// Emulates the anonymous memory-mapping syscall.
    ///
    /// Parameters come from the six argument registers: requested address
    /// (must be zero), length, protection flags, mapping flags, and an
    /// ignored file descriptor and offset (anonymous mappings only). The
    /// result register receives the new region's base address or a
    /// negative errno.
    fn mmap_emulate(&mut self) {
        let addr = self.cpu.regs.gpr(abi::REG_A0);
        let len = self.cpu.regs.gpr(abi::REG_A1);
        let prot = self.cpu.regs.gpr(abi::REG_A2);
        let flags = self.cpu.regs.gpr(abi::REG_A3);
        debug!(addr, len, prot, flags, "mmap request");

        let prot_rwx = abi::PROT_READ | abi::PROT_WRITE | abi::PROT_EXEC;
        let valid = addr == 0
            && len >= PAGE_SIZE
            && len % PAGE_SIZE == 0
            && prot & prot_rwx == prot_rwx
            && flags & abi::MAP_PRIVATE != 0
            && flags & abi::MAP_ANONYMOUS != 0;
        if !valid {
            self.mmap_fail(abi::EINVAL);
            return;
        }
        if len > self.heap_avail {
            self.mmap_fail(abi::ENOMEM);
            return;
        }

        let name = format!("heap{}", self.heap_count);
        match self.mem.install_region(&name, len) {
            Some(base) => {
                self.heap_count += 1;
                self.heap_avail -= len;
                self.cpu.regs.set_gpr(abi::REG_A0, base);
                debug!(name, base = format_args!("{base:#010x}"), len, "mmap ok");
            }
            None => self.mmap_fail(abi::ENOMEM),
        }
    }

    /// Reports a mapping failure to the guest as `-errno`.
    fn mmap_fail(&mut self, errno: u32) {
        debug!(errno, "mmap failed");
        self.cpu.regs.set_gpr(abi::REG_A0, errno.wrapping_neg());
    }
}
