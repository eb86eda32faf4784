//! Instruction-stream fetch helpers.
//!
//! Data loads and stores go straight through the [`MemoryMap`] trait; the
//! helpers here cover the instruction stream only: the 16-bit word at the
//! program counter and the immediate fields that trail some form-1
//! instructions. Every failure is already a [`Fault`], raised by the map
//! at the access site, so each helper is a plain `?` seam in the engine.

use super::Machine;
use crate::common::constants::INST_BYTES;
use crate::common::fault::Fault;
use crate::mem::traits::MemoryMap;

impl<M: MemoryMap> Machine<M> {
    /// Fetches the instruction word at the program counter.
    pub(super) fn fetch_inst(&self) -> Result<u16, Fault> {
        self.mem.read_u16(self.cpu.pc)
    }

    /// Fetches the 32-bit immediate trailing the current instruction
    /// word. The caller advances the program counter once the
    /// instruction's effects commit.
    pub(super) fn fetch_imm_word(&self) -> Result<u32, Fault> {
        self.mem.read_u32(self.cpu.pc.wrapping_add(INST_BYTES))
    }

    /// Fetches the 16-bit literal offset trailing the current instruction
    /// word, sign-extended to register width.
    pub(super) fn fetch_imm_offset(&self) -> Result<u32, Fault> {
        let raw = self.mem.read_u16(self.cpu.pc.wrapping_add(INST_BYTES))?;
        Ok(i32::from(raw as i16) as u32)
    }
}
