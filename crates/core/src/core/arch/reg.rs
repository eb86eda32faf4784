//! Architectural register files.
//!
//! This module implements the register state of the processor. It performs
//! the following:
//! 1. **Storage:** Maintains the 16 general-purpose registers and the bank
//!    of 256 special registers.
//! 2. **Convention:** Registers 0 and 1 double as the frame and stack
//!    pointers; named accessors keep call-frame code readable.
//! 3. **Debugging:** Provides a compact dump of the general-purpose file.

use crate::common::constants::{GPR_COUNT, SREG_COUNT};
use crate::isa::abi;

/// The architectural register files.
///
/// All registers power up as zero. Unlike some architectures there is no
/// hardwired zero register: every general-purpose register is writable,
/// including the frame and stack pointers.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    gpr: [u32; GPR_COUNT],
    sreg: [u32; SREG_COUNT],
}

impl RegisterFile {
    /// Creates a register file with every register initialized to zero.
    pub const fn new() -> Self {
        Self {
            gpr: [0; GPR_COUNT],
            sreg: [0; SREG_COUNT],
        }
    }

    /// Reads a general-purpose register.
    ///
    /// # Panics
    ///
    /// Indices come from masked 4-bit instruction fields, so `idx` is
    /// always in range in engine code; out-of-range host access panics.
    #[must_use]
    pub const fn gpr(&self, idx: usize) -> u32 {
        self.gpr[idx]
    }

    /// Writes a general-purpose register.
    pub const fn set_gpr(&mut self, idx: usize, val: u32) {
        self.gpr[idx] = val;
    }

    /// Reads a special register.
    #[must_use]
    pub const fn sreg(&self, idx: usize) -> u32 {
        self.sreg[idx]
    }

    /// Writes a special register.
    pub const fn set_sreg(&mut self, idx: usize, val: u32) {
        self.sreg[idx] = val;
    }

    /// Reads the frame pointer (register 0).
    #[must_use]
    pub const fn fp(&self) -> u32 {
        self.gpr[abi::REG_FP]
    }

    /// Writes the frame pointer (register 0).
    pub const fn set_fp(&mut self, val: u32) {
        self.gpr[abi::REG_FP] = val;
    }

    /// Reads the stack pointer (register 1).
    #[must_use]
    pub const fn sp(&self) -> u32 {
        self.gpr[abi::REG_SP]
    }

    /// Writes the stack pointer (register 1).
    pub const fn set_sp(&mut self, val: u32) {
        self.gpr[abi::REG_SP] = val;
    }

    /// Formats the general-purpose file as `$fp=.. $sp=.. $r2=.. ..`,
    /// one line per four registers.
    #[must_use]
    pub fn dump_gpr(&self) -> String {
        use std::fmt::Write as _;

        let mut out = String::new();
        for (idx, val) in self.gpr.iter().enumerate() {
            let sep = if idx % 4 == 3 { '\n' } else { ' ' };
            let name = gpr_name(idx);
            let _ = write!(out, "{name:>4}={val:#010x}{sep}");
        }
        out
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

/// The assembler name of a general-purpose register.
#[must_use]
pub const fn gpr_name(idx: usize) -> &'static str {
    match idx {
        abi::REG_FP => "$fp",
        abi::REG_SP => "$sp",
        2 => "$r0",
        3 => "$r1",
        4 => "$r2",
        5 => "$r3",
        6 => "$r4",
        7 => "$r5",
        8 => "$r6",
        9 => "$r7",
        10 => "$r8",
        11 => "$r9",
        12 => "$r10",
        13 => "$r11",
        14 => "$r12",
        15 => "$r13",
        _ => "$?",
    }
}
