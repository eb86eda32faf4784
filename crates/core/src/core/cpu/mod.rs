//! Machine definition and host-facing state.
//!
//! This module defines the central [`Machine`] structure, the container
//! for one simulated guest program. It coordinates the following:
//! 1. **Architectural State:** The [`Cpu`] record of registers, program
//!    counter, condition codes, pending fault, and retired count.
//! 2. **Memory:** The guest memory map the engine reads and writes
//!    through (any [`MemoryMap`] implementation).
//! 3. **Accounting:** The heap quota consumed by the mapping syscall and
//!    the optional taken-branch profile.

/// The budget-driven decode–execute loop.
pub mod execution;

/// Instruction-stream fetch helpers.
pub mod memory;

/// Software-interrupt dispatch and the memory-mapping syscall emulator.
pub mod syscall;

use std::collections::BTreeMap;
use std::fmt;

use crate::common::fault::Fault;
use crate::config::MachineConfig;
use crate::core::arch::reg::RegisterFile;
use crate::isa::abi;
use crate::mem::space::AddressSpace;
use crate::mem::traits::MemoryMap;

/// Architectural state of the simulated processor.
///
/// Everything here is host-visible and host-writable between resumptions:
/// the host patches registers to pass arguments, reads them to extract
/// results, and clears [`Cpu::fault`] to execute through a breakpoint.
#[derive(Debug, Clone)]
pub struct Cpu {
    /// General-purpose and special register files.
    pub regs: RegisterFile,
    /// Program counter. Always the address of the next instruction to
    /// fetch; after a fault, the address of the faulting instruction
    /// (advanced past it only for a quit).
    pub pc: u32,
    /// Condition-code register. Written only by `cmp`, read only by
    /// conditional branches.
    pub cc: u32,
    /// Pending fault. The engine refuses to execute while one is set;
    /// clearing it is the host's decision.
    pub fault: Option<Fault>,
    /// Lifetime retired-instruction count. Never reset across
    /// resumptions.
    pub insts: u64,
}

impl Cpu {
    /// Creates a zeroed processor state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            cc: 0,
            fault: None,
            insts: 0,
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

/// One simulated guest program: a [`Cpu`] plus its memory map.
///
/// The host constructs a machine, installs the guest's regions into
/// [`Machine::mem`], points [`Cpu::pc`] at the entry, and drives execution
/// with [`Machine::resume`]. All architectural state stays inspectable and
/// patchable between calls.
pub struct Machine<M: MemoryMap = AddressSpace> {
    /// Architectural processor state.
    pub cpu: Cpu,
    /// The guest memory map.
    pub mem: M,
    heap_avail: u32,
    heap_count: u32,
    profile: Option<BTreeMap<u32, u64>>,
    trace: bool,
}

impl Machine<AddressSpace> {
    /// Creates a machine over an empty address space.
    #[must_use]
    pub fn new(config: &MachineConfig) -> Self {
        Self::with_memory(AddressSpace::new(), config)
    }
}

impl Default for Machine<AddressSpace> {
    fn default() -> Self {
        Self::new(&MachineConfig::default())
    }
}

impl<M: MemoryMap> Machine<M> {
    /// Creates a machine over a caller-supplied memory map.
    pub fn with_memory(mem: M, config: &MachineConfig) -> Self {
        Self {
            cpu: Cpu::new(),
            mem,
            heap_avail: config.heap_quota,
            heap_count: 0,
            profile: config.profiling.then(BTreeMap::new),
            trace: config.trace_instructions || cfg!(feature = "always-trace"),
        }
    }

    /// Clears the pending fault so the next [`Machine::resume`] executes.
    pub const fn clear_fault(&mut self) {
        self.cpu.fault = None;
    }

    /// Bytes still available to anonymous-mapping requests.
    #[must_use]
    pub const fn heap_remaining(&self) -> u32 {
        self.heap_avail
    }

    /// The taken-branch profile, if profiling was enabled: landing address
    /// to hit count, in address order.
    #[must_use]
    pub const fn profile(&self) -> Option<&BTreeMap<u32, u64>> {
        self.profile.as_ref()
    }

    /// Takes the taken-branch profile, leaving profiling disabled.
    pub fn take_profile(&mut self) -> Option<BTreeMap<u32, u64>> {
        self.profile.take()
    }

    /// Copies out the guest-declared return buffer, or `None` when the
    /// guest never registered one (or its registration no longer reads
    /// cleanly).
    ///
    /// The guest declares the buffer by writing special registers 6
    /// (address) and 7 (length) before exiting; the host calls this after
    /// a [`Fault::Quit`] to extract the program's result.
    #[must_use]
    pub fn return_buffer(&self) -> Option<Vec<u8>> {
        let addr = self.cpu.regs.sreg(usize::from(abi::SREG_RET_BUF));
        let len = self.cpu.regs.sreg(usize::from(abi::SREG_RET_LEN));
        if addr == 0 || len == 0 {
            return None;
        }
        let mut buf = Vec::with_capacity(len as usize);
        for i in 0..len {
            buf.push(self.mem.read_u8(addr.wrapping_add(i)).ok()?);
        }
        Some(buf)
    }
}

impl<M: MemoryMap> fmt::Debug for Machine<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("cpu", &self.cpu)
            .field("heap_avail", &self.heap_avail)
            .field("heap_count", &self.heap_count)
            .field("profiling", &self.profile.is_some())
            .finish_non_exhaustive()
    }
}
