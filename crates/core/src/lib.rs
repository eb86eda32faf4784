//! # sbxsim-core
//!
//! Execution core of the sbxsim sandbox: a deterministic instruction-set
//! simulator for a small 32-bit load/store guest CPU. It provides:
//!
//! 1. **Decode–Execute Engine:** a budget-limited fetch/decode/dispatch
//!    loop reproducing the guest architecture's exact bit-level,
//!    signedness, endianness, and program-counter semantics.
//! 2. **Fault Taxonomy:** illegal instruction, invalid memory access,
//!    breakpoint trap, and guest-requested quit, left on the machine as
//!    inspectable, resumable architectural state.
//! 3. **Syscall Emulation:** the anonymous memory-mapping interrupt guests
//!    use to grow their heap under a fixed byte quota.
//! 4. **Guest Address Space:** disjoint, named, bounds-checked memory
//!    regions behind a pluggable manager trait.
//!
//! The host installs the guest's initial regions, points the program
//! counter at its entry, and drives execution with [`Machine::resume`],
//! inspecting or patching architectural state between resumptions.

/// Shared primitives: faults and architecture-wide constants.
pub mod common;
/// Machine configuration (heap quota, profiling, instruction tracing).
pub mod config;
/// Architectural state and the decode–execute engine.
pub mod core;
/// Instruction-set definition: ABI constants, opcodes, decoder.
pub mod isa;
/// Guest memory: regions, address space, manager trait.
pub mod mem;

pub use self::common::fault::Fault;
pub use self::config::MachineConfig;
pub use self::core::cpu::{Cpu, Machine};
pub use self::mem::region::Region;
pub use self::mem::space::{AddressSpace, MemError};
pub use self::mem::traits::MemoryMap;
