//! Core processor implementation.
//!
//! This module contains the execution engine: the architectural register
//! state, the condition-code model, and the machine that drives the
//! decode-execute loop against a memory map.

/// Architecture-specific components (register file, condition codes).
pub mod arch;

/// The processor state and the budget-driven execution engine.
pub mod cpu;

pub use self::cpu::{Cpu, Machine};
