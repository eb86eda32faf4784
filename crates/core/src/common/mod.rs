//! Shared primitives used across the simulator core.

/// Architecture-wide constants (page geometry, instruction widths).
pub mod constants;
/// The architectural fault taxonomy reported by the engine.
pub mod fault;
