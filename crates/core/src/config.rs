//! Configuration for a simulated machine.
//!
//! This module defines [`MachineConfig`], the parameters fixed at machine
//! construction. It provides:
//! 1. **Defaults:** Documented baseline constants in the `defaults` module.
//! 2. **Deserialization:** Construction from JSON for embedding hosts.
//!
//! Everything not covered here — initial regions, entry point, stack
//! placement — is installed by the host through the machine's architectural
//! state after construction.

use serde::Deserialize;

/// Default configuration constants for the machine.
mod defaults {
    /// Heap quota in bytes (16 MiB).
    ///
    /// Total memory the guest may obtain through the anonymous-mapping
    /// syscall over the machine's lifetime. There is no unmap, so the
    /// quota is never replenished.
    pub const HEAP_QUOTA: u32 = 16 * 1024 * 1024;
}

/// Parameters fixed when a [`Machine`](crate::Machine) is constructed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Bytes available to anonymous-mapping requests. Decremented on every
    /// successful mapping, never replenished.
    pub heap_quota: u32,
    /// Record a hit count per taken-branch landing address.
    pub profiling: bool,
    /// Emit a `trace!` event for every retired instruction. Off by
    /// default so the interpreter loop stays quiet.
    pub trace_instructions: bool,
}

impl MachineConfig {
    /// Parses a configuration from a JSON document. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error for malformed input.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            heap_quota: defaults::HEAP_QUOTA,
            profiling: false,
            trace_instructions: false,
        }
    }
}
