//! Sandboxed guest memory.
//!
//! This module implements the flat 32-bit guest address space. It provides:
//! 1. **Regions:** Named, host-backed spans of guest memory with optional
//!    write protection.
//! 2. **Address space:** A region arena with installation, overlap
//!    checking, and placement of dynamically grown regions.
//! 3. **Access trait:** The [`MemoryMap`](traits::MemoryMap) seam the
//!    execution engine reads and writes through.

/// A single named span of guest memory.
pub mod region;

/// The region arena backing a guest address space.
pub mod space;

/// The memory access trait used by the execution engine.
pub mod traits;
