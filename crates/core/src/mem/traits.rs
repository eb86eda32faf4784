//! Memory access trait for the execution engine.
//!
//! This module defines the [`MemoryMap`] trait the engine performs every
//! guest access through. It provides:
//! 1. **Access:** Byte, halfword, and word reads and writes at guest
//!    addresses, little-endian, each able to fault.
//! 2. **Validation:** Span checks for guest-supplied pointers without
//!    performing an access.
//! 3. **Growth:** Installation of new writable regions on behalf of the
//!    memory-map syscall emulation.
//!
//! Accesses never wrap around the address space: a span that would run
//! past the last mapped byte of a region faults rather than continuing
//! into a neighbour.

use crate::common::fault::Fault;

/// Trait for the guest memory map the execution engine runs against.
///
/// [`AddressSpace`](crate::mem::space::AddressSpace) is the production
/// implementation; tests substitute mocks to inject faults at precise
/// points.
pub trait MemoryMap {
    /// Reads one byte at a guest address.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidMemoryAccess`] if the address is unmapped.
    fn read_u8(&self, addr: u32) -> Result<u8, Fault>;

    /// Reads two bytes (little-endian) at a guest address.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidMemoryAccess`] unless both bytes lie in one
    /// mapped region.
    fn read_u16(&self, addr: u32) -> Result<u16, Fault>;

    /// Reads four bytes (little-endian) at a guest address.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidMemoryAccess`] unless all four bytes lie in
    /// one mapped region.
    fn read_u32(&self, addr: u32) -> Result<u32, Fault>;

    /// Writes one byte at a guest address.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidMemoryAccess`] if the address is unmapped
    /// or the region is write-protected.
    fn write_u8(&mut self, addr: u32, val: u8) -> Result<(), Fault>;

    /// Writes two bytes (little-endian) at a guest address.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidMemoryAccess`] unless both bytes lie in one
    /// mapped writable region. A failed write mutates nothing.
    fn write_u16(&mut self, addr: u32, val: u16) -> Result<(), Fault>;

    /// Writes four bytes (little-endian) at a guest address.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidMemoryAccess`] unless all four bytes lie in
    /// one mapped writable region. A failed write mutates nothing.
    fn write_u32(&mut self, addr: u32, val: u32) -> Result<(), Fault>;

    /// Reports whether `len` bytes starting at `addr` lie entirely inside
    /// one mapped region. A zero-length span is vacuously mapped.
    fn maps(&self, addr: u32, len: u32) -> bool;

    /// Installs a new zero-filled writable region of `len` bytes, placed
    /// by the implementation, and returns its base address. Returns `None`
    /// when the region cannot be placed.
    fn install_region(&mut self, name: &str, len: u32) -> Option<u32>;
}
