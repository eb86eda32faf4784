//! The region arena backing a guest address space.
//!
//! This module implements [`AddressSpace`], the production memory map. It
//! provides:
//! 1. **Installation:** Host placement of regions at fixed addresses with
//!    overlap and bounds checking.
//! 2. **Growth:** Automatic placement of new regions above the current
//!    high-water mark for the memory-map syscall emulation.
//! 3. **Translation:** Span-checked access to the host bytes backing a
//!    guest address range.
//!
//! Lookup is a linear scan over installed regions. Sandboxed programs map
//! a handful of regions, so the scan stays short.

use thiserror::Error;

use crate::common::constants::PAGE_SIZE;
use crate::common::fault::Fault;
use crate::mem::region::Region;
use crate::mem::traits::MemoryMap;

/// One past the highest guest address.
const SPACE_END: u64 = 1 << 32;

/// Errors reported to the host when assembling an address space.
///
/// These are host-side setup failures, distinct from the [`Fault`]s guest
/// accesses raise at run time.
#[derive(Debug, Error)]
pub enum MemError {
    /// The new region intersects one already installed.
    #[error("region `{name}` overlaps existing region `{existing}`")]
    Overlap {
        /// Name of the region being installed.
        name: String,
        /// Name of the region already occupying part of the span.
        existing: String,
    },

    /// The region runs past the top of the 32-bit address space.
    #[error("region `{name}` does not fit in the 32-bit address space")]
    OutOfAddressSpace {
        /// Name of the region being installed.
        name: String,
    },

    /// A region with the same name is already installed.
    #[error("a region named `{name}` is already installed")]
    DuplicateName {
        /// The contested name.
        name: String,
    },
}

/// A flat 32-bit guest address space composed of named regions.
///
/// Anything outside an installed region is unmapped and faults on access.
/// Address zero is never given out by [`MemoryMap::install_region`], so a
/// null guest pointer stays invalid unless the host maps it deliberately.
#[derive(Debug, Default)]
pub struct AddressSpace {
    regions: Vec<Region>,
}

impl AddressSpace {
    /// Creates an empty address space with nothing mapped.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Installs a region at its fixed base address.
    ///
    /// # Errors
    ///
    /// Returns [`MemError`] if the region runs past the top of the address
    /// space, reuses an installed name, or overlaps an installed region.
    pub fn install_at(&mut self, region: Region) -> Result<(), MemError> {
        if region.end() > SPACE_END {
            return Err(MemError::OutOfAddressSpace {
                name: region.name().to_owned(),
            });
        }
        for existing in &self.regions {
            if existing.name() == region.name() {
                return Err(MemError::DuplicateName {
                    name: region.name().to_owned(),
                });
            }
            let disjoint = region.end() <= u64::from(existing.base())
                || u64::from(region.base()) >= existing.end();
            if !disjoint {
                return Err(MemError::Overlap {
                    name: region.name().to_owned(),
                    existing: existing.name().to_owned(),
                });
            }
        }
        self.regions.push(region);
        Ok(())
    }

    /// The installed regions, in installation order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Looks up an installed region by name.
    #[must_use]
    pub fn region_named(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name() == name)
    }

    /// Borrows the host bytes backing `len` guest bytes at `addr`, or
    /// `None` if the span is not contained in one region. A zero-length
    /// span always translates.
    #[must_use]
    pub fn translate(&self, addr: u32, len: u32) -> Option<&[u8]> {
        if len == 0 {
            return Some(&[]);
        }
        self.regions.iter().find_map(|r| r.slice(addr, len))
    }

    /// Mutably borrows the host bytes backing `len` guest bytes at `addr`.
    ///
    /// This is host-privileged access: write protection applies to guest
    /// stores only, so loaders may poke read-only code regions through
    /// this method.
    #[must_use]
    pub fn translate_mut(&mut self, addr: u32, len: u32) -> Option<&mut [u8]> {
        if len == 0 {
            return Some(&mut []);
        }
        self.regions.iter_mut().find_map(|r| r.slice_mut(addr, len))
    }

    /// Lowest page-aligned address above every installed region, at least
    /// one page so address zero is never handed out.
    fn high_water(&self) -> u64 {
        let top = self.regions.iter().map(Region::end).max().unwrap_or(0);
        top.max(u64::from(PAGE_SIZE))
            .next_multiple_of(u64::from(PAGE_SIZE))
    }

    /// Reads guest bytes for a load, faulting on any unmapped span.
    fn load(&self, addr: u32, len: u32) -> Result<&[u8], Fault> {
        self.translate(addr, len).ok_or(Fault::InvalidMemoryAccess)
    }

    /// Writes guest bytes for a store. The whole span is validated before
    /// any byte is written, so a faulting store mutates nothing.
    fn store(&mut self, addr: u32, bytes: &[u8]) -> Result<(), Fault> {
        let len = bytes.len() as u32;
        let Some(region) = self.regions.iter_mut().find(|r| r.contains(addr, len)) else {
            return Err(Fault::InvalidMemoryAccess);
        };
        if region.is_read_only() {
            return Err(Fault::InvalidMemoryAccess);
        }
        let Some(dst) = region.slice_mut(addr, len) else {
            return Err(Fault::InvalidMemoryAccess);
        };
        dst.copy_from_slice(bytes);
        Ok(())
    }
}

impl MemoryMap for AddressSpace {
    fn read_u8(&self, addr: u32) -> Result<u8, Fault> {
        let bytes = self.load(addr, 1)?;
        Ok(bytes[0])
    }

    fn read_u16(&self, addr: u32) -> Result<u16, Fault> {
        let bytes = self.load(addr, 2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_u32(&self, addr: u32) -> Result<u32, Fault> {
        let bytes = self.load(addr, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn write_u8(&mut self, addr: u32, val: u8) -> Result<(), Fault> {
        self.store(addr, &[val])
    }

    fn write_u16(&mut self, addr: u32, val: u16) -> Result<(), Fault> {
        self.store(addr, &val.to_le_bytes())
    }

    fn write_u32(&mut self, addr: u32, val: u32) -> Result<(), Fault> {
        self.store(addr, &val.to_le_bytes())
    }

    fn maps(&self, addr: u32, len: u32) -> bool {
        self.translate(addr, len).is_some()
    }

    fn install_region(&mut self, name: &str, len: u32) -> Option<u32> {
        if len == 0 {
            return None;
        }
        let base = self.high_water();
        if base + u64::from(len) > SPACE_END {
            return None;
        }
        let base = base as u32;
        self.install_at(Region::zeroed(name, base, len)).ok()?;
        Some(base)
    }
}
