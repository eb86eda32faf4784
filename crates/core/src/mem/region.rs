//! Named guest memory regions.

use std::fmt;

/// A contiguous span of guest memory backed by host storage.
///
/// A region covers `[base, base + len)` in the guest address space. The
/// end is tracked in 64-bit arithmetic so a region may extend to the very
/// top of the 32-bit space without wrapping.
#[derive(Clone)]
pub struct Region {
    name: String,
    base: u32,
    data: Vec<u8>,
    read_only: bool,
}

impl Region {
    /// Creates a region at `base` backed by `data`.
    pub fn new(name: impl Into<String>, base: u32, data: Vec<u8>, read_only: bool) -> Self {
        Self {
            name: name.into(),
            base,
            data,
            read_only,
        }
    }

    /// Creates a zero-filled writable region of `len` bytes at `base`.
    pub fn zeroed(name: impl Into<String>, base: u32, len: u32) -> Self {
        Self::new(name, base, vec![0; len as usize], false)
    }

    /// The region's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The guest address of the first byte.
    #[must_use]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// The region length in bytes.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.data.len() as u32
    }

    /// Whether the region holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// One past the last guest address, in 64-bit arithmetic.
    #[must_use]
    pub fn end(&self) -> u64 {
        self.base as u64 + self.data.len() as u64
    }

    /// Whether guest stores to this region fault.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Reports whether `len` bytes starting at `addr` fall entirely
    /// inside this region.
    #[must_use]
    pub fn contains(&self, addr: u32, len: u32) -> bool {
        addr >= self.base && u64::from(addr) + u64::from(len) <= self.end()
    }

    /// Borrows `len` bytes starting at guest address `addr`, or `None` if
    /// the span leaves the region.
    #[must_use]
    pub fn slice(&self, addr: u32, len: u32) -> Option<&[u8]> {
        if !self.contains(addr, len) {
            return None;
        }
        let off = (addr - self.base) as usize;
        Some(&self.data[off..off + len as usize])
    }

    /// Mutably borrows `len` bytes starting at guest address `addr`.
    /// Ignores write protection: callers enforce it.
    #[must_use]
    pub fn slice_mut(&mut self, addr: u32, len: u32) -> Option<&mut [u8]> {
        if !self.contains(addr, len) {
            return None;
        }
        let off = (addr - self.base) as usize;
        Some(&mut self.data[off..off + len as usize])
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("name", &self.name)
            .field("base", &format_args!("{:#010x}", self.base))
            .field("len", &self.data.len())
            .field("read_only", &self.read_only)
            .finish()
    }
}
