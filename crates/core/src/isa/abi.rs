//! Guest ABI constants.
//!
//! Register conventions and the numeric values the guest toolchain bakes
//! into binaries: interrupt numbers, mapping/protection flags, and errno
//! values. These belong to the *guest* ABI and are fixed here rather than
//! taken from the host's libc, so guest behavior is identical on every
//! host platform.

/// Register 0: frame pointer.
pub const REG_FP: usize = 0;
/// Register 1: stack pointer.
pub const REG_SP: usize = 1;
/// Register 2: first argument and syscall result.
pub const REG_A0: usize = 2;
/// Register 3: second argument.
pub const REG_A1: usize = 3;
/// Register 4: third argument.
pub const REG_A2: usize = 4;
/// Register 5: fourth argument.
pub const REG_A3: usize = 5;
/// Register 6: fifth argument.
pub const REG_A4: usize = 6;
/// Register 7: sixth argument.
pub const REG_A5: usize = 7;

/// Special register recording the class of the last exception.
pub const SREG_EX_CLASS: u8 = 2;
/// Special register recording the argument of the last exception (the
/// interrupt number, for software interrupts).
pub const SREG_EX_ARG: u8 = 3;
/// Special register holding the guest-declared return-buffer address.
/// Writes are validated against the memory map.
pub const SREG_RET_BUF: u8 = 6;
/// Special register holding the return-buffer length in bytes. Writable
/// only once [`SREG_RET_BUF`] holds a translatable address.
pub const SREG_RET_LEN: u8 = 7;

/// Exception class stored in [`SREG_EX_CLASS`] by a software interrupt,
/// the only exception class the engine records.
pub const EX_CLASS_SWI: u32 = 3;

/// Interrupt number: guest-requested termination.
pub const SYS_EXIT: u32 = 1;
/// Interrupt number: anonymous memory mapping.
pub const SYS_MMAP: u32 = 90;

/// Protection flag: readable.
pub const PROT_READ: u32 = 0x1;
/// Protection flag: writable.
pub const PROT_WRITE: u32 = 0x2;
/// Protection flag: executable.
pub const PROT_EXEC: u32 = 0x4;

/// Mapping flag: private.
pub const MAP_PRIVATE: u32 = 0x02;
/// Mapping flag: anonymous (not file-backed).
pub const MAP_ANONYMOUS: u32 = 0x20;

/// Guest errno: invalid argument.
pub const EINVAL: u32 = 22;
/// Guest errno: out of memory.
pub const ENOMEM: u32 = 12;
