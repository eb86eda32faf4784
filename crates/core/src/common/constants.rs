//! Architecture-wide constants.

/// Guest page size in bytes. Anonymous mappings are granted in whole pages,
/// and requested lengths must be page multiples.
pub const PAGE_SIZE: u32 = 4096;

/// Number of general-purpose registers.
pub const GPR_COUNT: usize = 16;

/// Number of special registers (addressed by an 8-bit index).
pub const SREG_COUNT: usize = 256;

/// Width of one instruction word in bytes. The program counter advances by
/// this after every instruction that does not override it.
pub const INST_BYTES: u32 = 2;

/// Width of the 32-bit immediate trailing the `ldi`/`lda`/`sta`/`jsra`/
/// `jmpa`/`swi` instruction words.
pub const WORD_IMM_BYTES: u32 = 4;

/// Width of the 16-bit literal offset trailing the `ldo`/`sto` family.
pub const HALF_IMM_BYTES: u32 = 2;
