//! Instruction-set definition for the 32-bit sandbox guest CPU.
//!
//! The ISA uses 16-bit little-endian instruction words in three forms,
//! selected by the top two bits:
//!
//! 1. **Form 1** (`0…`): an 8-bit opcode and two 4-bit register fields.
//! 2. **Form 2** (`10…`): a 2-bit sub-opcode, a 4-bit register field, and
//!    an 8-bit immediate.
//! 3. **Form 3** (`11…`): a conditional branch with a 4-bit condition
//!    index and a signed 10-bit word displacement.
//!
//! Several form-1 operations additionally consume a 32-bit immediate or a
//! sign-extended 16-bit offset from the instruction stream; the engine
//! fetches those trailing fields itself and advances the program counter
//! accordingly.

/// Guest ABI constants: register conventions, interrupt numbers, errno.
pub mod abi;
/// Instruction-word decoding (bits → tagged record).
pub mod decode;
/// The tagged instruction record and its operation enums.
pub mod instruction;
/// Form-1 opcode bytes and form-2 sub-opcode values.
pub mod opcodes;
