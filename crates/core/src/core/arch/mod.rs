//! Architecture-specific components.
//!
//! This module contains the architectural register state and the
//! condition-code model:
//! 1. **Registers:** The general-purpose and special register files.
//! 2. **Conditions:** Compare-flag computation and branch condition tests.

/// Condition-code flags, comparison, and branch condition tests.
pub mod cond;

/// General-purpose and special register files.
pub mod reg;
