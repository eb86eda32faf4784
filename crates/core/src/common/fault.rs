//! Architectural faults.
//!
//! A [`Fault`] is architectural state, not a host error: the engine records
//! at most one pending fault on the CPU and reports it from
//! [`Machine::resume`](crate::Machine::resume). Recovery policy belongs to
//! the host — inspect and resume (trap), extract results (quit), or tear
//! the guest down (illegal instruction, invalid memory access). The engine
//! never clears a fault on its own.

use std::fmt;

/// Terminal or pausable exceptional conditions raised by the engine.
///
/// The taxonomy is deliberately small: every guest misbehavior folds into
/// one of these four conditions. Budget exhaustion is *not* a fault;
/// `resume` reports it as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    /// Unrecognized opcode, sub-opcode, or branch condition index, or a
    /// division/remainder with a zero divisor. Fatal to the run.
    IllegalInstruction,
    /// A fetch, load, store, or translation fell outside every region or
    /// wrote to a read-only region. Fatal to the run.
    InvalidMemoryAccess,
    /// A breakpoint instruction executed. The program counter is rewound so
    /// the breakpoint is re-fetched once the host clears the fault.
    Trap,
    /// The guest requested termination through the exit interrupt. Not an
    /// error: the host extracts results and discards the machine.
    Quit,
}

impl Fault {
    /// `true` for faults the host may clear and execute through without
    /// resetting the guest.
    pub const fn is_resumable(self) -> bool {
        matches!(self, Self::Trap)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalInstruction => write!(f, "illegal instruction"),
            Self::InvalidMemoryAccess => write!(f, "invalid memory access"),
            Self::Trap => write!(f, "execution trap (breakpoint)"),
            Self::Quit => write!(f, "guest requested termination"),
        }
    }
}

impl std::error::Error for Fault {}
