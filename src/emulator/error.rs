//! Everything that can go wrong while loading or running a program.

use thiserror::Error;

/// Failures raised while executing cycles.
///
/// Only some of them stop the machine, see [`EmulatorError::is_fatal`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EmulatorError {
    #[error("stack underflow: return at {address:#05x} with an empty call stack")]
    StackUnderflow { address: u16 },

    #[error("stack overflow: call at {address:#05x} with all {depth} frames in use, call skipped")]
    StackOverflow { address: u16, depth: usize },

    #[error("unknown opcode {opcode:#06x} at {address:#05x}")]
    UnknownOpcode { opcode: u16, address: u16 },

    #[error("program counter {address:#05x} is outside of memory")]
    ProgramCounterOutOfBounds { address: u16 },

    #[error("the machine is halted")]
    Halted,
}

impl EmulatorError {
    /// Whether the machine halts on this error.
    ///
    /// Non-fatal errors are reported, and execution continues with the next instruction.
    pub fn is_fatal(&self) -> bool {
        match self {
            EmulatorError::StackOverflow { .. } | EmulatorError::UnknownOpcode { .. } => false,
            EmulatorError::StackUnderflow { .. }
            | EmulatorError::ProgramCounterOutOfBounds { .. }
            | EmulatorError::Halted => true,
        }
    }
}

/// Failures raised while loading a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("program is too large ({size} bytes), at most {max} bytes fit")]
    TooLarge { size: usize, max: usize },

    #[error("could not read program")]
    Io(#[from] std::io::Error),
}
