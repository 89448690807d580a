use std::io;
use thiserror::Error;

/// Errors from loading a program image. Both are fatal to the session.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("could not read ROM: {0}")]
    Io(#[from] io::Error),

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    TooLarge { size: u64, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackFault {
    /// `CALL` with all 16 slots in use.
    Overflow,
    /// `RET` with an empty stack.
    Underflow,
}

/// A condition raised by `cycle()`. The program counter is left on the
/// faulting instruction, so running another cycle reproduces the fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("stack {kind:?} at {pc:#05X}")]
    Stack { kind: StackFault, pc: u16 },
}

impl Fault {
    /// Address of the faulting instruction.
    pub fn pc(&self) -> u16 {
        match self {
            Fault::UnknownOpcode { pc, .. } | Fault::Stack { pc, .. } => *pc,
        }
    }
}
