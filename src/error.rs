use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Failures that stop the interpreter. Unknown opcodes are not in here; they
/// get logged and skipped.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("memory access out of bounds: {len} byte(s) at {addr:#05x}")]
    OutOfBounds { addr: usize, len: usize },
    #[error("stack overflow calling from {pc:#05x}")]
    StackOverflow { pc: u16 },
    #[error("stack underflow returning from {pc:#05x}")]
    StackUnderflow { pc: u16 },
    #[error("program of {len} bytes does not fit in {capacity} bytes of program memory")]
    RomTooLarge { len: usize, capacity: usize },
    #[error("audio error: {0}")]
    Audio(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl Chip8Error {
    /// true for the stack conditions, so hosts can tell them apart from memory faults
    pub fn is_stack_fault(&self) -> bool {
        matches!(
            self,
            Chip8Error::StackOverflow { .. } | Chip8Error::StackUnderflow { .. }
        )
    }
}
