use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Chip8Error {
    Io(std::io::Error),
    RomTooLarge { size: usize, max: usize },
    InvalidHexRom(hex::FromHexError),
    ProgramCounterOutOfBounds(u16),
    InvalidOpcode { opcode: u16, pc: u16 },
    StackOverflow { pc: u16 },
    StackUnderflow { pc: u16 },
    MemoryOutOfBounds { address: usize, pc: u16 },
    InvalidArgument(&'static str),
}

impl Chip8Error {
    /// Faults raised by the executor while running a program, as opposed to load or setup errors.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            Self::ProgramCounterOutOfBounds(_)
                | Self::InvalidOpcode { .. }
                | Self::StackOverflow { .. }
                | Self::StackUnderflow { .. }
                | Self::MemoryOutOfBounds { .. }
        )
    }
}

impl Display for Chip8Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::RomTooLarge { size, max } => {
                write!(f, "ROM too large: {size} bytes (max {max})")
            }
            Self::InvalidHexRom(error) => write!(f, "invalid hex ROM: {error}"),
            Self::ProgramCounterOutOfBounds(pc) => {
                write!(f, "program counter exceeded program memory: 0x{pc:03x}")
            }
            Self::InvalidOpcode { opcode, pc } => {
                write!(f, "invalid opcode: 0x{opcode:04x} at 0x{pc:03x}")
            }
            Self::StackOverflow { pc } => {
                write!(f, "call instruction with full stack at 0x{pc:03x}")
            }
            Self::StackUnderflow { pc } => {
                write!(f, "return instruction with empty stack at 0x{pc:03x}")
            }
            Self::MemoryOutOfBounds { address, pc } => {
                write!(f, "memory access out of bounds: 0x{address:04x} at 0x{pc:03x}")
            }
            Self::InvalidArgument(argument) => write!(f, "invalid argument: {argument}"),
        }
    }
}

impl std::error::Error for Chip8Error {}

impl From<std::io::Error> for Chip8Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<hex::FromHexError> for Chip8Error {
    fn from(value: hex::FromHexError) -> Self {
        Self::InvalidHexRom(value)
    }
}
