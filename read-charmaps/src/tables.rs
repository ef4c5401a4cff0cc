//! Reading compiled charmap tables
//!
//! A compiled table starts with one byte identifying its [`TableKind`],
//! followed by a kind-specific payload.

pub mod extended_ascii;
pub mod state_machine;

use std::fmt::{Display, Formatter};

pub use extended_ascii::{ExtendedAsciiTable, HighChar};
pub use state_machine::{StateMachineTable, Transition};

/// Identifies the layout of a compiled table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TableKind {
    /// 128 records for bytes 128..=255 of an ASCII-compatible encoding.
    ExtendedAscii = 1,
    /// A flat array of 256-slot automaton states.
    StateMachine = 2,
}

impl TableKind {
    pub fn from_u8(raw: u8) -> Option<TableKind> {
        match raw {
            1 => Some(TableKind::ExtendedAscii),
            2 => Some(TableKind::StateMachine),
            _ => None,
        }
    }

    /// The discriminator byte written at the start of the table.
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Any compiled table.
#[derive(Clone, Debug)]
pub enum CompiledTable<'a> {
    ExtendedAscii(ExtendedAsciiTable<'a>),
    StateMachine(StateMachineTable<'a>),
}

impl<'a> CompiledTable<'a> {
    /// Read a table, dispatching on its leading discriminator byte.
    pub fn read(data: &'a [u8]) -> Result<Self, ReadError> {
        let (&kind, payload) = data.split_first().ok_or(ReadError::OutOfBounds)?;
        match TableKind::from_u8(kind) {
            Some(TableKind::ExtendedAscii) => {
                ExtendedAsciiTable::read(payload).map(CompiledTable::ExtendedAscii)
            }
            Some(TableKind::StateMachine) => {
                StateMachineTable::read(payload).map(CompiledTable::StateMachine)
            }
            None => Err(ReadError::InvalidKind(kind)),
        }
    }

    pub fn kind(&self) -> TableKind {
        match self {
            CompiledTable::ExtendedAscii(_) => TableKind::ExtendedAscii,
            CompiledTable::StateMachine(_) => TableKind::StateMachine,
        }
    }
}

/// An error that occurs when reading a compiled table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The data ended in the middle of a record.
    OutOfBounds,
    /// The discriminator byte is not a known [`TableKind`].
    InvalidKind(u8),
    /// The payload has the wrong length for its kind.
    InvalidLength(usize),
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "table data ended unexpectedly"),
            ReadError::InvalidKind(kind) => write!(f, "Invalid table kind '{kind}'"),
            ReadError::InvalidLength(len) => write!(f, "Invalid table length {len}"),
        }
    }
}

impl std::error::Error for ReadError {}
