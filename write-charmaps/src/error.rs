//! Errors that occur while compiling a charmap

use crate::{classify::Unsupported, state_machine::TrieError};

/// An error occured while compiling a charmap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileError {
    /// The charmap cannot be represented; callers may skip it.
    Unsupported(Unsupported),
    /// The charmap's mappings could not be compiled into a state machine.
    Trie(TrieError),
}

impl CompileError {
    /// Returns `true` if this charmap should be skipped rather than treated
    /// as a failure.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CompileError::Unsupported(_))
    }
}

impl From<Unsupported> for CompileError {
    fn from(src: Unsupported) -> CompileError {
        CompileError::Unsupported(src)
    }
}

impl From<TrieError> for CompileError {
    fn from(src: TrieError) -> CompileError {
        CompileError::Trie(src)
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Unsupported(error) => error.fmt(f),
            CompileError::Trie(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Unsupported(error) => Some(error),
            CompileError::Trie(error) => Some(error),
        }
    }
}
