//! Compiling legacy character maps
//!
//! This crate turns a [`Charmap`][read::Charmap] into the compact binary
//! tables used by the runtime text conversion library.
//!
//! There are two kinds of table:
//!
//! - an [extended ASCII][ExtendedAscii] table, for single-byte encodings
//!   that match ASCII below 128 and map each remaining byte to at most one
//!   character;
//! - a [state machine][StateTable], compiled from a [`Trie`] of
//!   variable-length byte sequences, which a converter walks one byte at a
//!   time without backtracking.
//!
//! # Example
//!
//! ```
//! use write_charmaps::{compile, read::Charmap};
//! let charmap = Charmap::read("0x41\t0x0041\n0x80\t0x00C4\n").unwrap();
//! let bytes = compile(&charmap).unwrap().serialize();
//! assert_eq!(bytes[0], 1);
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod classify;
pub mod encoder;
mod error;
mod extended_ascii;
pub mod state_machine;
mod table;
mod write;

pub use classify::{classify, HighChars, Unsupported};
pub use error::CompileError;
pub use extended_ascii::ExtendedAscii;
pub use state_machine::{StateTable, Trie, TrieError};
pub use table::{compile, compile_encoder, Table};
pub use write::{dump_table, TableWrite, TableWriter};

/// Public re-export of the read-charmaps crate.
pub extern crate read_charmaps as read;
