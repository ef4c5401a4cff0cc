//! Reading legacy character maps
//!
//! This crate parses the tab-separated mapping files that describe how the
//! bytes of a legacy 8-bit platform encoding correspond to Unicode, and
//! assembles them into a [`Charmap`].
//!
//! A mapping file has one entry per line:
//!
//! ```text
//! 0x80	0x00C4	# LATIN CAPITAL LETTER A WITH DIAERESIS
//! 0x8140	0x3000	# two-byte entry
//! 0x41+0x301	0x00C1	# digraph
//! 0xC1	<RL>+0x060C	# directional context
//! ```
//!
//! The [`tables`] module provides the consumer side of the compiled table
//! format produced by [`write-charmaps`]: zero-copy views that walk the
//! serialized bytes the same way the runtime conversion library does.
//!
//! # Example
//!
//! ```
//! use read_charmaps::{Charmap, Key};
//! let charmap = Charmap::read("0x80\t0x00C4\n").unwrap();
//! let entry = charmap.get(Key::OneByte(0x80)).unwrap();
//! assert_eq!(entry.unicode(), &['Ä']);
//! ```
//!
//! [`write-charmaps`]: https://docs.rs/write-charmaps/

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod charmap;
mod entry;
mod error;
mod parse;
pub mod tables;

pub use charmap::Charmap;
pub use entry::{Direction, Entry, Key, MAX_SEQUENCE_LEN};
pub use error::{ParseError, ParseErrorKind};
pub use parse::parse_line;
