//! The extended ASCII table
//!
//! Used for single-byte encodings that are identical to ASCII below 128. Each
//! byte from 128 to 255 gets a record holding its character as UTF-8, and the
//! canonical decomposition of that character when it differs. The
//! decomposition is needed to match file names, which the host file system
//! stores in decomposed form.

use read_charmaps::Charmap;
use unicode_normalization::UnicodeNormalization;

use crate::{
    classify::{classify, HighChars, Unsupported},
    write::{TableWrite, TableWriter},
};

/// A table for converting from extended ASCII.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedAscii {
    high_chars: HighChars,
}

impl ExtendedAscii {
    pub fn new(high_chars: HighChars) -> Self {
        ExtendedAscii { high_chars }
    }

    /// Build the table for a charmap, if the charmap qualifies.
    pub fn from_charmap(charmap: &Charmap) -> Result<Self, Unsupported> {
        classify(charmap).map(ExtendedAscii::new)
    }

    /// The character for `byte`.
    ///
    /// Bytes below 128 are always ASCII.
    pub fn get(&self, byte: u8) -> Option<char> {
        match byte.checked_sub(0x80) {
            Some(idx) => self.high_chars[idx as usize],
            None => Some(byte as char),
        }
    }

    pub fn high_chars(&self) -> &HighChars {
        &self.high_chars
    }
}

impl TableWrite for ExtendedAscii {
    fn write_into(&self, writer: &mut TableWriter) {
        let mut buf = [0u8; 4];
        for ch in &self.high_chars {
            let Some(ch) = ch else {
                writer.write_len_prefixed(&[]);
                writer.write_len_prefixed(&[]);
                continue;
            };
            let composed = ch.encode_utf8(&mut buf);
            let decomposed: String = std::iter::once(*ch).nfd().collect();
            writer.write_len_prefixed(composed.as_bytes());
            if decomposed == *composed {
                writer.write_len_prefixed(&[]);
            } else {
                writer.write_len_prefixed(decomposed.as_bytes());
            }
        }
    }
}
