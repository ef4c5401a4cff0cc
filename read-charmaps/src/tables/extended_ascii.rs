//! The extended ASCII table
//!
//! The payload is 128 records, one for each byte from 128 to 255:
//!
//! ```text
//! [composed len: u8][composed UTF-8][decomposed len: u8][decomposed UTF-8]
//! ```
//!
//! An unmapped byte has a zero-length composed sequence. The decomposed
//! sequence is only present when it differs from the composed one.

use super::ReadError;

/// The number of records in the table.
pub const NUM_HIGH_CHARS: usize = 128;

/// A view of a serialized extended ASCII table.
#[derive(Clone, Debug)]
pub struct ExtendedAsciiTable<'a> {
    records: Vec<HighChar<'a>>,
}

/// The record for one byte in the range 128..=255.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighChar<'a> {
    /// The UTF-8 encoding of the character, empty if the byte is unmapped.
    pub composed: &'a [u8],
    /// The canonical decomposition, empty if it is identical to `composed`.
    pub decomposed: &'a [u8],
}

impl<'a> HighChar<'a> {
    pub fn is_mapped(&self) -> bool {
        !self.composed.is_empty()
    }

    /// The composed form as a string, if it is valid UTF-8.
    pub fn composed_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.composed).ok()
    }

    /// The decomposed form, falling back to the composed form.
    pub fn decomposed_str(&self) -> Option<&'a str> {
        if self.decomposed.is_empty() {
            self.composed_str()
        } else {
            std::str::from_utf8(self.decomposed).ok()
        }
    }
}

impl<'a> ExtendedAsciiTable<'a> {
    /// Read the payload of an extended ASCII table (without the kind byte).
    pub fn read(data: &'a [u8]) -> Result<Self, ReadError> {
        let mut cursor = Cursor { data, pos: 0 };
        let mut records = Vec::with_capacity(NUM_HIGH_CHARS);
        for _ in 0..NUM_HIGH_CHARS {
            let composed = cursor.read_prefixed()?;
            let decomposed = cursor.read_prefixed()?;
            records.push(HighChar {
                composed,
                decomposed,
            });
        }
        if cursor.pos != data.len() {
            return Err(ReadError::InvalidLength(data.len()));
        }
        Ok(ExtendedAsciiTable { records })
    }

    /// The record for `byte`, or `None` if `byte` is below 128.
    pub fn high_char(&self, byte: u8) -> Option<HighChar<'a>> {
        byte.checked_sub(0x80)
            .and_then(|idx| self.records.get(idx as usize))
            .copied()
    }

    /// Decode a single byte.
    ///
    /// Bytes below 128 are ASCII. Returns `None` for unmapped bytes.
    pub fn decode_byte(&self, byte: u8) -> Option<char> {
        if byte < 0x80 {
            return Some(byte as char);
        }
        self.high_char(byte)?.composed_str()?.chars().next()
    }

    /// Iterate over the records for bytes 128..=255, in order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, HighChar<'a>)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(i, rec)| (0x80 + i as u8, *rec))
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn read_prefixed(&mut self) -> Result<&'a [u8], ReadError> {
        let len = *self.data.get(self.pos).ok_or(ReadError::OutOfBounds)? as usize;
        let start = self.pos + 1;
        let bytes = self
            .data
            .get(start..start + len)
            .ok_or(ReadError::OutOfBounds)?;
        self.pos = start + len;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_table() {
        let data = [0u8; NUM_HIGH_CHARS * 2];
        let table = ExtendedAsciiTable::read(&data).unwrap();
        assert!(table.iter().all(|(_, rec)| !rec.is_mapped()));
        assert_eq!(table.decode_byte(b'a'), Some('a'));
        assert_eq!(table.decode_byte(0x80), None);
        assert_eq!(table.high_char(0x7f), None);
    }

    #[test]
    fn walk_records() {
        // 0x80 -> U+00C4 with decomposition, 0x81 -> U+2022 without
        let mut data = vec![2, 0xc3, 0x84, 3, b'A', 0xcc, 0x88];
        data.extend([3, 0xe2, 0x80, 0xa2, 0]);
        data.extend([0u8; (NUM_HIGH_CHARS - 2) * 2]);
        let table = ExtendedAsciiTable::read(&data).unwrap();

        let rec = table.high_char(0x80).unwrap();
        assert_eq!(rec.composed_str(), Some("\u{c4}"));
        assert_eq!(rec.decomposed_str(), Some("A\u{308}"));
        let rec = table.high_char(0x81).unwrap();
        assert_eq!(rec.decomposed, &[] as &[u8]);
        assert_eq!(rec.decomposed_str(), Some("\u{2022}"));
        assert_eq!(table.decode_byte(0x81), Some('\u{2022}'));
        assert_eq!(table.decode_byte(0xff), None);
    }

    #[test]
    fn truncated() {
        let data = [0u8; NUM_HIGH_CHARS * 2 - 1];
        assert_eq!(
            ExtendedAsciiTable::read(&data).unwrap_err(),
            ReadError::OutOfBounds
        );
        let data = [5u8, 1, 2];
        assert_eq!(
            ExtendedAsciiTable::read(&data).unwrap_err(),
            ReadError::OutOfBounds
        );
    }

    #[test]
    fn trailing_bytes() {
        let data = [0u8; NUM_HIGH_CHARS * 2 + 1];
        assert_eq!(
            ExtendedAsciiTable::read(&data).unwrap_err(),
            ReadError::InvalidLength(NUM_HIGH_CHARS * 2 + 1)
        );
    }
}
