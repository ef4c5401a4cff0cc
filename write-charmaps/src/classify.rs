//! Deciding which table representation a charmap can use

use std::fmt::{Display, Formatter};

use read_charmaps::{Charmap, Direction};

/// The characters for bytes 128..=255, indexed by `byte - 128`.
pub type HighChars = [Option<char>; 128];

/// A charmap cannot be represented by the conversion tables.
///
/// This is not fatal: callers are expected to skip the charmap and carry on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unsupported {
    message: String,
}

impl Unsupported {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Unsupported {
            message: message.into(),
        }
    }

    /// A human-readable reason.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Unsupported {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported charmap: {}", self.message)
    }
}

impl std::error::Error for Unsupported {}

/// Check that `charmap` can be compiled to an extended ASCII table.
///
/// On success, returns the character for each byte from 128 to 255.
pub fn classify(charmap: &Charmap) -> Result<HighChars, Unsupported> {
    if charmap.one_byte().is_empty() {
        return Err(Unsupported::new("missing one-byte map"));
    }
    if !charmap.two_byte().is_empty() {
        return Err(Unsupported::new("multibyte encoding"));
    }
    if !charmap.digraph().is_empty() {
        return Err(Unsupported::new("contains digraphs"));
    }

    let mut high = [None; 128];
    for (&byte, entry) in charmap.one_byte() {
        if entry.direction() != Direction::Any {
            return Err(Unsupported::new(format!(
                "bidirectional context: 0x{byte:02x}"
            )));
        }
        let ch = match entry.unicode() {
            [] => None,
            [ch] => Some(*ch),
            _ => {
                return Err(Unsupported::new(format!(
                    "maps to multiple code points: 0x{byte:02x}"
                )))
            }
        };
        if byte < 0x80 {
            if ch.map(u32::from).unwrap_or(0) != byte as u32 {
                return Err(Unsupported::new(format!(
                    "not equal to ASCII equivalent: 0x{byte:02x}"
                )));
            }
        } else {
            // U+0000 is never a valid mapping for a high byte
            high[(byte - 0x80) as usize] = ch.filter(|&ch| ch != '\0');
        }
    }
    Ok(high)
}

#[cfg(test)]
mod tests {
    use read_charmaps::{Entry, Key};
    use rstest::rstest;

    use super::*;

    fn charmap(entries: &[(Key, Direction, Vec<char>)]) -> Charmap {
        let mut charmap = Charmap::default();
        for (key, direction, unicode) in entries {
            charmap
                .insert(*key, Entry::new(*direction, unicode.clone()))
                .unwrap();
        }
        charmap
    }

    #[test]
    fn roman_is_supported() {
        let charmap = Charmap::read(charmap_test_data::ROMAN).unwrap();
        let high = classify(&charmap).unwrap();
        assert_eq!(high[0], Some('\u{c4}'));
        assert_eq!(high[0xf0 - 0x80], Some('\u{f8ff}'));
        assert!(high.iter().all(Option::is_some));
    }

    #[test]
    fn missing_high_bytes_are_unmapped() {
        let charmap = charmap(&[
            (Key::OneByte(0x41), Direction::Any, vec!['A']),
            (Key::OneByte(0x8a), Direction::Any, vec!['\u{e4}']),
        ]);
        let high = classify(&charmap).unwrap();
        assert_eq!(high[0x0a], Some('\u{e4}'));
        assert_eq!(high.iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn empty_sequence_is_allowed() {
        let charmap = charmap(&[
            (Key::OneByte(0x00), Direction::Any, vec![]),
            (Key::OneByte(0x90), Direction::Any, vec![]),
        ]);
        let high = classify(&charmap).unwrap();
        assert_eq!(high[0x10], None);
    }

    #[rstest]
    #[case::empty(vec![], "missing one-byte map")]
    #[case::two_byte_only(
        vec![(Key::TwoByte([0x81, 0x40]), Direction::Any, vec!['\u{3000}'])],
        "missing one-byte map"
    )]
    #[case::two_byte(
        vec![
            (Key::OneByte(0x41), Direction::Any, vec!['A']),
            (Key::TwoByte([0x81, 0x40]), Direction::Any, vec!['\u{3000}']),
        ],
        "multibyte encoding"
    )]
    #[case::digraph(
        vec![
            (Key::OneByte(0x41), Direction::Any, vec!['A']),
            (Key::Digraph([0x41, 0xfb]), Direction::Any, vec!['\u{c5}']),
        ],
        "contains digraphs"
    )]
    #[case::directional(
        vec![(Key::OneByte(0x41), Direction::LeftToRight, vec!['A'])],
        "bidirectional context: 0x41"
    )]
    #[case::one_to_many(
        vec![(Key::OneByte(0xa0), Direction::Any, vec!['A', '\u{301}'])],
        "maps to multiple code points: 0xa0"
    )]
    #[case::not_ascii(
        vec![(Key::OneByte(0x41), Direction::Any, vec!['B'])],
        "not equal to ASCII equivalent: 0x41"
    )]
    #[case::unmapped_ascii(
        vec![(Key::OneByte(0x41), Direction::Any, vec![])],
        "not equal to ASCII equivalent: 0x41"
    )]
    fn unsupported(#[case] entries: Vec<(Key, Direction, Vec<char>)>, #[case] message: &str) {
        let err = classify(&charmap(&entries)).unwrap_err();
        assert_eq!(err.message(), message);
    }

    #[test]
    fn nul_high_byte_is_unmapped() {
        let charmap = charmap(&[
            (Key::OneByte(0x00), Direction::Any, vec!['\0']),
            (Key::OneByte(0x80), Direction::Any, vec!['\0']),
        ]);
        let high = classify(&charmap).unwrap();
        assert_eq!(high[0], None);
    }

    #[test]
    fn arabic_is_directional() {
        let charmap = Charmap::read(charmap_test_data::ARABIC).unwrap();
        let err = classify(&charmap).unwrap_err();
        assert_eq!(err.message(), "bidirectional context: 0x20");
        assert_eq!(
            err.to_string(),
            "unsupported charmap: bidirectional context: 0x20"
        );
    }

    #[test]
    fn multibyte_sample() {
        let charmap = Charmap::read(charmap_test_data::MULTIBYTE).unwrap();
        assert_eq!(
            classify(&charmap).unwrap_err().message(),
            "multibyte encoding"
        );
    }
}
