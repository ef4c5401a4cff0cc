//! Entries in a character map

use std::fmt::{Display, Formatter};

/// The longest Unicode sequence a single entry may map to.
pub const MAX_SEQUENCE_LEN: usize = 8;

/// The directional context required by an entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// The character can be used in any direction.
    #[default]
    Any,
    /// The character requires left-to-right context (`<LR>`).
    LeftToRight,
    /// The character requires right-to-left context (`<RL>`).
    RightToLeft,
}

impl Direction {
    /// Parse a context tag such as `<LR>`.
    pub fn from_tag(tag: &str) -> Option<Direction> {
        match tag {
            "<LR>" => Some(Direction::LeftToRight),
            "<RL>" => Some(Direction::RightToLeft),
            _ => None,
        }
    }
}

/// A single entry in a character map.
///
/// This is the Unicode sequence one encoded unit stands for, together with
/// the directional context it requires.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Entry {
    direction: Direction,
    unicode: Vec<char>,
}

impl Entry {
    /// Create a new entry.
    ///
    /// # Panics
    ///
    /// If `unicode` is longer than [`MAX_SEQUENCE_LEN`].
    pub fn new(direction: Direction, unicode: impl Into<Vec<char>>) -> Self {
        let unicode = unicode.into();
        assert!(
            unicode.len() <= MAX_SEQUENCE_LEN,
            "unicode sequence of {} exceeds maximum",
            unicode.len()
        );
        Entry { direction, unicode }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The Unicode scalar values this entry represents, in order.
    pub fn unicode(&self) -> &[char] {
        &self.unicode
    }
}

/// The encoded value an entry is defined for.
///
/// The three variants live in disjoint key spaces; a [`Charmap`][crate::Charmap]
/// keeps a separate map for each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A valid single-byte character, written `0xAA`.
    OneByte(u8),
    /// A two-byte character, written `0xAABB`.
    TwoByte([u8; 2]),
    /// Two valid single-byte characters with an alternate Unicode
    /// representation when they appear together, written `0xAA+0xBB`.
    Digraph([u8; 2]),
}

impl Key {
    /// The encoded bytes of this key, in input order.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Key::OneByte(b) => std::slice::from_ref(b),
            Key::TwoByte(b) | Key::Digraph(b) => b.as_slice(),
        }
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::OneByte(b) => write!(f, "0x{b:02X}"),
            Key::TwoByte([hi, lo]) => write!(f, "0x{hi:02X}{lo:02X}"),
            Key::Digraph([first, second]) => write!(f, "0x{first:02X}+0x{second:02X}"),
        }
    }
}
