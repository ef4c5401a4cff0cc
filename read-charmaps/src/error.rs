//! Errors that occur while reading a mapping file

use std::fmt::{Display, Formatter};

use crate::entry::{Key, MAX_SEQUENCE_LEN};

/// An error parsing a character mapping file.
///
/// Carries the name of the file (if known) and the 1-based line on which
/// the error occured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub file: Option<String>,
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// The specific problem with a line of a mapping file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line did not contain two tab-separated columns.
    Columns,
    /// The first column is not `0xAA`, `0xAAAA` or `0xAA+0xBB`.
    BadKey,
    /// The value started with a context tag other than `<LR>` or `<RL>`.
    UnknownContext(String),
    /// A code point in the value was not written as `0x` followed by digits.
    BadUnicode,
    /// Something that should have been hexadecimal was not.
    InvalidHex(String),
    /// The code point is not a Unicode scalar value.
    CodePointRange(u32),
    /// The value has more than [`MAX_SEQUENCE_LEN`] code points.
    SequenceTooLong,
    /// The key was already defined earlier in the file.
    Duplicate(Key),
    /// The file could not be read.
    Io(String),
}

impl ParseError {
    pub(crate) fn new(file: Option<&str>, line: usize, kind: ParseErrorKind) -> Self {
        ParseError {
            file: file.map(String::from),
            line,
            kind,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut prefixed = false;
        if let Some(file) = &self.file {
            write!(f, "{file}:")?;
            prefixed = true;
        }
        if self.line != 0 {
            write!(f, "{}:", self.line)?;
            prefixed = true;
        }
        if prefixed {
            f.write_str(" ")?;
        }
        self.kind.fmt(f)
    }
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::Columns => f.write_str("expected 2 columns"),
            ParseErrorKind::BadKey => f.write_str("unknown entry type"),
            ParseErrorKind::UnknownContext(tag) => write!(f, "unknown context: {tag:?}"),
            ParseErrorKind::BadUnicode => f.write_str("invalid unicode sequence"),
            ParseErrorKind::InvalidHex(text) => write!(f, "invalid hexadecimal: {text:?}"),
            ParseErrorKind::CodePointRange(cp) => {
                write!(f, "code point out of range: 0x{cp:X}")
            }
            ParseErrorKind::SequenceTooLong => write!(
                f,
                "unicode sequence longer than {MAX_SEQUENCE_LEN} code points"
            ),
            ParseErrorKind::Duplicate(key) => write!(f, "duplicate entry: {key}"),
            ParseErrorKind::Io(msg) => write!(f, "read failed: {msg}"),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes() {
        let err = ParseError::new(Some("ROMAN.TXT"), 12, ParseErrorKind::Columns);
        assert_eq!(err.to_string(), "ROMAN.TXT:12: expected 2 columns");
        let err = ParseError::new(None, 3, ParseErrorKind::BadKey);
        assert_eq!(err.to_string(), "3: unknown entry type");
        let err = ParseError::new(None, 0, ParseErrorKind::Io("gone".into()));
        assert_eq!(err.to_string(), "read failed: gone");
    }
}
