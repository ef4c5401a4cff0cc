//! test data shared between the charmap crates.

/// A complete single-byte charmap, ASCII-identical below 128.
pub static ROMAN: &str = include_str!("../test_data/ROMAN.TXT");

/// A single-byte charmap that uses `<LR>` and `<RL>` context tags.
pub static ARABIC: &str = include_str!("../test_data/ARABIC.TXT");

/// One-byte, two-byte and digraph entries in the same file.
pub static MULTIBYTE: &str = include_str!("../test_data/MULTIBYTE.TXT");

/// Defines 0x41 twice; the second definition is on line 4.
pub static DUPLICATE: &str = include_str!("../test_data/duplicate.txt");

/// Uses an unknown context tag on line 3.
pub static BAD_CONTEXT: &str = include_str!("../test_data/bad_context.txt");
