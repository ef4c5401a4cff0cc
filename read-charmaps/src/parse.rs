//! Parsing individual lines of a mapping file

use crate::{
    entry::{Direction, Entry, Key, MAX_SEQUENCE_LEN},
    error::ParseErrorKind,
};

/// Parse a single line of a mapping file.
///
/// Returns `Ok(None)` for lines that are blank once the trailing `#` comment
/// is removed.
pub fn parse_line(line: &str) -> Result<Option<(Key, Entry)>, ParseErrorKind> {
    let line = match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    };
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (key, value) = match line.split_once('\t') {
        Some((key, rest)) if !key.is_empty() => {
            // anything after a second tab is ignored
            let value = rest.split('\t').next().unwrap_or_default();
            (key.trim(), value.trim())
        }
        _ => return Err(ParseErrorKind::Columns),
    };
    if value.is_empty() {
        return Err(ParseErrorKind::Columns);
    }

    let entry = parse_value(value)?;
    let key = parse_key(key)?;
    Ok(Some((key, entry)))
}

fn parse_value(value: &str) -> Result<Entry, ParseErrorKind> {
    let (direction, sequence) = if value.starts_with('<') {
        let (tag, rest) = value
            .split_once('+')
            .ok_or(ParseErrorKind::BadUnicode)?;
        let direction = Direction::from_tag(tag)
            .ok_or_else(|| ParseErrorKind::UnknownContext(tag.to_owned()))?;
        (direction, rest)
    } else {
        (Direction::Any, value)
    };

    let mut unicode = Vec::new();
    for item in sequence.split('+') {
        let digits = item.strip_prefix("0x").ok_or(ParseErrorKind::BadUnicode)?;
        let cp = parse_hex_u32(digits)?;
        let ch = char::from_u32(cp).ok_or(ParseErrorKind::CodePointRange(cp))?;
        if unicode.len() == MAX_SEQUENCE_LEN {
            return Err(ParseErrorKind::SequenceTooLong);
        }
        unicode.push(ch);
    }
    Ok(Entry::new(direction, unicode))
}

fn parse_key(key: &str) -> Result<Key, ParseErrorKind> {
    if !key.is_ascii() {
        return Err(ParseErrorKind::BadKey);
    }
    let digits = key.strip_prefix("0x").ok_or(ParseErrorKind::BadKey)?;
    match key.len() {
        4 => parse_hex_byte(digits).map(Key::OneByte),
        6 => Ok(Key::TwoByte([
            parse_hex_byte(&digits[..2])?,
            parse_hex_byte(&digits[2..])?,
        ])),
        9 => {
            let (first, second) = digits
                .split_once("+0x")
                .filter(|(first, _)| first.len() == 2)
                .ok_or(ParseErrorKind::BadKey)?;
            Ok(Key::Digraph([parse_hex_byte(first)?, parse_hex_byte(second)?]))
        }
        _ => Err(ParseErrorKind::BadKey),
    }
}

fn parse_hex_byte(digits: &str) -> Result<u8, ParseErrorKind> {
    // from_str_radix would accept a leading sign
    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseErrorKind::InvalidHex(digits.to_owned()));
    }
    u8::from_str_radix(digits, 16).map_err(|_| ParseErrorKind::InvalidHex(digits.to_owned()))
}

fn parse_hex_u32(digits: &str) -> Result<u32, ParseErrorKind> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseErrorKind::InvalidHex(digits.to_owned()));
    }
    u32::from_str_radix(digits, 16).map_err(|_| ParseErrorKind::InvalidHex(digits.to_owned()))
}
