//! Assembling entries into a character map

use std::{collections::BTreeMap, io::BufRead, path::Path};

use crate::{
    entry::{Entry, Key},
    error::{ParseError, ParseErrorKind},
    parse::parse_line,
};

/// A character map, mapping characters from a platform encoding to Unicode.
///
/// Each kind of [`Key`] has its own map. Maps are ordered by key, so
/// iteration (and anything compiled from it) does not depend on the order
/// entries appeared in the source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Charmap {
    one_byte: BTreeMap<u8, Entry>,
    two_byte: BTreeMap<[u8; 2], Entry>,
    digraph: BTreeMap<[u8; 2], Entry>,
}

impl Charmap {
    /// Parse a charmap from the contents of a mapping file.
    pub fn read(text: &str) -> Result<Charmap, ParseError> {
        Self::read_impl(text.lines().map(Ok::<_, std::io::Error>), None)
    }

    /// Parse a charmap, naming `file` in any error.
    pub fn read_named(text: &str, file: &str) -> Result<Charmap, ParseError> {
        Self::read_impl(text.lines().map(Ok::<_, std::io::Error>), Some(file))
    }

    /// Parse a charmap from a stream.
    ///
    /// The stream is read to the end or to the first error.
    pub fn from_reader(reader: impl BufRead, file: Option<&str>) -> Result<Charmap, ParseError> {
        Self::read_impl(reader.lines(), file)
    }

    /// Read and parse the mapping file at `path`.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Charmap, ParseError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ParseError::new(Some(&name), 0, ParseErrorKind::Io(e.to_string())))?;
        Self::read_named(&text, &name)
    }

    fn read_impl<S: AsRef<str>>(
        lines: impl Iterator<Item = std::io::Result<S>>,
        file: Option<&str>,
    ) -> Result<Charmap, ParseError> {
        let mut charmap = Charmap::default();
        for (i, line) in lines.enumerate() {
            let lineno = i + 1;
            let line = line
                .map_err(|e| ParseError::new(file, lineno, ParseErrorKind::Io(e.to_string())))?;
            let parsed =
                parse_line(line.as_ref()).map_err(|kind| ParseError::new(file, lineno, kind))?;
            if let Some((key, entry)) = parsed {
                charmap
                    .insert(key, entry)
                    .map_err(|kind| ParseError::new(file, lineno, kind))?;
            }
        }
        log::debug!(
            "read charmap {}: {} one-byte, {} two-byte, {} digraph entries",
            file.unwrap_or("<memory>"),
            charmap.one_byte.len(),
            charmap.two_byte.len(),
            charmap.digraph.len()
        );
        Ok(charmap)
    }

    /// Add an entry to the map for its kind of key.
    ///
    /// Returns an error if the key is already defined.
    pub fn insert(&mut self, key: Key, entry: Entry) -> Result<(), ParseErrorKind> {
        fn insert_new<K: Ord>(
            map: &mut BTreeMap<K, Entry>,
            k: K,
            entry: Entry,
            key: Key,
        ) -> Result<(), ParseErrorKind> {
            match map.entry(k) {
                std::collections::btree_map::Entry::Occupied(_) => {
                    Err(ParseErrorKind::Duplicate(key))
                }
                std::collections::btree_map::Entry::Vacant(slot) => {
                    slot.insert(entry);
                    Ok(())
                }
            }
        }

        match key {
            Key::OneByte(b) => insert_new(&mut self.one_byte, b, entry, key),
            Key::TwoByte(b) => insert_new(&mut self.two_byte, b, entry, key),
            Key::Digraph(b) => insert_new(&mut self.digraph, b, entry, key),
        }
    }

    /// Look up the entry for a key.
    pub fn get(&self, key: Key) -> Option<&Entry> {
        match key {
            Key::OneByte(b) => self.one_byte.get(&b),
            Key::TwoByte(b) => self.two_byte.get(&b),
            Key::Digraph(b) => self.digraph.get(&b),
        }
    }

    /// Valid single-byte characters.
    pub fn one_byte(&self) -> &BTreeMap<u8, Entry> {
        &self.one_byte
    }

    /// Valid two-byte characters.
    pub fn two_byte(&self) -> &BTreeMap<[u8; 2], Entry> {
        &self.two_byte
    }

    /// Pairs of valid one-byte characters that have an alternate Unicode
    /// representation.
    pub fn digraph(&self) -> &BTreeMap<[u8; 2], Entry> {
        &self.digraph
    }

    /// Iterate over every entry, one-byte first, then two-byte, then digraphs.
    pub fn iter(&self) -> impl Iterator<Item = (Key, &Entry)> + '_ {
        let one = self.one_byte.iter().map(|(k, e)| (Key::OneByte(*k), e));
        let two = self.two_byte.iter().map(|(k, e)| (Key::TwoByte(*k), e));
        let di = self.digraph.iter().map(|(k, e)| (Key::Digraph(*k), e));
        one.chain(two).chain(di)
    }

    /// The total number of entries.
    pub fn len(&self) -> usize {
        self.one_byte.len() + self.two_byte.len() + self.digraph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
