//! Building the state machine that converts Unicode back to a legacy encoding
//!
//! The keys of the machine are UTF-8 byte sequences and the outputs are the
//! legacy bytes, so a converter can walk UTF-8 text one byte at a time.

use read_charmaps::{Charmap, Direction};

use crate::state_machine::{Trie, TrieError};

/// Insert every one-byte entry of `charmap` into a new [`Trie`].
///
/// Entries that need right-to-left context are skipped, as are entries with
/// no Unicode sequence. Two-byte and digraph entries cannot be represented
/// because their legacy form is more than one byte.
pub fn build_encoder(charmap: &Charmap) -> Result<Trie, TrieError> {
    let mut trie = Trie::new();
    let mut buf = [0u8; 4];
    for (&byte, entry) in charmap.one_byte() {
        if entry.direction() == Direction::RightToLeft || entry.unicode().is_empty() {
            continue;
        }
        let mut key = Vec::with_capacity(entry.unicode().len() * 4);
        for ch in entry.unicode() {
            key.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
        trie.insert(&key, byte)?;
    }
    let skipped = charmap.two_byte().len() + charmap.digraph().len();
    if skipped != 0 {
        log::debug!("{skipped} multi-byte entries not encodable");
    }
    Ok(trie)
}
