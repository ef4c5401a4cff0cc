//! Compiling byte sequences into a table-driven state machine
//!
//! Keys are inserted into a [`Trie`], which is then flattened into a
//! [`StateTable`]: one state of 256 words per trie node, numbered in
//! depth-first order with the root as state 0. The low byte of word `i` is
//! the output for input byte `i`, the high byte is the next state.

use std::fmt::{Display, Formatter};
use std::io::Write;

use crate::write::{TableWrite, TableWriter};

/// The number of slots in each state, one per input byte.
const SLOTS: usize = 256;

/// The most states a table can have; state indices are stored in 8 bits.
pub const MAX_STATES: usize = 256;

type NodeId = usize;

/// An error inserting into or compiling a [`Trie`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrieError {
    /// Keys must contain at least one byte.
    EmptyKey,
    /// Zero is reserved to mean "no output".
    ZeroOutput { key: Vec<u8> },
    /// The key already maps to a different output.
    Conflict { key: Vec<u8>, existing: u8, new: u8 },
    /// The trie has more nodes than can be addressed.
    TooManyStates(usize),
}

impl Display for TrieError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TrieError::EmptyKey => f.write_str("empty input"),
            TrieError::ZeroOutput { key } => {
                write!(f, "zero byte output for input {}", HexBytes(key))
            }
            TrieError::Conflict { key, existing, new } => write!(
                f,
                "table conflict: {} maps to both 0x{existing:02x} and 0x{new:02x}",
                HexBytes(key)
            ),
            TrieError::TooManyStates(count) => {
                write!(f, "{count} states exceeds the maximum of {MAX_STATES}")
            }
        }
    }
}

impl std::error::Error for TrieError {}

struct HexBytes<'a>(&'a [u8]);

impl Display for HexBytes<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        f.write_str("]")
    }
}

#[derive(Clone)]
struct Node {
    outputs: [u8; SLOTS],
    children: [Option<NodeId>; SLOTS],
}

impl Node {
    fn new() -> Self {
        Node {
            outputs: [0; SLOTS],
            children: [None; SLOTS],
        }
    }
}

/// A prefix tree mapping byte sequences to single output bytes.
///
/// Nodes live in an arena; node 0 is the root.
#[derive(Clone)]
pub struct Trie {
    nodes: Vec<Node>,
}

impl Default for Trie {
    fn default() -> Self {
        Trie {
            nodes: vec![Node::new()],
        }
    }
}

impl std::fmt::Debug for Trie {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trie")
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the mapping from `key` to `output`, creating nodes as needed.
    ///
    /// Inserting a mapping that already exists does nothing. A zero output
    /// for a key that starts with a zero byte is accepted and ignored.
    pub fn insert(&mut self, key: &[u8], output: u8) -> Result<(), TrieError> {
        let Some((&last, prefix)) = key.split_last() else {
            return Err(TrieError::EmptyKey);
        };
        if output == 0 {
            if key[0] == 0 {
                return Ok(());
            }
            return Err(TrieError::ZeroOutput { key: key.to_vec() });
        }

        let mut node = 0;
        for &byte in prefix {
            node = match self.nodes[node].children[byte as usize] {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::new());
                    self.nodes[node].children[byte as usize] = Some(child);
                    log::trace!("new trie node {child} after {}", HexBytes(key));
                    child
                }
            };
        }

        let slot = &mut self.nodes[node].outputs[last as usize];
        match *slot {
            0 => {
                *slot = output;
                Ok(())
            }
            existing if existing == output => Ok(()),
            existing => Err(TrieError::Conflict {
                key: key.to_vec(),
                existing,
                new: output,
            }),
        }
    }

    /// The number of nodes, which is the number of states in the compiled table.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Flatten the trie into a state table.
    pub fn compile(&self) -> Result<StateTable, TrieError> {
        let count = self.nodes.len();
        if count > MAX_STATES {
            return Err(TrieError::TooManyStates(count));
        }
        let mut words = vec![0u16; count * SLOTS];
        let end = self.write_state(0, &mut words, 0);
        assert_eq!(end, count, "flattened state count does not match trie");
        log::debug!("compiled {count} states");
        Ok(StateTable { words })
    }

    // writes `node` as state `pos` and its descendants after it, returning
    // the next free state.
    fn write_state(&self, node: NodeId, words: &mut [u16], pos: usize) -> usize {
        let node = &self.nodes[node];
        let base = pos * SLOTS;
        for (word, &output) in words[base..base + SLOTS].iter_mut().zip(&node.outputs) {
            *word = output as u16;
        }
        let mut next = pos + 1;
        for (input, child) in node.children.iter().enumerate() {
            if let Some(child) = child {
                words[base + input] |= (next as u16) << 8;
                next = self.write_state(*child, words, next);
            }
        }
        next
    }
}

/// A compiled state machine.
#[derive(Clone, PartialEq, Eq)]
pub struct StateTable {
    words: Vec<u16>,
}

impl StateTable {
    pub fn num_states(&self) -> usize {
        self.words.len() / SLOTS
    }

    /// The word for `input` in `state`.
    ///
    /// # Panics
    ///
    /// If `state` is out of range.
    pub fn word(&self, state: usize, input: u8) -> u16 {
        self.words[state * SLOTS + input as usize]
    }

    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Write a human readable listing of every non-empty transition.
    pub fn dump_transitions(&self, w: &mut impl Write) -> std::io::Result<()> {
        for (state, words) in self.words.chunks(SLOTS).enumerate() {
            writeln!(w, "State ${state:02x}")?;
            for (input, &word) in words.iter().enumerate() {
                if word == 0 {
                    continue;
                }
                write!(w, "    ${input:02x} ->")?;
                let [next, output] = word.to_be_bytes();
                if next != 0 {
                    write!(w, " state ${next:02x}")?;
                }
                if output != 0 {
                    write!(w, " char ${output:02x}")?;
                }
                writeln!(w)?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for StateTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateTable")
            .field("num_states", &self.num_states())
            .finish()
    }
}

impl TableWrite for StateTable {
    fn write_into(&self, writer: &mut TableWriter) {
        self.words.write_into(writer)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use read_charmaps::tables::StateMachineTable;

    use super::*;
    use crate::write::dump_table;

    fn compile(pairs: &[(&[u8], u8)]) -> StateTable {
        let mut trie = Trie::new();
        for (key, output) in pairs {
            trie.insert(key, *output).unwrap();
        }
        trie.compile().unwrap()
    }

    #[test]
    fn empty_trie_is_one_state() {
        let table = Trie::new().compile().unwrap();
        assert_eq!(table.num_states(), 1);
        assert!(table.words().iter().all(|w| *w == 0));
        assert_eq!(dump_table(&table).len(), 512);
    }

    #[test]
    fn prefix_key() {
        let table = compile(&[(&[0x41], 0x01), (&[0x41, 0x42], 0x02)]);
        assert_eq!(table.num_states(), 2);
        assert_eq!(table.word(0, 0x41), 0x0101);
        assert_eq!(table.word(1, 0x42), 0x0002);
        assert_eq!(table.word(1, 0x41), 0);
    }

    #[test]
    fn depth_first_numbering() {
        // root -> a -> (x, y), root -> b; 'a' subtree is numbered before 'b'
        let table = compile(&[(b"axz", 1), (b"ayz", 2), (b"bz", 3)]);
        assert_eq!(table.num_states(), 5);
        assert_eq!(table.word(0, b'a') >> 8, 1);
        assert_eq!(table.word(1, b'x') >> 8, 2);
        assert_eq!(table.word(1, b'y') >> 8, 3);
        assert_eq!(table.word(0, b'b') >> 8, 4);
        assert_eq!(table.word(4, b'z'), 3);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a = compile(&[(b"bz", 3), (b"axz", 1), (b"ayz", 2)]);
        let b = compile(&[(b"ayz", 2), (b"axz", 1), (b"bz", 3)]);
        assert_eq!(dump_table(&a), dump_table(&b));
    }

    #[test]
    fn reinsertion_is_idempotent() {
        let once = compile(&[(b"ab", 7)]);
        let twice = compile(&[(b"ab", 7), (b"ab", 7)]);
        assert_eq!(dump_table(&once), dump_table(&twice));
    }

    #[test]
    fn conflict() {
        let mut trie = Trie::new();
        trie.insert(b"ab", 7).unwrap();
        let err = trie.insert(b"ab", 9).unwrap_err();
        assert_eq!(
            err,
            TrieError::Conflict {
                key: b"ab".to_vec(),
                existing: 7,
                new: 9
            }
        );
        assert_eq!(
            err.to_string(),
            "table conflict: [61 62] maps to both 0x07 and 0x09"
        );
        // the original mapping survives
        assert_eq!(trie.compile().unwrap().word(1, b'b'), 7);
    }

    #[test]
    fn bad_inputs() {
        let mut trie = Trie::new();
        assert_eq!(trie.insert(&[], 1), Err(TrieError::EmptyKey));
        assert_eq!(
            trie.insert(&[5, 0], 0),
            Err(TrieError::ZeroOutput { key: vec![5, 0] })
        );
        // NUL mapping to NUL carries no information
        assert_eq!(trie.insert(&[0], 0), Ok(()));
        assert_eq!(trie.insert(&[0, 1], 0), Ok(()));
        assert_eq!(trie.num_nodes(), 1);
        // but a NUL-led key with a real output is fine
        assert_eq!(trie.insert(&[0, 1], 4), Ok(()));
        assert_eq!(trie.num_nodes(), 2);
    }

    #[test]
    fn too_many_states() {
        let mut trie = Trie::new();
        for i in 0..=255u8 {
            trie.insert(&[i, 0x80], 1).unwrap();
        }
        assert_eq!(trie.num_nodes(), 257);
        assert_eq!(trie.compile().unwrap_err(), TrieError::TooManyStates(257));
    }

    #[test]
    fn max_states_fit() {
        let mut trie = Trie::new();
        for i in 0..255u8 {
            trie.insert(&[i, 0x80], 1).unwrap();
        }
        let table = trie.compile().unwrap();
        assert_eq!(table.num_states(), MAX_STATES);
        assert_eq!(table.word(0, 254) >> 8, 255);
    }

    #[test]
    fn lookup_every_key() {
        let pairs: &[(&[u8], u8)] = &[
            (b"A", 1),
            (b"AB", 2),
            (b"ABC", 3),
            (&[0xd8, 0x8c], 0xac),
            (&[0xd8, 0xa7], 0xc7),
            (&[0xc3, 0x84], 0x80),
        ];
        let table = compile(pairs);
        let bytes = dump_table(&table);
        let read = StateMachineTable::read(&bytes).unwrap();
        assert_eq!(read.num_states(), table.num_states());
        for (key, output) in pairs {
            assert_eq!(read.lookup(key), Some(*output), "{key:?}");
        }
        assert_eq!(read.decode(&[0xd8, 0xa7, b'A']), vec![0xc7, 1]);
    }

    #[test]
    fn words_are_big_endian() {
        let table = compile(&[(&[0x41], 0x01), (&[0x41, 0x42], 0x02)]);
        let bytes = dump_table(&table);
        assert_eq!(&bytes[0x41 * 2..0x41 * 2 + 2], &[0x01, 0x01]);
        assert_eq!(&bytes[512 + 0x42 * 2..512 + 0x42 * 2 + 2], &[0x00, 0x02]);
    }

    #[test]
    fn dump() {
        let table = compile(&[(&[0x41], 0x01), (&[0x41, 0x42], 0x02)]);
        let mut out = Vec::new();
        table.dump_transitions(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "State $00\n    $41 -> state $01 char $01\n\nState $01\n    $42 -> char $02\n\n"
        );
    }
}
