//! The state machine table
//!
//! The payload is a sequence of states, each made of 256 big-endian 16-bit
//! words, one per input byte. The low byte of a word is the output produced
//! when that input is consumed (zero for none) and the high byte is the index
//! of the next state (zero to return to the start state).

use std::num::NonZeroU8;

use super::ReadError;

/// The number of slots in one state.
pub const STATE_SLOTS: usize = 256;
/// The size in bytes of one serialized state.
pub const STATE_LEN: usize = STATE_SLOTS * 2;

/// A view of a serialized state machine.
#[derive(Clone, Copy, Debug)]
pub struct StateMachineTable<'a> {
    data: &'a [u8],
}

/// The effect of consuming one input byte in some state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    /// The byte to emit, if the input completes a key.
    pub output: Option<NonZeroU8>,
    /// The state to move to, if the input continues a longer key.
    pub next: Option<NonZeroU8>,
}

impl Transition {
    pub fn from_word(word: u16) -> Self {
        let [next, output] = word.to_be_bytes();
        Transition {
            output: NonZeroU8::new(output),
            next: NonZeroU8::new(next),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_none() && self.next.is_none()
    }
}

impl<'a> StateMachineTable<'a> {
    /// Read the payload of a state machine table (without the kind byte).
    pub fn read(data: &'a [u8]) -> Result<Self, ReadError> {
        if data.is_empty() || data.len() % STATE_LEN != 0 {
            return Err(ReadError::InvalidLength(data.len()));
        }
        Ok(StateMachineTable { data })
    }

    pub fn num_states(&self) -> usize {
        self.data.len() / STATE_LEN
    }

    /// The raw word for `input` in `state`, or zero if `state` does not exist.
    pub fn word(&self, state: usize, input: u8) -> u16 {
        state
            .checked_mul(STATE_LEN)
            .and_then(|start| start.checked_add(input as usize * 2))
            .and_then(|pos| self.data.get(pos..pos.checked_add(2)?))
            .map(|raw| u16::from_be_bytes([raw[0], raw[1]]))
            .unwrap_or_default()
    }

    pub fn transition(&self, state: usize, input: u8) -> Transition {
        Transition::from_word(self.word(state, input))
    }

    /// Walk `key` from the start state, returning the output produced by
    /// its final byte.
    ///
    /// Returns `None` if the key is empty, leaves the automaton before its
    /// last byte, or produces no output on its last byte.
    pub fn lookup(&self, key: &[u8]) -> Option<u8> {
        let (last, prefix) = key.split_last()?;
        let mut state = 0;
        for &byte in prefix {
            state = self.transition(state, byte).next?.get() as usize;
        }
        self.transition(state, *last).output.map(NonZeroU8::get)
    }

    /// Run the automaton over `input`.
    ///
    /// Each input byte emits at most one output byte. When a byte has no
    /// onward transition the automaton returns to the start state.
    pub fn decode(&self, input: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut state = 0;
        for &byte in input {
            let transition = self.transition(state, byte);
            if let Some(output) = transition.output {
                out.push(output.get());
            }
            state = transition.next.map(|s| s.get() as usize).unwrap_or(0);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn set_word(data: &mut [u8], state: usize, input: u8, word: u16) {
        let pos = state * STATE_LEN + input as usize * 2;
        data[pos..pos + 2].copy_from_slice(&word.to_be_bytes());
    }

    // keys: 'A' -> 1, 'A' 'B' -> 2, 'C' -> 3
    fn prefix_machine() -> Vec<u8> {
        let mut data = vec![0u8; STATE_LEN * 2];
        set_word(&mut data, 0, b'A', 0x0101);
        set_word(&mut data, 0, b'C', 0x0003);
        set_word(&mut data, 1, b'B', 0x0002);
        data
    }

    #[test]
    fn bad_lengths() {
        assert_eq!(
            StateMachineTable::read(&[]).unwrap_err(),
            ReadError::InvalidLength(0)
        );
        assert_eq!(
            StateMachineTable::read(&[0; STATE_LEN + 2]).unwrap_err(),
            ReadError::InvalidLength(STATE_LEN + 2)
        );
    }

    #[test]
    fn transitions() {
        let data = prefix_machine();
        let table = StateMachineTable::read(&data).unwrap();
        assert_eq!(table.num_states(), 2);
        let t = table.transition(0, b'A');
        assert_eq!(t.output.map(NonZeroU8::get), Some(1));
        assert_eq!(t.next.map(NonZeroU8::get), Some(1));
        assert!(table.transition(0, b'B').is_empty());
        // out of range states read as empty
        assert!(table.transition(7, b'A').is_empty());
        assert_eq!(table.word(usize::MAX, 0xff), 0);
        assert_eq!(table.word(usize::MAX / STATE_LEN, 0xff), 0);
    }

    #[test]
    fn lookup() {
        let data = prefix_machine();
        let table = StateMachineTable::read(&data).unwrap();
        assert_eq!(table.lookup(b"A"), Some(1));
        assert_eq!(table.lookup(b"AB"), Some(2));
        assert_eq!(table.lookup(b"C"), Some(3));
        assert_eq!(table.lookup(b"CB"), None);
        assert_eq!(table.lookup(b"AC"), None);
        assert_eq!(table.lookup(b""), None);
    }

    #[test]
    fn decode_emits_per_byte() {
        let data = prefix_machine();
        let table = StateMachineTable::read(&data).unwrap();
        assert_eq!(table.decode(b"ABC"), vec![1, 2, 3]);
        // 'C' in state 1 has no transition, so it is dropped and we reset
        assert_eq!(table.decode(b"ACC"), vec![1, 3]);
        assert_eq!(table.decode(b"xyz"), Vec::<u8>::new());
    }
}
