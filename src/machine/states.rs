//! Fixed-width state sets
//!
//! The state domain is exactly 256 identifiers wide, so a set of states is a
//! 256-bit array rather than a hashed collection.

use super::State;
use bitvec::prelude::*;
use std::fmt;

/// Set of states backed by a 256-bit array
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct StateSet {
    bits: BitArray<[u64; 4], Lsb0>,
}

impl StateSet {
    /// Create empty set
    pub fn new() -> Self {
        Self {
            bits: BitArray::ZERO,
        }
    }

    /// Insert a state, returning whether it was newly added
    pub fn insert(&mut self, state: State) -> bool {
        let idx = usize::from(state.id());
        let fresh = !self.bits[idx];
        self.bits.set(idx, true);
        fresh
    }

    /// Membership test
    pub fn contains(&self, state: State) -> bool {
        self.bits[usize::from(state.id())]
    }

    /// Number of states in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Iterate states in ascending order
    pub fn iter(&self) -> impl Iterator<Item = State> + '_ {
        self.bits.iter_ones().map(|idx| State::new(idx as u8))
    }
}

impl Default for StateSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<State> for StateSet {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        let mut set = Self::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_novelty() {
        let mut set = StateSet::new();

        assert!(set.insert(State::new(7)));
        assert!(!set.insert(State::new(7)));
        assert!(set.insert(State::TRAP));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let set: StateSet = [200, 3, 255, 0, 64]
            .into_iter()
            .map(State::new)
            .collect();

        let ids: Vec<u8> = set.iter().map(State::id).collect();
        assert_eq!(ids, vec![0, 3, 64, 200, 255]);
        assert!(set.contains(State::new(64)));
        assert!(!set.contains(State::new(65)));
    }
}
