//! Transition function δ: Q × (Σ ∪ {ε}) × (Γ ∪ {ε}) → Q × (Γ ∪ {ε})

use super::{State, StateSet, Symbol};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Left-hand side of a transition rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TransitionKey {
    /// State the rule fires from
    pub from: State,

    /// Input symbol consumed (epsilon: none)
    pub input: Symbol,

    /// Stack symbol popped (epsilon: fires regardless of stack top)
    pub pop: Symbol,
}

/// Right-hand side of a transition rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Transition {
    /// Next state
    pub to: State,

    /// Symbol pushed after the pop (epsilon: nothing pushed)
    pub push: Symbol,
}

/// Lookup table for δ
///
/// At most one entry per key; inserting an existing key replaces the entry.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    entries: HashMap<TransitionKey, Transition>,

    /// States with at least one epsilon-input entry
    epsilon_sources: StateSet,
}

impl TransitionTable {
    /// Create empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the one it replaced
    pub fn insert(&mut self, key: TransitionKey, transition: Transition) -> Option<Transition> {
        if key.input.is_epsilon() {
            self.epsilon_sources.insert(key.from);
        }
        self.entries.insert(key, transition)
    }

    /// Look up the entry for (state, input, pop)
    pub fn get(&self, from: State, input: Symbol, pop: Symbol) -> Option<Transition> {
        self.entries
            .get(&TransitionKey { from, input, pop })
            .copied()
    }

    /// Whether `state` has any epsilon-input entry
    pub fn has_epsilon_input(&self, state: State) -> bool {
        self.epsilon_sources.contains(state)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pop symbols used with each input symbol, grouped by source state
    pub fn pop_sets(&self) -> BTreeMap<State, BTreeMap<Symbol, BTreeSet<Symbol>>> {
        let mut grouped: BTreeMap<State, BTreeMap<Symbol, BTreeSet<Symbol>>> = BTreeMap::new();
        for key in self.entries.keys() {
            grouped
                .entry(key.from)
                .or_default()
                .entry(key.input)
                .or_default()
                .insert(key.pop);
        }
        grouped
    }
}
