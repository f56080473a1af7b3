//! Pushdown automaton representation
//!
//! Provides the immutable machine record produced by the definition parser:
//! - States drawn from the closed range [0, 255], with 255 reserved as trap
//! - Symbols that are either a printable character or epsilon
//! - Input and stack alphabets derived from the transitions
//! - A transition table keyed by (state, input, pop)

mod config;
mod states;
mod transition;

pub use config::{Configuration, Stack};
pub use states::StateSet;
pub use transition::{Transition, TransitionKey, TransitionTable};

use std::collections::BTreeSet;
use std::fmt;

/// Machine state (element of Q)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct State(u8);

impl State {
    /// Start state q_0, never declared explicitly.
    pub const START: State = State(0);

    /// Absorbing state entered whenever no transition applies.
    pub const TRAP: State = State(u8::MAX);

    /// Wrap a raw state identifier.
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw identifier.
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Whether this is the reserved trap state.
    pub const fn is_trap(self) -> bool {
        self.0 == u8::MAX
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input or stack symbol
///
/// Epsilon stands for "nothing consumed" on the input side and for
/// "nothing required / nothing produced" on the stack side. It is never a
/// member of either alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Symbol {
    /// The empty symbol
    Epsilon,
    /// An ordinary printable character
    Char(char),
}

impl Symbol {
    /// Underlying character, `None` for epsilon.
    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Char(c) => Some(c),
        }
    }

    /// Whether this is the epsilon marker.
    pub fn is_epsilon(self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl From<Option<char>> for Symbol {
    fn from(value: Option<char>) -> Self {
        value.map_or(Symbol::Epsilon, Symbol::Char)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => f.write_str("ε"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}

/// A table insertion that replaced a different, earlier transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Collision {
    /// Key shared by both transitions
    pub key: TransitionKey,
    /// Transition that was overwritten
    pub previous: Transition,
    /// Transition that is now in the table
    pub replacement: Transition,
}

/// Pushdown automaton
///
/// Built once per definition and read-only afterwards, so a single machine
/// can be shared across any number of concurrent runs.
#[derive(Debug, Clone)]
pub struct Pda {
    /// Accepting states F
    accept: StateSet,

    /// States mentioned by at least one transition
    states: StateSet,

    /// Input alphabet Σ (epsilon excluded)
    input_alphabet: BTreeSet<char>,

    /// Stack alphabet Γ (epsilon excluded)
    stack_alphabet: BTreeSet<char>,

    /// Transition function δ
    table: TransitionTable,

    /// Overwrites observed while the table was filled, in definition order
    collisions: Vec<Collision>,
}

impl Pda {
    /// Create fluent builder
    pub fn builder() -> PdaBuilder {
        PdaBuilder::new()
    }

    /// Accepting states.
    pub fn accept_states(&self) -> &StateSet {
        &self.accept
    }

    /// Number of distinct states discovered from the transition list.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Sorted input alphabet.
    pub fn input_alphabet(&self) -> &BTreeSet<char> {
        &self.input_alphabet
    }

    /// Sorted stack alphabet.
    pub fn stack_alphabet(&self) -> &BTreeSet<char> {
        &self.stack_alphabet
    }

    /// Transition table.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Key collisions recorded during construction.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Whether a run ending in `state` accepts. Never true for the trap state.
    pub fn is_accepting(&self, state: State) -> bool {
        !state.is_trap() && self.accept.contains(state)
    }
}

/// Builder for pushdown automata (fluent API)
///
/// Transitions are applied in order; a later transition with the same key
/// as an earlier one replaces it and the overwrite is recorded as a
/// [`Collision`].
#[derive(Debug, Default)]
pub struct PdaBuilder {
    accept: StateSet,
    states: StateSet,
    input_alphabet: BTreeSet<char>,
    stack_alphabet: BTreeSet<char>,
    table: TransitionTable,
    collisions: Vec<Collision>,
}

impl PdaBuilder {
    /// Create new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a state as accepting
    pub fn accept_state(mut self, state: u8) -> Self {
        self.accept.insert(State(state));
        self
    }

    /// Add a transition rule; `None` denotes epsilon
    pub fn add_transition(
        self,
        from: u8,
        input: Option<char>,
        pop: Option<char>,
        to: u8,
        push: Option<char>,
    ) -> Self {
        let key = TransitionKey {
            from: State(from),
            input: input.into(),
            pop: pop.into(),
        };
        self.with_transition(key, Transition { to: State(to), push: push.into() })
    }

    pub(crate) fn with_accept(mut self, state: State) -> Self {
        self.accept.insert(state);
        self
    }

    pub(crate) fn with_transition(mut self, key: TransitionKey, transition: Transition) -> Self {
        self.states.insert(key.from);
        self.states.insert(transition.to);
        self.input_alphabet.extend(key.input.as_char());
        self.stack_alphabet.extend(key.pop.as_char());
        self.stack_alphabet.extend(transition.push.as_char());

        if let Some(previous) = self.table.insert(key, transition) {
            if previous != transition {
                tracing::debug!(
                    from = %key.from,
                    input = %key.input,
                    pop = %key.pop,
                    "transition key redefined, keeping the later entry"
                );
                self.collisions.push(Collision {
                    key,
                    previous,
                    replacement: transition,
                });
            }
        }
        self
    }

    /// Build the pushdown automaton
    pub fn build(self) -> Pda {
        Pda {
            accept: self.accept,
            states: self.states,
            input_alphabet: self.input_alphabet,
            stack_alphabet: self.stack_alphabet,
            table: self.table,
            collisions: self.collisions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_derives_alphabets() {
        let pda = Pda::builder()
            .accept_state(5)
            .add_transition(0, Some('a'), None, 1, Some('x'))
            .add_transition(1, Some('b'), Some('x'), 5, None)
            .build();

        assert_eq!(pda.state_count(), 3);
        assert_eq!(pda.input_alphabet().iter().collect::<String>(), "ab");
        assert_eq!(pda.stack_alphabet().iter().collect::<String>(), "x");
        assert!(pda.collisions().is_empty());
    }

    #[test]
    fn test_later_transition_wins() {
        let pda = Pda::builder()
            .add_transition(0, Some('a'), None, 1, Some('x'))
            .add_transition(0, Some('a'), None, 2, Some('y'))
            .build();

        let effective = pda.table().get(State::START, Symbol::Char('a'), Symbol::Epsilon);
        assert_eq!(
            effective,
            Some(Transition {
                to: State::new(2),
                push: Symbol::Char('y'),
            })
        );
        assert_eq!(pda.collisions().len(), 1);
        assert_eq!(pda.collisions()[0].previous.to, State::new(1));
    }

    #[test]
    fn test_identical_redefinition_is_not_a_collision() {
        let pda = Pda::builder()
            .add_transition(0, Some('a'), None, 1, Some('x'))
            .add_transition(0, Some('a'), None, 1, Some('x'))
            .build();

        assert!(pda.collisions().is_empty());
        assert_eq!(pda.table().len(), 1);
    }

    #[test]
    fn test_trap_never_accepts() {
        let pda = Pda::builder().accept_state(255).accept_state(3).build();

        assert!(pda.is_accepting(State::new(3)));
        assert!(!pda.is_accepting(State::TRAP));
    }
}
