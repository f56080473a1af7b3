//! Configuration (instantaneous description) of a pushdown automaton
//!
//! Represents complete run state at a point in time:
//! - Control state q ∈ Q
//! - Stack contents
//! - Number of simulation steps taken so far

use super::{State, Symbol, Transition};

/// Last-in-first-out stack of stack-alphabet symbols
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    symbols: Vec<char>,
}

impl Stack {
    /// Create empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the top symbol; an empty stack yields epsilon
    pub fn pop(&mut self) -> Symbol {
        self.symbols.pop().into()
    }

    /// Push a symbol; pushing epsilon leaves the stack unchanged
    pub fn push(&mut self, symbol: Symbol) {
        if let Symbol::Char(c) = symbol {
            self.symbols.push(c);
        }
    }

    /// Number of symbols on the stack
    pub fn depth(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the stack is empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Contents from bottom to top
    pub fn as_slice(&self) -> &[char] {
        &self.symbols
    }
}

/// Complete instantaneous description of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Current control state
    state: State,

    /// Run-owned stack
    stack: Stack,

    /// Steps consumed from the budget
    steps: usize,
}

impl Configuration {
    /// Initial configuration: start state, empty stack, no steps taken
    pub fn initial() -> Self {
        Self {
            state: State::START,
            stack: Stack::new(),
            steps: 0,
        }
    }

    /// Get current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Get stack
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Get mutable stack
    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    /// Steps taken so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Consume one step of the budget
    pub fn tick(&mut self) {
        self.steps += 1;
    }

    /// Apply transition to this configuration
    pub fn apply_transition(&mut self, transition: Transition) {
        self.state = transition.to;
        self.stack.push(transition.push);
    }

    /// Enter the trap state
    pub fn trap(&mut self) {
        self.state = State::TRAP;
        self.stack.push(Symbol::Epsilon);
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::initial()
    }
}
