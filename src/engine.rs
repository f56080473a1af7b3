//! Execution engine
//!
//! Runs one candidate string against a machine. Each run owns a fresh
//! [`Configuration`]; the machine itself is only read, so any number of runs
//! may proceed concurrently over one [`Pda`].
//!
//! One step of the main loop:
//! 1. Pop the stack (epsilon when empty).
//! 2. If an epsilon-input rule exists for exactly the popped symbol, the
//!    pending character is put back and this step reads epsilon instead.
//! 3. Resolve the rule: an epsilon-pop rule wins over the rule keyed on the
//!    popped symbol (and the popped symbol is restored); with neither, the
//!    run enters the trap state.
//!
//! Once the input is exhausted, epsilon-input rules keep firing until none
//! applies, the run is trapped, or the step budget runs out.

use crate::machine::{Configuration, Pda, State, Symbol};
use crate::EngineConfig;
use std::fmt;

/// Default step budget per run
pub const TIMEOUT: usize = 10_000;

/// Why a run did not accept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Rejection {
    /// Input contained a character outside the input alphabet
    SymbolNotInAlphabet(char),
    /// No transition applied and the run entered the trap state
    Trapped,
    /// The step budget was used up
    StepBudgetExhausted,
    /// The run halted normally in a non-accepting state
    NotAccepting(State),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::SymbolNotInAlphabet(c) => write!(f, "'{c}' is not in the input alphabet"),
            Rejection::Trapped => f.write_str("entered the trap state"),
            Rejection::StepBudgetExhausted => f.write_str("step budget exhausted"),
            Rejection::NotAccepting(state) => write!(f, "halted in non-accepting state {state}"),
        }
    }
}

/// Result of a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Whether the string is in the language
    pub accepted: bool,

    /// State the run halted in
    pub final_state: State,

    /// Steps consumed
    pub steps: usize,

    /// Whether the step budget was reached
    pub timed_out: bool,

    /// Reason for rejection, `None` when accepted
    pub rejection: Option<Rejection>,
}

/// Runs candidate strings against one machine
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'a> {
    pda: &'a Pda,
    step_budget: usize,
}

impl<'a> Simulator<'a> {
    /// Create simulator with an explicit step budget
    pub fn new(pda: &'a Pda, step_budget: usize) -> Self {
        Self { pda, step_budget }
    }

    /// Create simulator from engine configuration
    pub fn with_config(pda: &'a Pda, config: &EngineConfig) -> Self {
        Self::new(pda, config.step_budget)
    }

    /// Whether `input` is accepted
    pub fn accepts(&self, input: &str) -> bool {
        self.run(input).accepted
    }

    /// Run `input` from the initial configuration
    ///
    /// A non-empty string made only of whitespace stands for the empty
    /// string read from a blank line: it is judged on the start state alone,
    /// without consuming anything or following epsilon rules.
    pub fn run(&self, input: &str) -> RunOutcome {
        let mut config = Configuration::initial();

        if !input.is_empty() && input.chars().all(char::is_whitespace) {
            return self.verdict(&config, None);
        }

        let mut pending: Vec<char> = input.chars().rev().collect();
        while config.steps() < self.step_budget {
            let Some(next) = pending.pop() else {
                break;
            };
            config.tick();

            if !self.pda.input_alphabet().contains(&next) {
                tracing::trace!(symbol = %next, "symbol outside input alphabet");
                return self.verdict(&config, Some(Rejection::SymbolNotInAlphabet(next)));
            }

            let state = config.state();
            let popped = config.stack_mut().pop();
            let read = if self.pda.table().get(state, Symbol::Epsilon, popped).is_some() {
                pending.push(next);
                Symbol::Epsilon
            } else {
                Symbol::Char(next)
            };

            tracing::trace!(step = config.steps(), %state, %read, %popped, "step");
            self.fire(&mut config, read, popped);

            if config.state().is_trap() {
                break;
            }
        }

        while !config.state().is_trap()
            && config.steps() < self.step_budget
            && self.pda.table().has_epsilon_input(config.state())
        {
            config.tick();
            let popped = config.stack_mut().pop();
            tracing::trace!(
                step = config.steps(),
                state = %config.state(),
                %popped,
                "epsilon closure step"
            );
            self.fire(&mut config, Symbol::Epsilon, popped);
        }

        self.verdict(&config, None)
    }

    /// Resolve and apply the rule for (current state, `read`, `popped`)
    fn fire(&self, config: &mut Configuration, read: Symbol, popped: Symbol) {
        let state = config.state();
        let table = self.pda.table();

        match (
            table.get(state, read, Symbol::Epsilon),
            table.get(state, read, popped),
        ) {
            (Some(transition), _) => {
                config.stack_mut().push(popped);
                config.apply_transition(transition);
            }
            (None, Some(transition)) => config.apply_transition(transition),
            (None, None) => {
                tracing::debug!(%state, %read, %popped, "no transition, entering trap state");
                config.trap();
            }
        }
    }

    fn verdict(&self, config: &Configuration, early: Option<Rejection>) -> RunOutcome {
        let final_state = config.state();
        let timed_out = config.steps() >= self.step_budget;
        if timed_out {
            tracing::debug!(steps = config.steps(), "step budget exhausted");
        }

        let rejection = early.or_else(|| {
            if final_state.is_trap() {
                Some(Rejection::Trapped)
            } else if timed_out {
                Some(Rejection::StepBudgetExhausted)
            } else if !self.pda.is_accepting(final_state) {
                Some(Rejection::NotAccepting(final_state))
            } else {
                None
            }
        });

        RunOutcome {
            accepted: rejection.is_none(),
            final_state,
            steps: config.steps(),
            timed_out,
            rejection,
        }
    }
}
