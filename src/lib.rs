//! # Pushdown automaton simulation
//!
//! This library parses pushdown automata from a small line-oriented text
//! format, classifies them as deterministic or not, and evaluates batches
//! of candidate strings against them under a bounded step budget.
//!
//! ## Pipeline
//!
//! 1. **Parse**: fold the definition lines into an immutable [`Pda`]
//! 2. **Classify**: confirm determinism or collect [`Diagnostic`]s ([`validate`])
//! 3. **Execute**: run each string on a fresh configuration ([`engine`])
//! 4. **Report**: aggregate verdicts and machine metrics ([`batch`], [`report`])
//!
//! ## Usage Example
//!
//! ```
//! use pushdown::{EngineConfig, Machine};
//!
//! let machine = Machine::load("{5}\n0,a,,1,x\n1,b,x,5,\n").unwrap();
//! let simulator = machine.simulator(&EngineConfig::default());
//! assert!(simulator.accepts("ab"));
//! assert!(!simulator.accepts("ba"));
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod batch;    // Batch evaluation and per-machine reports
pub mod engine;   // Simulation loop
pub mod machine;  // Pushdown automaton representation
pub mod parser;   // Definition text format
pub mod report;   // Log rendering
pub mod validate; // Determinism classification

// Re-exports for convenience
pub use batch::MachineReport;
pub use engine::{Rejection, RunOutcome, Simulator, TIMEOUT};
pub use machine::{Configuration, Pda, Stack, State, StateSet, Symbol, Transition, TransitionKey};
pub use parser::{parse_definition, DefinitionError};
pub use validate::{classify, Classification, Determinism, Diagnostic};

use thiserror::Error;

/// Configuration parameters for evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum simulation steps per run before it is rejected
    pub step_budget: usize,

    /// Refuse to evaluate machines that are not confirmed deterministic
    pub require_deterministic: bool,

    /// Evaluate batch strings across the rayon thread pool
    pub parallel: bool,
}

impl EngineConfig {
    /// Default configuration with a custom step budget
    pub fn with_step_budget(step_budget: usize) -> Self {
        Self {
            step_budget,
            ..Self::default()
        }
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), PdaError> {
        if self.step_budget == 0 {
            return Err(PdaError::InvalidConfig(
                "step budget must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_budget: TIMEOUT,
            require_deterministic: false,
            parallel: false,
        }
    }
}

/// Errors that can occur while loading a machine
#[derive(Error, Debug)]
pub enum PdaError {
    /// Definition text is malformed (INVALID)
    #[error("invalid machine definition: {0}")]
    Definition(#[from] DefinitionError),

    /// Determinism was required but could not be confirmed
    #[error("machine is not deterministic ({} violation(s))", .diagnostics.len())]
    NotDeterministic {
        /// Violations found by the validator
        diagnostics: Vec<Diagnostic>,
    },

    /// Engine configuration is unusable
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

/// A parsed and classified machine
///
/// Pairs the read-only [`Pda`] with the validator's verdict; both are fixed
/// for the machine's lifetime.
#[derive(Debug, Clone)]
pub struct Machine {
    pda: Pda,
    determinism: Determinism,
}

impl Machine {
    /// Parse and classify a definition
    pub fn load(definition: &str) -> Result<Self, DefinitionError> {
        let pda = parse_definition(definition)?;
        let determinism = classify(&pda);
        Ok(Self { pda, determinism })
    }

    /// Parse and classify a definition, enforcing `config`
    pub fn load_with(definition: &str, config: &EngineConfig) -> Result<Self, PdaError> {
        config.validate()?;
        let machine = Self::load(definition)?;
        if config.require_deterministic && !machine.determinism.is_deterministic() {
            return Err(PdaError::NotDeterministic {
                diagnostics: machine.determinism.diagnostics,
            });
        }
        Ok(machine)
    }

    /// Underlying automaton
    pub fn pda(&self) -> &Pda {
        &self.pda
    }

    /// DPDA or NPDA
    pub fn classification(&self) -> Classification {
        self.determinism.classification
    }

    /// Full validator output
    pub fn determinism(&self) -> &Determinism {
        &self.determinism
    }

    /// Simulator over this machine
    pub fn simulator(&self, config: &EngineConfig) -> Simulator<'_> {
        Simulator::with_config(&self.pda, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let config = EngineConfig::default();
        assert_eq!(config.step_budget, 10_000);
        assert!(config.validate().is_ok());
        assert!(EngineConfig::with_step_budget(0).validate().is_err());
    }

    #[test]
    fn test_load_with_requires_determinism() {
        let definition = "{}\n0,a,,1,x\n0,a,,2,y\n";
        let strict = EngineConfig {
            require_deterministic: true,
            ..EngineConfig::default()
        };

        let err = Machine::load_with(definition, &strict).unwrap_err();
        assert!(matches!(err, PdaError::NotDeterministic { ref diagnostics } if diagnostics.len() == 1));

        let lenient = Machine::load_with(definition, &EngineConfig::default()).unwrap();
        assert_eq!(lenient.classification(), Classification::Npda);
    }

    #[test]
    fn test_load_invalid() {
        let err = Machine::load_with("{300}\n", &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, PdaError::Definition(DefinitionError::AcceptState { .. })));
    }
}
