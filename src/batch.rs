//! Batch evaluation
//!
//! Evaluates a list of candidate strings against one machine and collects
//! the per-machine metrics consumed by [`crate::report`]. Runs are
//! independent, so with [`EngineConfig::parallel`] they are spread over the
//! rayon pool; accepted strings keep their input order either way.

use crate::engine::RunOutcome;
use crate::validate::{Classification, Diagnostic};
use crate::{EngineConfig, Machine};
use rayon::prelude::*;

/// Per-machine evaluation summary
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MachineReport {
    /// DPDA, NPDA or INVALID
    pub classification: Classification,

    /// Distinct states discovered from the transitions
    pub state_count: usize,

    /// Sorted input alphabet
    pub input_alphabet: String,

    /// Sorted stack alphabet
    pub stack_alphabet: String,

    /// Number of strings evaluated
    pub evaluated: usize,

    /// Accepted strings, in input order
    pub accepted: Vec<String>,

    /// Determinism violations found by the validator
    pub diagnostics: Vec<Diagnostic>,

    /// Parse failure for INVALID machines
    pub invalid_reason: Option<String>,
}

impl MachineReport {
    /// Report for a definition that failed to parse; nothing is evaluated.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            classification: Classification::Invalid,
            state_count: 0,
            input_alphabet: String::new(),
            stack_alphabet: String::new(),
            evaluated: 0,
            accepted: Vec::new(),
            diagnostics: Vec::new(),
            invalid_reason: Some(reason.into()),
        }
    }

    /// Number of accepted strings
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }
}

/// Run every string against `machine`, returning the outcomes in order.
pub fn run_all<S>(machine: &Machine, strings: &[S], config: &EngineConfig) -> Vec<RunOutcome>
where
    S: AsRef<str> + Sync,
{
    let simulator = machine.simulator(config);
    if config.parallel {
        strings
            .par_iter()
            .map(|input| simulator.run(input.as_ref()))
            .collect()
    } else {
        strings
            .iter()
            .map(|input| simulator.run(input.as_ref()))
            .collect()
    }
}

/// Evaluate `strings` against a loaded machine.
///
/// When `config.require_deterministic` is set and the machine is NPDA, the
/// report carries the machine metrics but no string is evaluated.
pub fn evaluate<S>(machine: &Machine, strings: &[S], config: &EngineConfig) -> MachineReport
where
    S: AsRef<str> + Sync,
{
    let pda = machine.pda();
    let mut report = MachineReport {
        classification: machine.classification(),
        state_count: pda.state_count(),
        input_alphabet: pda.input_alphabet().iter().collect(),
        stack_alphabet: pda.stack_alphabet().iter().collect(),
        evaluated: 0,
        accepted: Vec::new(),
        diagnostics: machine.determinism().diagnostics.clone(),
        invalid_reason: None,
    };

    if config.require_deterministic && !machine.determinism().is_deterministic() {
        tracing::info!(
            classification = %report.classification,
            "skipping evaluation of non-deterministic machine"
        );
        return report;
    }

    let outcomes = run_all(machine, strings, config);
    report.evaluated = outcomes.len();
    report.accepted = strings
        .iter()
        .zip(&outcomes)
        .filter(|(_, outcome)| outcome.accepted)
        .map(|(input, _)| input.as_ref().to_string())
        .collect();

    tracing::info!(
        classification = %report.classification,
        accepted = report.accepted.len(),
        evaluated = report.evaluated,
        "machine evaluated"
    );
    report
}

/// Parse, classify and evaluate in one call.
///
/// A malformed definition produces an INVALID report instead of an error,
/// so one bad machine never stops a batch.
pub fn evaluate_definition<S>(
    definition: &str,
    strings: &[S],
    config: &EngineConfig,
) -> MachineReport
where
    S: AsRef<str> + Sync,
{
    match Machine::load(definition) {
        Ok(machine) => evaluate(&machine, strings, config),
        Err(err) => {
            tracing::warn!(error = %err, "machine definition rejected");
            MachineReport::invalid(err.to_string())
        }
    }
}
