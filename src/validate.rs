//! Determinism validation
//!
//! Classifies a parsed machine as DPDA or NPDA. Two checks feed the verdict:
//!
//! 1. **Key collisions** recorded while the table was built: the same
//!    (state, input, pop) key defined twice with different targets.
//! 2. **Pop-set collisions**: from one state, two different input symbols
//!    whose sets of pop symbols are identical.
//!
//! The second check is a structural heuristic and is not a proof of
//! determinism in the formal sense. It does not reason about epsilon-input
//! rules racing ordinary ones, nor about epsilon-pop rules overlapping
//! symbol-specific pops. A machine classified DPDA can still behave
//! non-deterministically in those situations; the engine then resolves the
//! race with its fixed priority order.

use crate::machine::{Collision, Pda, State, Symbol};
use std::fmt;

/// Machine classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Classification {
    /// Malformed definition; never executed
    Invalid,
    /// Deterministic pushdown automaton
    Dpda,
    /// Determinism could not be confirmed; still executable
    Npda,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Classification::Invalid => "INVALID",
            Classification::Dpda => "DPDA",
            Classification::Npda => "NPDA",
        })
    }
}

/// Evidence that a machine is not deterministic
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Diagnostic {
    /// A key was defined twice with different targets; the later one is in effect
    KeyCollision(Collision),

    /// Two input symbols from the same state share an identical pop-symbol set
    PopSetCollision {
        /// Source state
        state: State,
        /// The two input symbols, in ascending order
        inputs: (Symbol, Symbol),
        /// The shared pop-symbol set, in ascending order
        pops: Vec<Symbol>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::KeyCollision(collision) => write!(
                f,
                "({}, {}, {}) -> ({}, {}) replaced ({}, {})",
                collision.key.from,
                collision.key.input,
                collision.key.pop,
                collision.replacement.to,
                collision.replacement.push,
                collision.previous.to,
                collision.previous.push,
            ),
            Diagnostic::PopSetCollision {
                state,
                inputs,
                pops,
            } => {
                let pops: Vec<String> = pops.iter().map(Symbol::to_string).collect();
                write!(
                    f,
                    "state {state}: inputs {} and {} pop the same set {{{}}}",
                    inputs.0,
                    inputs.1,
                    pops.join(",")
                )
            }
        }
    }
}

/// Outcome of determinism validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Determinism {
    /// DPDA or NPDA
    pub classification: Classification,

    /// Every violation found, collisions first
    pub diagnostics: Vec<Diagnostic>,
}

impl Determinism {
    /// Whether the machine was confirmed deterministic.
    pub fn is_deterministic(&self) -> bool {
        self.classification == Classification::Dpda
    }
}

/// Classify a parsed machine.
pub fn classify(pda: &Pda) -> Determinism {
    let mut diagnostics: Vec<Diagnostic> = pda
        .collisions()
        .iter()
        .copied()
        .map(Diagnostic::KeyCollision)
        .collect();

    for (state, by_input) in pda.table().pop_sets() {
        let groups: Vec<_> = by_input.into_iter().collect();
        for (i, (input_a, pops_a)) in groups.iter().enumerate() {
            for (input_b, pops_b) in &groups[i + 1..] {
                if pops_a == pops_b {
                    diagnostics.push(Diagnostic::PopSetCollision {
                        state,
                        inputs: (*input_a, *input_b),
                        pops: pops_a.iter().copied().collect(),
                    });
                }
            }
        }
    }

    for diagnostic in &diagnostics {
        tracing::debug!(%diagnostic, "determinism violation");
    }

    let classification = if diagnostics.is_empty() {
        Classification::Dpda
    } else {
        Classification::Npda
    };
    tracing::info!(
        %classification,
        violations = diagnostics.len(),
        "machine classified"
    );

    Determinism {
        classification,
        diagnostics,
    }
}
