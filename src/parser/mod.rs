//! Definition parser
//!
//! Turns machine-definition text into an immutable [`Pda`]. The first line is
//! the header slot holding the accept states; every later non-blank line is
//! a transition. Parsing is fail-fast: the first malformed line aborts with a
//! [`DefinitionError`] and no partial machine is returned.

mod line;

pub use line::{is_printable, EPSILON_MARKER};

use crate::machine::{Pda, PdaBuilder};
use std::str::FromStr;
use thiserror::Error;

/// Reasons a definition is classified INVALID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Accept-state entry is not an integer in [0, 256)
    #[error("line {line}: accept state '{value}' is not a state in 0..=255")]
    AcceptState {
        /// 1-based line number
        line: usize,
        /// Offending entry
        value: String,
    },

    /// Transition source or target is not an integer in [0, 256)
    #[error("line {line}: state '{value}' is not a state in 0..=255")]
    StateOutOfRange {
        /// 1-based line number
        line: usize,
        /// Offending field
        value: String,
    },

    /// Line does not have the `from,input,pop,to,push` shape
    #[error("line {line}: expected 'from,input,pop,to,push', found '{text}'")]
    MalformedTransition {
        /// 1-based line number
        line: usize,
        /// Full line text
        text: String,
    },

    /// Input field is neither epsilon nor one printable character
    #[error("line {line}: input symbol '{symbol}' is not a printable character")]
    InvalidInputSymbol {
        /// 1-based line number
        line: usize,
        /// Offending field
        symbol: String,
    },

    /// Pop or push field is neither epsilon nor a single character
    #[error("line {line}: stack symbol '{symbol}' is not a single character")]
    InvalidStackSymbol {
        /// 1-based line number
        line: usize,
        /// Offending field
        symbol: String,
    },
}

impl DefinitionError {
    /// 1-based line number of the offending line.
    pub fn line(&self) -> usize {
        match self {
            DefinitionError::AcceptState { line, .. }
            | DefinitionError::StateOutOfRange { line, .. }
            | DefinitionError::MalformedTransition { line, .. }
            | DefinitionError::InvalidInputSymbol { line, .. }
            | DefinitionError::InvalidStackSymbol { line, .. } => *line,
        }
    }
}

/// Parse a machine definition.
pub fn parse_definition(text: &str) -> Result<Pda, DefinitionError> {
    let mut lines = text.lines().enumerate().map(|(idx, line)| (idx + 1, line));

    let builder = match lines.next() {
        Some((number, header)) => apply_header(PdaBuilder::new(), number, header)?,
        None => PdaBuilder::new(),
    };

    lines
        .filter(|(_, line)| !line.trim().is_empty())
        .try_fold(builder, |builder, (number, line)| {
            let (key, transition) = line::parse_transition(line, number)?;
            Ok::<_, DefinitionError>(builder.with_transition(key, transition))
        })
        .map(PdaBuilder::build)
}

fn apply_header(
    builder: PdaBuilder,
    number: usize,
    header: &str,
) -> Result<PdaBuilder, DefinitionError> {
    match line::parse_header(header, number)? {
        Some(states) => Ok(states.into_iter().fold(builder, PdaBuilder::with_accept)),
        None => {
            if !header.trim().is_empty() {
                tracing::warn!(
                    line = number,
                    header,
                    "header line has no accept-state list; machine has no accept states"
                );
            }
            Ok(builder)
        }
    }
}

impl FromStr for Pda {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_definition(s)
    }
}
