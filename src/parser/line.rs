//! Line grammar for machine definitions
//!
//! Header: `{s1,s2,...}`. Transition: `from,input,pop,to,push` where an empty
//! field (or a lone backtick) is epsilon. Field boundaries are resolved the
//! way a greedy `(\d+),(.*),(.*),(\d+),(.*)` match resolves them, so the
//! comma itself is usable as an input or stack symbol.

use super::DefinitionError;
use crate::machine::{State, Symbol, Transition, TransitionKey};

/// Legacy explicit epsilon marker.
pub const EPSILON_MARKER: char = '`';

/// Whether `c` may appear as a non-epsilon input symbol.
pub fn is_printable(c: char) -> bool {
    matches!(c, ' '..='~') && c != EPSILON_MARKER
}

/// Parse the accept-state list out of the header line.
///
/// Returns `Ok(None)` when the line carries no brace list at all.
pub(crate) fn parse_header(
    text: &str,
    line: usize,
) -> Result<Option<Vec<State>>, DefinitionError> {
    let Some(open) = text.find('{') else {
        return Ok(None);
    };
    let Some(len) = text[open + 1..].find('}') else {
        return Ok(None);
    };
    let body = &text[open + 1..open + 1 + len];
    if body.trim().is_empty() {
        return Ok(Some(Vec::new()));
    }

    body.split(',')
        .map(|entry| {
            let entry = entry.trim();
            entry
                .parse::<u8>()
                .map(State::new)
                .map_err(|_| DefinitionError::AcceptState {
                    line,
                    value: entry.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Parse one transition line into its table key and target.
pub(crate) fn parse_transition(
    text: &str,
    line: usize,
) -> Result<(TransitionKey, Transition), DefinitionError> {
    let fields = split_fields(text).ok_or_else(|| DefinitionError::MalformedTransition {
        line,
        text: text.to_string(),
    })?;

    let from = parse_state(fields.from, line)?;
    let to = parse_state(fields.to, line)?;
    let input = parse_symbol(fields.input, line, SymbolRole::Input)?;
    let pop = parse_symbol(fields.pop, line, SymbolRole::Stack)?;
    let push = parse_symbol(fields.push.trim(), line, SymbolRole::Stack)?;

    Ok((TransitionKey { from, input, pop }, Transition { to, push }))
}

#[derive(Debug, PartialEq, Eq)]
struct Fields<'a> {
    from: &'a str,
    input: &'a str,
    pop: &'a str,
    to: &'a str,
    push: &'a str,
}

fn split_fields(text: &str) -> Option<Fields<'_>> {
    let commas: Vec<usize> = text.match_indices(',').map(|(idx, _)| idx).collect();
    let (&first, rest) = commas.split_first()?;

    let from = &text[..first];
    if from.is_empty() || !from.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Longest input field first, then longest pop field.
    for (i, &input_end) in rest.iter().enumerate().rev() {
        for &pop_end in rest[i + 1..].iter().rev() {
            let tail = &text[pop_end + 1..];
            let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
            if digits > 0 && tail[digits..].starts_with(',') {
                return Some(Fields {
                    from,
                    input: &text[first + 1..input_end],
                    pop: &text[input_end + 1..pop_end],
                    to: &tail[..digits],
                    push: &tail[digits + 1..],
                });
            }
        }
    }
    None
}

fn parse_state(text: &str, line: usize) -> Result<State, DefinitionError> {
    text.parse::<u8>()
        .map(State::new)
        .map_err(|_| DefinitionError::StateOutOfRange {
            line,
            value: text.to_string(),
        })
}

#[derive(Debug, Clone, Copy)]
enum SymbolRole {
    Input,
    Stack,
}

fn parse_symbol(text: &str, line: usize, role: SymbolRole) -> Result<Symbol, DefinitionError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next(), role) {
        (None, _, _) | (Some(EPSILON_MARKER), None, _) => Ok(Symbol::Epsilon),
        (Some(c), None, SymbolRole::Input) if is_printable(c) => Ok(Symbol::Char(c)),
        // Stack symbols only need to be a single character
        (Some(c), None, SymbolRole::Stack) => Ok(Symbol::Char(c)),
        _ => {
            let symbol = text.to_string();
            Err(match role {
                SymbolRole::Input => DefinitionError::InvalidInputSymbol { line, symbol },
                SymbolRole::Stack => DefinitionError::InvalidStackSymbol { line, symbol },
            })
        }
    }
}
