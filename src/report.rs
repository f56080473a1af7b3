//! Report rendering
//!
//! Two artifacts per machine: the log (classification and metrics) and the
//! accepted language (one accepted string per line).

use crate::batch::MachineReport;
use std::fmt;

/// Render the per-machine log.
pub fn render_log(report: &MachineReport) -> String {
    report.to_string()
}

/// Render the accepted strings, one per line.
pub fn render_language(report: &MachineReport) -> String {
    report
        .accepted
        .iter()
        .map(|accepted| format!("{accepted}\n"))
        .collect()
}

impl fmt::Display for MachineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Valid: {}", self.classification)?;
        writeln!(f, "States: {}", self.state_count)?;
        writeln!(f, "Input Alphabet: {}", self.input_alphabet)?;
        writeln!(f, "Stack Alphabet: {}", self.stack_alphabet)?;
        writeln!(f, "Accepted Strings: {} / {}", self.accepted.len(), self.evaluated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::evaluate_definition;
    use crate::EngineConfig;

    #[test]
    fn test_log_layout() {
        let report = evaluate_definition(
            "{5}\n0,a,,1,x\n1,b,x,5,\n",
            &["ab", "b", "ab"],
            &EngineConfig::default(),
        );

        assert_eq!(
            render_log(&report),
            "Valid: DPDA\n\
             States: 3\n\
             Input Alphabet: ab\n\
             Stack Alphabet: x\n\
             Accepted Strings: 2 / 3\n"
        );
        assert_eq!(render_language(&report), "ab\nab\n");
    }

    #[test]
    fn test_invalid_log() {
        let report = MachineReport::invalid("line 1: bad");

        assert_eq!(
            render_log(&report),
            "Valid: INVALID\nStates: 0\nInput Alphabet: \nStack Alphabet: \nAccepted Strings: 0 / 0\n"
        );
        assert!(render_language(&report).is_empty());
    }
}
