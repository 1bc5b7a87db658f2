//! The fixed catalogue of diagnostic codes.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which kind of problem a diagnostic reports.
///
/// Codes are stable and rendered as a category letter plus three digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// `E001`: a top-level unit starts with a word that is not `library`,
    /// `use`, `entity`, `architecture` or `package`.
    UnrecognizedUnit,
    /// `E002`: a top-level unit was recognized but its contents did not parse.
    MalformedUnit,
    /// `W001`: re-parsing the formatter's output did not reproduce the tree.
    RoundTripMismatch,
}

impl DiagnosticCode {
    /// The code as printed, e.g. `E001`.
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::UnrecognizedUnit => "E001",
            DiagnosticCode::MalformedUnit => "E002",
            DiagnosticCode::RoundTripMismatch => "W001",
        }
    }

    /// Severity implied by the code's category letter.
    pub fn severity(self) -> Severity {
        match self.as_str().as_bytes().first() {
            Some(b'E') => Severity::Error,
            Some(b'W') => Severity::Warning,
            _ => Severity::Note,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_codes() {
        assert_eq!(DiagnosticCode::UnrecognizedUnit.to_string(), "E001");
        assert_eq!(DiagnosticCode::MalformedUnit.to_string(), "E002");
        assert_eq!(DiagnosticCode::RoundTripMismatch.to_string(), "W001");
    }

    #[test]
    fn severity_follows_prefix() {
        assert_eq!(DiagnosticCode::MalformedUnit.severity(), Severity::Error);
        assert_eq!(DiagnosticCode::RoundTripMismatch.severity(), Severity::Warning);
    }
}
