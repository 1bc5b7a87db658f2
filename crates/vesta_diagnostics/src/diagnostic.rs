//! A single reported problem.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use vesta_source::Span;

/// One problem found in a source file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: Severity,
    /// Which kind of problem this is.
    pub code: DiagnosticCode,
    /// Headline shown after the code.
    pub message: String,
    /// Where the problem is, when it can be pinned to a range of bytes.
    pub span: Option<Span>,
    /// Short text printed next to the underline.
    pub label: Option<String>,
    /// Follow-up lines printed as `= note: ...`.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic whose severity is derived from `code`.
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            span: None,
            label: None,
            notes: Vec::new(),
        }
    }

    /// Attaches a source range.
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Sets the underline label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Appends a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}
