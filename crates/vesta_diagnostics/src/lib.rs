//! Diagnostics reported by the vesta command-line tools.
//!
//! The parser itself only answers "parsed" or "did not parse". The file-level
//! checker and the formatter turn those answers into [`Diagnostic`]s that carry
//! a [`DiagnosticCode`], a byte [`Span`](vesta_source::Span) and optional notes.
//! A [`DiagnosticSink`] collects them from parallel workers, and a
//! [`DiagnosticRenderer`] formats them either for a terminal or as JSON lines.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod render;
pub mod severity;
pub mod sink;

pub use code::DiagnosticCode;
pub use diagnostic::Diagnostic;
pub use render::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
