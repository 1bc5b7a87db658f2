//! File parsing that reports each failing design unit instead of stopping
//! at the first one.

use crate::file::{split_units, UnitKind, VhdlFile};
use crate::limits;
use vesta_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use vesta_source::{SourceFile, Span};

/// Parses `file`, emitting one diagnostic per unit that fails.
///
/// Every unit is tried even after a failure, so a single run reports all of
/// them. Returns the parsed file only if no unit failed; the result is then
/// identical to [`VhdlFile::parse`](crate::VhdlNode::parse) on the same text.
pub fn parse_source(file: &SourceFile, sink: &DiagnosticSink) -> Option<VhdlFile> {
    if !limits::within(&file.text, limits::BLOCK_MAX_LEN) {
        sink.emit(
            Diagnostic::new(DiagnosticCode::MalformedUnit, "file is too large to parse")
                .at(Span::from_range(file.id, 0..file.text.len()))
                .with_note(format!("files are limited to {} bytes", limits::BLOCK_MAX_LEN)),
        );
        return None;
    }
    let mut parsed = VhdlFile::default();
    let mut failed = false;
    let mut in_header = true;
    for unit in split_units(&file.text) {
        in_header &= unit.kind == UnitKind::Comment;
        if parsed.push_unit(&unit, in_header).is_some() {
            continue;
        }
        failed = true;
        let span = Span::from_range(file.id, unit.span.clone());
        let diagnostic = match unit.kind {
            UnitKind::Unknown => Diagnostic::new(
                DiagnosticCode::UnrecognizedUnit,
                format!("unexpected `{}`", leading_words(unit.text)),
            )
            .at(span)
            .with_label("not a design unit")
            .with_note("expected `entity`, `architecture`, `package`, `library` or `use`"),
            kind => Diagnostic::new(
                DiagnosticCode::MalformedUnit,
                format!("malformed {}", kind.describe()),
            )
            .at(span)
            .with_label(format!("this {} could not be parsed", kind.describe())),
        };
        sink.emit(diagnostic);
    }
    (!failed).then_some(parsed)
}

/// The first line of a unit, shortened for messages.
fn leading_words(text: &str) -> &str {
    let line = text.lines().next().unwrap_or(text).trim();
    match line.char_indices().nth(40) {
        Some((at, _)) => &line[..at],
        None => line,
    }
}
