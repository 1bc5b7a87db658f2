//! Formatting diagnostics for people and for tools.

use crate::diagnostic::Diagnostic;
use vesta_source::SourceDb;

/// Turns a diagnostic into printable text.
pub trait DiagnosticRenderer {
    /// Renders one diagnostic. The result ends with a newline.
    fn render(&self, diag: &Diagnostic, db: &SourceDb) -> String;
}

/// Renders in the rustc style:
///
/// ```text
/// error[E002]: malformed entity `counter`
///   --> rtl/counter.vhd:3:1
///    |
///  3 | entity counter is
///    | ^^^^^^^^^^^^^^^^^ does not parse
///    = note: ...
/// ```
///
/// Only the first line of a multi-line span is quoted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer {
    /// Whether to emit ANSI color sequences.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, sgr: &str, text: &str) -> String {
        if self.color {
            format!("{sgr}{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

const GUTTER: &str = "\x1b[1;34m";

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, db: &SourceDb) -> String {
        let mut out = format!(
            "{}: {}\n",
            self.paint(
                diag.severity.ansi(),
                &format!("{}[{}]", diag.severity, diag.code)
            ),
            diag.message
        );

        let quoted = diag.span.and_then(|span| {
            let file = db.file(span.file)?;
            let location = db.locate(span)?;
            let line = file.line(location.line)?;
            Some((span, location, line))
        });

        let mut width = 1;
        if let Some((span, location, line)) = quoted {
            let number = location.line.to_string();
            width = number.len();
            let pad = " ".repeat(width);
            let bar = self.paint(GUTTER, "|");
            out.push_str(&format!("{pad}{} {location}\n", self.paint(GUTTER, "-->")));
            out.push_str(&format!("{pad} {bar}\n"));
            out.push_str(&format!("{} {bar} {line}\n", self.paint(GUTTER, &number)));

            let column = location.column as usize;
            let remaining = line.len().saturating_sub(column - 1).max(1);
            let carets = (span.len() as usize).clamp(1, remaining);
            let underline = format!("{}{}", " ".repeat(column - 1), "^".repeat(carets));
            let label = diag
                .label
                .as_ref()
                .map(|l| format!(" {l}"))
                .unwrap_or_default();
            out.push_str(&format!(
                "{pad} {bar} {}\n",
                self.paint(diag.severity.ansi(), &format!("{underline}{label}"))
            ));
        }

        for note in &diag.notes {
            out.push_str(&format!("{} = note: {note}\n", " ".repeat(width)));
        }
        out
    }
}

/// Renders each diagnostic as one line of JSON with its location resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(serde::Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
    path: Option<String>,
    line: Option<u32>,
    column: Option<u32>,
}

impl DiagnosticRenderer for JsonRenderer {
    fn render(&self, diag: &Diagnostic, db: &SourceDb) -> String {
        let location = diag.span.and_then(|span| db.locate(span));
        let record = JsonRecord {
            diagnostic: diag,
            path: location.as_ref().map(|l| l.path.display().to_string()),
            line: location.as_ref().map(|l| l.line),
            column: location.as_ref().map(|l| l.column),
        };
        match serde_json::to_string(&record) {
            Ok(line) => line + "\n",
            Err(err) => format!("{{\"error\":\"{err}\"}}\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;
    use vesta_source::Span;

    fn db_with(text: &str) -> (SourceDb, vesta_source::FileId) {
        let mut db = SourceDb::new();
        let id = db.insert("rtl/top.vhd", text.to_string());
        (db, id)
    }

    #[test]
    fn terminal_quotes_source_line() {
        let (db, id) = db_with("library ieee;\nentyty top is\nend top;\n");
        let diag = Diagnostic::new(DiagnosticCode::UnrecognizedUnit, "unrecognized design unit")
            .at(Span::new(id, 14, 20))
            .with_label("unknown keyword");
        let out = TerminalRenderer::new(false).render(&diag, &db);
        assert!(out.starts_with("error[E001]: unrecognized design unit\n"));
        assert!(out.contains("--> rtl/top.vhd:2:1"));
        assert!(out.contains("2 | entyty top is"));
        assert!(out.contains("  | ^^^^^^ unknown keyword"));
    }

    #[test]
    fn terminal_without_span_prints_header_and_notes() {
        let db = SourceDb::new();
        let diag = Diagnostic::new(DiagnosticCode::RoundTripMismatch, "output drifted")
            .with_note("file left unchanged");
        let out = TerminalRenderer::new(false).render(&diag, &db);
        assert_eq!(out, "warning[W001]: output drifted\n  = note: file left unchanged\n");
    }

    #[test]
    fn terminal_color_wraps_header() {
        let db = SourceDb::new();
        let diag = Diagnostic::new(DiagnosticCode::MalformedUnit, "bad");
        let out = TerminalRenderer::new(true).render(&diag, &db);
        assert!(out.starts_with("\x1b[1;31merror[E002]\x1b[0m: bad"));
    }

    #[test]
    fn caret_run_stops_at_line_end() {
        let (db, id) = db_with("entity a is\nend a;\n");
        let diag =
            Diagnostic::new(DiagnosticCode::MalformedUnit, "bad entity").at(Span::new(id, 7, 19));
        let out = TerminalRenderer::new(false).render(&diag, &db);
        assert!(out.contains("  | \x20\x20\x20\x20\x20\x20\x20^^^^\n"));
    }

    #[test]
    fn json_line_has_location() {
        let (db, id) = db_with("entity e is\nfoo\n");
        let diag = Diagnostic::new(DiagnosticCode::MalformedUnit, "bad").at(Span::new(id, 12, 15));
        let out = JsonRenderer.render(&diag, &db);
        assert!(out.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["code"], "MalformedUnit");
        assert_eq!(value["severity"], "error");
        assert_eq!(value["path"], "rtl/top.vhd");
        assert_eq!(value["line"], 2);
        assert_eq!(value["column"], 1);
    }
}
