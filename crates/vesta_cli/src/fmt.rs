//! `vesta fmt`: rewrite sources in canonical form.
//!
//! Each file that parses is serialized again. When `format.verify_roundtrip`
//! is set the output is re-parsed and must give back the same tree; otherwise
//! a `W001` warning is emitted and the file is left alone. Files whose
//! content hash is unchanged are not rewritten.

use rayon::prelude::*;
use vesta_common::ContentHash;
use vesta_config::FormatConfig;
use vesta_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use vesta_source::{SourceDb, SourceFile, Span};
use vesta_vhdl::{VhdlFile, VhdlNode};

use crate::pipeline::{discover_sources, load_sources, parse_all, render_diagnostics, resolve_config};
use crate::{FmtArgs, GlobalArgs, ReportFormat};

/// Renders `ast` in canonical form.
///
/// Returns `None`, after emitting `W001`, when verification is enabled and
/// the output does not parse back to `ast`.
pub fn format_source(
    file: &SourceFile,
    ast: &VhdlFile,
    config: &FormatConfig,
    sink: &DiagnosticSink,
) -> Option<String> {
    let mut text = ast.serialize();
    if config.verify_roundtrip && VhdlFile::parse(&text).as_ref() != Some(ast) {
        sink.emit(
            Diagnostic::new(
                DiagnosticCode::RoundTripMismatch,
                "formatted output does not parse back to the same tree",
            )
            .at(Span::from_range(file.id, 0..file.text.len()))
            .with_note("the file was left unchanged"),
        );
        return None;
    }
    if config.final_newline && !text.is_empty() {
        text.push('\n');
    }
    Some(text)
}

/// Runs the `vesta fmt` command.
///
/// With `--check`, lists files that would change and returns 1 if there are
/// any. Otherwise writes changed files. Returns 1 when any file failed to
/// parse.
pub fn run(args: &FmtArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (config, root) = resolve_config(global)?;
    let paths = discover_sources(&args.paths, &config.sources, &root)?;
    if paths.is_empty() {
        if !global.quiet {
            eprintln!("warning: no VHDL source files found");
        }
        return Ok(0);
    }

    let mut db = SourceDb::new();
    load_sources(&paths, &mut db)?;
    let sink = DiagnosticSink::new();
    let parsed = parse_all(&db, &sink, global.verbose);

    let changed: Vec<(&SourceFile, String)> = parsed
        .par_iter()
        .filter_map(|(id, ast)| {
            let file = db.file(*id)?;
            let text = format_source(file, ast.as_ref()?, &config.format, &sink)?;
            (ContentHash::of_text(&text) != file.hash).then_some((file, text))
        })
        .collect();

    let errors = sink.error_count();
    render_diagnostics(&sink, &db, ReportFormat::Text, global.color);

    if args.check {
        for (file, _) in &changed {
            println!("{}", file.path.display());
        }
        if !global.quiet {
            eprintln!("    {} file(s) would be reformatted", changed.len());
        }
        return Ok(if errors > 0 || !changed.is_empty() { 1 } else { 0 });
    }

    for (file, text) in &changed {
        std::fs::write(&file.path, text)
            .map_err(|e| format!("failed to write {}: {e}", file.path.display()))?;
        if global.verbose {
            eprintln!("   Formatted {}", file.path.display());
        }
    }
    if !global.quiet {
        eprintln!("    Formatted {} of {} file(s)", changed.len(), parsed.len());
    }
    Ok(if errors > 0 { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use vesta_source::FileId;

    const LOOSE: &str = "ENTITY inv IS PORT (a: IN bit; y : OUT bit); END inv;";
    const CANONICAL: &str = "\
entity inv is
    port (
        a: in bit;
        y: out bit
    );
end entity inv;
";

    fn global(dir: &Path) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(dir.display().to_string()),
        }
    }

    fn args(check: bool) -> FmtArgs {
        FmtArgs {
            paths: Vec::<PathBuf>::new(),
            check,
        }
    }

    #[test]
    fn format_source_canonicalizes() {
        let file = SourceFile::new(FileId::from_raw(0), PathBuf::from("inv.vhd"), LOOSE.to_string());
        let ast = VhdlFile::parse(LOOSE).unwrap();
        let sink = DiagnosticSink::new();
        let text = format_source(&file, &ast, &FormatConfig::default(), &sink).unwrap();
        assert_eq!(text, CANONICAL);
        assert_eq!(sink.warning_count(), 0);

        let bare = FormatConfig {
            final_newline: false,
            ..FormatConfig::default()
        };
        let text = format_source(&file, &ast, &bare, &sink).unwrap();
        assert_eq!(text, CANONICAL.trim_end());
    }

    #[test]
    fn check_mode_reports_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inv.vhd");
        fs::write(&path, LOOSE).unwrap();
        assert_eq!(run(&args(true), &global(dir.path())).unwrap(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), LOOSE);
    }

    #[test]
    fn rewrites_then_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inv.vhd");
        fs::write(&path, LOOSE).unwrap();
        assert_eq!(run(&args(false), &global(dir.path())).unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), CANONICAL);
        assert_eq!(run(&args(true), &global(dir.path())).unwrap(), 0);
    }

    #[test]
    fn unparseable_file_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.vhd");
        fs::write(&path, "signal s: bit;").unwrap();
        assert_eq!(run(&args(false), &global(dir.path())).unwrap(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "signal s: bit;");
    }
}
