//! `vesta check`: parse sources and report failing design units.
//!
//! 1. Load `vesta.toml` (or defaults)
//! 2. Discover VHDL files from the command line or `sources.paths`
//! 3. Parse every file in parallel
//! 4. Render diagnostics as text or JSON

use vesta_diagnostics::DiagnosticSink;
use vesta_source::SourceDb;

use crate::pipeline::{discover_sources, load_sources, parse_all, render_diagnostics, resolve_config};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `vesta check` command.
///
/// Returns exit code 0 when every file parses, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (config, root) = resolve_config(global)?;
    let format = args
        .format
        .unwrap_or_else(|| ReportFormat::from(config.check.report));

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

    let errors = sink.error_count();
    let warnings = sink.warning_count();
    render_diagnostics(&sink, &db, format, global.color);

    if !global.quiet && format == ReportFormat::Text {
        let clean = parsed.iter().filter(|(_, file)| file.is_some()).count();
        eprintln!(
            "    Checked {} file(s), {} clean: {} error(s), {} warning(s)",
            parsed.len(),
            clean,
            errors,
            warnings
        );
    }

    Ok(if errors > 0 { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn global(dir: &std::path::Path) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(dir.display().to_string()),
        }
    }

    fn args(paths: Vec<PathBuf>) -> CheckArgs {
        CheckArgs {
            paths,
            format: Some(ReportFormat::Json),
        }
    }

    #[test]
    fn clean_tree_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("inv.vhd"), "entity inv is port (a: in bit; y: out bit); end;").unwrap();
        assert_eq!(run(&args(vec![]), &global(dir.path())).unwrap(), 0);
    }

    #[test]
    fn broken_file_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ok.vhd"), "library ieee;").unwrap();
        fs::write(dir.path().join("bad.vhd"), "entity bad is port (a: in bit) end;").unwrap();
        assert_eq!(run(&args(vec![]), &global(dir.path())).unwrap(), 1);
        let only_ok = vec![dir.path().join("ok.vhd")];
        assert_eq!(run(&args(only_ok), &global(dir.path())).unwrap(), 0);
    }

    #[test]
    fn empty_tree_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(run(&args(vec![]), &global(dir.path())).unwrap(), 0);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vesta.toml"), "[sources]\nextensions = []\n").unwrap();
        assert!(run(&args(vec![]), &global(dir.path())).is_err());
    }
}
