//! `vesta dump`: print one file's syntax tree as JSON.

use vesta_diagnostics::DiagnosticSink;
use vesta_source::SourceDb;

use crate::pipeline::render_diagnostics;
use crate::{DumpArgs, GlobalArgs, ReportFormat};

/// Runs the `vesta dump` command.
///
/// Prints pretty JSON to stdout and returns 0, or renders the parse
/// diagnostics and returns 1.
pub fn run(args: &DumpArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut db = SourceDb::new();
    let id = db
        .load(&args.file)
        .map_err(|e| format!("failed to read {}: {e}", args.file.display()))?;
    let file = db
        .file(id)
        .ok_or_else(|| format!("{} was not loaded", args.file.display()))?;

    let sink = DiagnosticSink::new();
    match vesta_vhdl::parse_source(file, &sink) {
        Some(ast) => {
            println!("{}", serde_json::to_string_pretty(&ast)?);
            Ok(0)
        }
        None => {
            render_diagnostics(&sink, &db, ReportFormat::Text, global.color);
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn global() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        }
    }

    #[test]
    fn dumps_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("pkg.vhd");
        fs::write(&file, "package p is constant c: bit := '1'; end;").unwrap();
        assert_eq!(run(&DumpArgs { file }, &global()).unwrap(), 0);
    }

    #[test]
    fn invalid_file_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.vhd");
        fs::write(&file, "architecture a of e is").unwrap();
        assert_eq!(run(&DumpArgs { file }, &global()).unwrap(), 1);
    }

    #[test]
    fn missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("absent.vhd");
        let err = run(&DumpArgs { file }, &global()).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }
}
