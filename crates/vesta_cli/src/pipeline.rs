//! Shared pipeline helpers for CLI commands.
//!
//! Configuration lookup, source discovery, loading, the parallel parse step
//! and diagnostic rendering used by `check`, `fmt` and `dump`.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use vesta_config::{SourcesConfig, VestaConfig};
use vesta_diagnostics::{
    Diagnostic, DiagnosticRenderer, DiagnosticSink, JsonRenderer, TerminalRenderer,
};
use vesta_source::{FileId, SourceDb};
use vesta_vhdl::VhdlFile;

use crate::{GlobalArgs, ReportFormat};

/// Loads the configuration and returns it with the directory it applies to.
///
/// `--config` may name a file or a directory; without it the current
/// directory is used. A missing `vesta.toml` in a directory yields defaults.
pub fn resolve_config(global: &GlobalArgs) -> Result<(VestaConfig, PathBuf), Box<dyn std::error::Error>> {
    match global.config {
        Some(ref config_path) => {
            let path = PathBuf::from(config_path);
            if path.is_dir() {
                Ok((vesta_config::load_config(&path)?, path))
            } else {
                let root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                Ok((vesta_config::load_config_file(&path)?, root))
            }
        }
        None => {
            let root = std::env::current_dir()?;
            Ok((vesta_config::load_config(&root)?, root))
        }
    }
}

/// Collects the VHDL files named by `paths`, or by `sources.paths` when
/// `paths` is empty.
///
/// Directories are walked recursively and filtered by extension and
/// `exclude`; files named explicitly are always included. Relative config
/// paths are resolved against `root`. The result is sorted and free of
/// duplicates.
pub fn discover_sources(
    paths: &[PathBuf],
    sources: &SourcesConfig,
    root: &Path,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let configured: Vec<PathBuf>;
    let paths = if paths.is_empty() {
        configured = sources
            .paths
            .iter()
            .map(|p| if p == Path::new(".") { root.to_path_buf() } else { root.join(p) })
            .collect();
        &configured
    } else {
        paths
    };

    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk_dir(path, sources, root, &mut files)?;
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(format!("no such file or directory: {}", path.display()).into());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Recursively walks a directory collecting accepted source files.
fn walk_dir(
    dir: &Path,
    sources: &SourcesConfig,
    root: &Path,
    files: &mut Vec<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let relative = path.strip_prefix(root).unwrap_or(&path);
        if path.is_dir() {
            if !sources.is_excluded(relative) {
                walk_dir(&path, sources, root, files)?;
            }
        } else if sources.accepts(relative) {
            files.push(path);
        }
    }
    Ok(())
}

/// Reads every path into `db`, in order.
pub fn load_sources(paths: &[PathBuf], db: &mut SourceDb) -> Result<Vec<FileId>, Box<dyn std::error::Error>> {
    let mut ids = Vec::with_capacity(paths.len());
    for path in paths {
        let id = db
            .load(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        ids.push(id);
    }
    Ok(ids)
}

/// Parses every loaded file in parallel.
///
/// Failing units are reported to `sink`; the result holds one entry per file
/// in load order, `None` where the file did not parse.
pub fn parse_all(db: &SourceDb, sink: &DiagnosticSink, verbose: bool) -> Vec<(FileId, Option<VhdlFile>)> {
    let files: Vec<_> = db.files().collect();
    files
        .par_iter()
        .map(|file| {
            if verbose {
                eprintln!("    Parsing {}", file.path.display());
            }
            (file.id, vesta_vhdl::parse_source(file, sink))
        })
        .collect()
}

/// Prints every diagnostic in `sink`, ordered by file and position.
///
/// Text goes to stderr, JSON lines to stdout. Returns the number printed.
pub fn render_diagnostics(sink: &DiagnosticSink, db: &SourceDb, format: ReportFormat, color: bool) -> usize {
    let mut diagnostics = sink.take_all();
    diagnostics.sort_by_key(position);
    match format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(color);
            for diag in &diagnostics {
                eprint!("{}", renderer.render(diag, db));
            }
        }
        ReportFormat::Json => {
            for diag in &diagnostics {
                print!("{}", JsonRenderer.render(diag, db));
            }
        }
    }
    diagnostics.len()
}

fn position(diag: &Diagnostic) -> (u32, u32) {
    diag.span
        .map_or((u32::MAX, u32::MAX), |span| (span.file.as_raw(), span.start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, relative: &str, text: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn discovers_by_extension_and_exclude() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let top = write(root, "rtl/top.vhd", "entity top is end;");
        let pkg = write(root, "rtl/pkg/util.VHDL", "library ieee;");
        write(root, "rtl/notes.txt", "");
        write(root, "vendor/ip.vhd", "entity ip is end;");
        let sources = SourcesConfig {
            exclude: vec![PathBuf::from("vendor")],
            ..SourcesConfig::default()
        };
        let found = discover_sources(&[], &sources, root).unwrap();
        let mut expected = vec![pkg, top];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn explicit_files_bypass_filters() {
        let dir = tempfile::tempdir().unwrap();
        let odd = write(dir.path(), "design.txt", "library ieee;");
        let found =
            discover_sources(&[odd.clone(), odd.clone()], &SourcesConfig::default(), dir.path()).unwrap();
        assert_eq!(found, vec![odd]);
    }

    #[test]
    fn missing_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(discover_sources(&[missing], &SourcesConfig::default(), dir.path()).is_err());
    }

    #[test]
    fn config_from_directory_or_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(dir.path().display().to_string()),
        };
        let (config, root) = resolve_config(&global).unwrap();
        assert_eq!(config, VestaConfig::default());
        assert_eq!(root, dir.path());

        let file = write(dir.path(), "vesta.toml", "[check]\nreport = \"json\"\n");
        global.config = Some(file.display().to_string());
        let (config, root) = resolve_config(&global).unwrap();
        assert_eq!(config.check.report, vesta_config::ReportFormat::Json);
        assert_eq!(root, dir.path());
    }

    #[test]
    fn parses_in_load_order() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "a.vhd", "entity a is end;");
        let bad = write(dir.path(), "b.vhd", "signal s: bit;");
        let mut db = SourceDb::new();
        let ids = load_sources(&[good, bad], &mut db).unwrap();
        let sink = DiagnosticSink::new();
        let parsed = parse_all(&db, &sink, false);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].0, ids[0]);
        assert!(parsed[0].1.is_some());
        assert!(parsed[1].1.is_none());
        assert_eq!(sink.error_count(), 1);
        assert_eq!(render_diagnostics(&sink, &db, ReportFormat::Json, false), 1);
    }
}
