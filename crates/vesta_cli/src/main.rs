//! Vesta CLI: check, format and inspect VHDL sources.
//!
//! Provides `vesta check` for reporting units that do not parse, `vesta fmt`
//! for rewriting files in canonical form, and `vesta dump` for printing a
//! file's syntax tree as JSON.

#![warn(missing_docs)]

mod check;
mod dump;
mod fmt;
mod pipeline;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Vesta: a VHDL parser and pretty-printer.
#[derive(Parser, Debug)]
#[command(name = "vesta", version, about = "VHDL parser and pretty-printer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print each file as it is processed.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `vesta.toml` file, or a directory containing one.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse sources and report every unit that fails.
    Check(CheckArgs),
    /// Rewrite sources in canonical form.
    Fmt(FmtArgs),
    /// Print the syntax tree of one file as JSON.
    Dump(DumpArgs),
}

/// Arguments for `vesta check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Files or directories to check (default: `sources.paths` from the config).
    pub paths: Vec<PathBuf>,

    /// Output format for diagnostics (default: `check.report` from the config).
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

/// Arguments for `vesta fmt`.
#[derive(Parser, Debug)]
pub struct FmtArgs {
    /// Files or directories to format (default: `sources.paths` from the config).
    pub paths: Vec<PathBuf>,

    /// Report files that would change without writing them.
    #[arg(long)]
    pub check: bool,
}

/// Arguments for `vesta dump`.
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// The VHDL file to print.
    pub file: PathBuf,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON lines.
    Json,
}

impl From<vesta_config::ReportFormat> for ReportFormat {
    fn from(format: vesta_config::ReportFormat) -> Self {
        match format {
            vesta_config::ReportFormat::Text => ReportFormat::Text,
            vesta_config::ReportFormat::Json => ReportFormat::Json,
        }
    }
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print per-file progress.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file or its directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global),
        Command::Fmt(ref args) => fmt::run(args, &global),
        Command::Dump(ref args) => dump::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
