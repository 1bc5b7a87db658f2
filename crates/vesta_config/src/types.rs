//! Configuration schema deserialized from `vesta.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VestaConfig {
    /// Where to look for VHDL files.
    pub sources: SourcesConfig,
    /// Formatter settings.
    pub format: FormatConfig,
    /// Checker settings.
    pub check: CheckConfig,
}

/// The `[sources]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Files or directories searched when no paths are given on the command line.
    pub paths: Vec<PathBuf>,
    /// File extensions treated as VHDL, without the leading dot.
    pub extensions: Vec<String>,
    /// Path prefixes skipped during discovery.
    pub exclude: Vec<PathBuf>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from(".")],
            extensions: vec!["vhd".to_string(), "vhdl".to_string()],
            exclude: Vec::new(),
        }
    }
}

impl SourcesConfig {
    /// Returns `true` if `path` has a VHDL extension and is not excluded.
    pub fn accepts(&self, path: &Path) -> bool {
        let extension_ok = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)));
        extension_ok && !self.is_excluded(path)
    }

    /// Returns `true` if `path` lies under one of the `exclude` prefixes.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path = path.strip_prefix(".").unwrap_or(path);
        self.exclude.iter().any(|prefix| {
            let prefix = prefix.strip_prefix(".").unwrap_or(prefix);
            !prefix.as_os_str().is_empty() && path.starts_with(prefix)
        })
    }
}

/// The `[format]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    /// Re-parse the formatted text and refuse to write it unless the tree matches.
    pub verify_roundtrip: bool,
    /// End every formatted file with a newline.
    pub final_newline: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            verify_roundtrip: true,
            final_newline: true,
        }
    }
}

/// The `[check]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// How `vesta check` prints diagnostics.
    pub report: ReportFormat,
}

/// Output style for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable, rustc style.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}
