//! Reading and validating `vesta.toml`.

use crate::error::ConfigError;
use crate::types::VestaConfig;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "vesta.toml";

/// Loads `<dir>/vesta.toml`, falling back to defaults when it does not exist.
pub fn load_config(dir: &Path) -> Result<VestaConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(VestaConfig::default());
    }
    load_config_file(&path)
}

/// Loads an explicitly named configuration file, which must exist.
pub fn load_config_file(path: &Path) -> Result<VestaConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates configuration text.
pub fn load_config_from_str(content: &str) -> Result<VestaConfig, ConfigError> {
    let config: VestaConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &VestaConfig) -> Result<(), ConfigError> {
    let sources = &config.sources;
    if sources.extensions.is_empty() {
        return Err(ConfigError::Invalid("sources.extensions is empty".into()));
    }
    if let Some(ext) = sources
        .extensions
        .iter()
        .find(|e| e.is_empty() || e.starts_with('.'))
    {
        return Err(ConfigError::Invalid(format!(
            "sources.extensions entry '{ext}' must be a bare extension such as \"vhd\""
        )));
    }
    if sources.paths.iter().any(|p| p.as_os_str().is_empty()) {
        return Err(ConfigError::Invalid("sources.paths contains an empty path".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReportFormat;
    use std::path::PathBuf;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(load_config_from_str("").unwrap(), VestaConfig::default());
    }

    #[test]
    fn full_file() {
        let config = load_config_from_str(
            r#"
[sources]
paths = ["rtl", "sim"]
extensions = ["vhd"]
exclude = ["rtl/generated"]

[format]
verify_roundtrip = false
final_newline = false

[check]
report = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.sources.paths, vec![PathBuf::from("rtl"), PathBuf::from("sim")]);
        assert_eq!(config.sources.extensions, vec!["vhd"]);
        assert!(!config.format.verify_roundtrip);
        assert!(!config.format.final_newline);
        assert_eq!(config.check.report, ReportFormat::Json);
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let config = load_config_from_str("[format]\nfinal_newline = false\n").unwrap();
        assert!(config.format.verify_roundtrip);
        assert!(!config.format.final_newline);
        assert_eq!(config.sources.extensions, vec!["vhd", "vhdl"]);
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let err = load_config_from_str("[format]\nindent = 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_report_value() {
        let err = load_config_from_str("[check]\nreport = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_extension_list_rejected() {
        let err = load_config_from_str("[sources]\nextensions = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn dotted_extension_rejected() {
        let err = load_config_from_str("[sources]\nextensions = [\".vhd\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn empty_path_rejected() {
        let err = load_config_from_str("[sources]\npaths = [\"\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config(dir.path()).unwrap(), VestaConfig::default());
    }

    #[test]
    fn reads_file_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[check]\nreport = \"json\"\n").unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.check.report, ReportFormat::Json);
    }

    #[test]
    fn explicit_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
