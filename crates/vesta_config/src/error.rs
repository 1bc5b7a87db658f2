//! Configuration errors.

/// Why a `vesta.toml` could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or does not match the expected schema.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// The file parsed but a value is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
