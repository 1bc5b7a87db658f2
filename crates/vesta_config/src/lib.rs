//! Loading of the optional `vesta.toml` workspace configuration.
//!
//! The file tells the command-line tools where VHDL sources live and how the
//! formatter and checker should behave. Every table and key is optional; a
//! missing file yields [`VestaConfig::default`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::{CheckConfig, FormatConfig, ReportFormat, SourcesConfig, VestaConfig};
