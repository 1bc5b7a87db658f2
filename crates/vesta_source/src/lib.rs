//! Loaded VHDL source text and byte-span bookkeeping for diagnostics.
//!
//! The core parser works on plain `&str`. This crate exists for the layers
//! above it: the file-level diagnostics pass records where each design unit
//! sits in its file, and the terminal renderer turns those byte ranges back
//! into `path:line:column` locations with the offending line quoted.

#![warn(missing_docs)]

pub mod db;
pub mod file;
pub mod span;

pub use db::SourceDb;
pub use file::{FileId, SourceFile};
pub use span::{Location, Span};
