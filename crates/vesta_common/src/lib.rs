//! Shared foundational types used across the vesta VHDL toolchain.
//!
//! This crate provides validated case-insensitive identifiers, the VHDL
//! reserved-word table, single-bit logic values, content hashing, and the
//! error type returned by the fallible parsing API.

#![warn(missing_docs)]

pub mod error;
pub mod hash;
pub mod ident;
pub mod keywords;
pub mod logic;

pub use error::ParseError;
pub use hash::ContentHash;
pub use ident::Ident;
pub use keywords::is_reserved;
pub use logic::{BitLiteral, LogicLiteral};
