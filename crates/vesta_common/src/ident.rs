//! Validated VHDL identifiers with case-insensitive comparison.

use crate::keywords::is_reserved;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The longest identifier accepted by [`Ident::new`], in bytes.
pub const MAX_IDENT_LEN: usize = 255;

/// A basic VHDL identifier such as a signal, port, entity or type name.
///
/// VHDL identifiers are case-insensitive, so equality, hashing and ordering
/// ignore ASCII case. The original spelling is kept and used whenever the
/// identifier is written back out.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ident(String);

impl Ident {
    /// Validates `name` as a basic identifier.
    ///
    /// Returns `None` unless the name starts with an ASCII letter, contains only
    /// ASCII letters, digits and single underscores, does not end with an
    /// underscore and is not a reserved word.
    pub fn new(name: &str) -> Option<Self> {
        if name.is_empty() || name.len() > MAX_IDENT_LEN {
            return None;
        }
        let mut chars = name.chars();
        if !chars.next()?.is_ascii_alphabetic() {
            return None;
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }
        if name.contains("__") || name.ends_with('_') || is_reserved(name) {
            return None;
        }
        Some(Self(name.to_string()))
    }

    /// Returns the identifier with its original casing.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lowercase form used for comparisons.
    pub fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Returns `true` if `text` names this identifier, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        self.0.eq_ignore_ascii_case(text)
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Ident {}

impl Hash for Ident {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl PartialOrd for Ident {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ident {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.0.bytes().map(|b| b.to_ascii_lowercase());
        let rhs = other.0.bytes().map(|b| b.to_ascii_lowercase());
        lhs.cmp(rhs)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ident({})", self.0)
    }
}

impl TryFrom<String> for Ident {
    type Error = InvalidIdent;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ident::new(&value).ok_or(InvalidIdent(value))
    }
}

impl From<Ident> for String {
    fn from(value: Ident) -> Self {
        value.0
    }
}

/// Error produced when a string is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid VHDL identifier")]
pub struct InvalidIdent(pub String);
