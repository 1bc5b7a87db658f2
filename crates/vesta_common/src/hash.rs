//! Content hashing used to detect whether formatting changed a file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit XXH3 digest of some text.
///
/// The formatter compares the hash of a file's current contents with the hash
/// of its canonical rendering to decide whether the file needs rewriting.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Hashes a byte slice with XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(xxhash_rust::xxh3::xxh3_128(data).to_le_bytes())
    }

    /// Hashes UTF-8 text.
    pub fn of_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, ..] = self.0;
        write!(f, "ContentHash({a:02x}{b:02x}{c:02x}{d:02x}..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_same_hash() {
        let a = ContentHash::of_text("entity e is\nend e;");
        let b = ContentHash::from_bytes(b"entity e is\nend e;");
        assert_eq!(a, b);
    }

    #[test]
    fn whitespace_changes_hash() {
        let a = ContentHash::of_text("a <= b;");
        let b = ContentHash::of_text("a  <= b;");
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_hex() {
        let s = ContentHash::of_text("vhdl").to_string();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn serde_roundtrip() {
        let h = ContentHash::of_text("architecture");
        let json = serde_json::to_string(&h).unwrap();
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
