//! A single loaded source file and its line index.

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vesta_common::ContentHash;

/// Index of a file inside a [`SourceDb`](crate::SourceDb).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// Wraps a raw index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// Source text together with where it came from.
#[derive(Debug)]
pub struct SourceFile {
    /// Identifier assigned by the database.
    pub id: FileId,
    /// Filesystem path, or a synthetic name for in-memory text.
    pub path: PathBuf,
    /// Full file contents.
    pub text: String,
    /// Hash of `text`, compared against formatter output.
    pub hash: ContentHash,
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Wraps `text` and indexes its line starts.
    pub fn new(id: FileId, path: PathBuf, text: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                text.match_indices('\n')
                    .map(|(i, _)| u32::try_from(i + 1).unwrap_or(u32::MAX)),
            )
            .collect();
        let hash = ContentHash::of_text(&text);
        Self {
            id,
            path,
            text,
            hash,
            line_starts,
        }
    }

    /// Number of lines, counting a final line without a terminator.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a 1-based `(line, column)` pair.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let index = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let start = self.line_starts.get(index).copied().unwrap_or(0);
        (index as u32 + 1, offset.saturating_sub(start) + 1)
    }

    /// Returns the text of a 1-based line without its terminator.
    pub fn line(&self, line: u32) -> Option<&str> {
        let index = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(index)? as usize;
        let end = self
            .line_starts
            .get(index + 1)
            .map_or(self.text.len(), |&next| next as usize);
        self.text
            .get(start..end)
            .map(|l| l.trim_end_matches(['\n', '\r']))
    }

    /// Returns the text under `span`, or `None` if it falls outside the file
    /// or splits a character.
    pub fn slice(&self, span: Span) -> Option<&str> {
        self.text.get(span.range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(text: &str) -> SourceFile {
        SourceFile::new(FileId::from_raw(0), PathBuf::from("t.vhd"), text.to_string())
    }

    #[test]
    fn line_col_at_line_boundaries() {
        let f = file("library ieee;\nuse ieee.all;\n");
        assert_eq!(f.line_col(0), (1, 1));
        assert_eq!(f.line_col(8), (1, 9));
        assert_eq!(f.line_col(14), (2, 1));
        assert_eq!(f.line_col(18), (2, 5));
    }

    #[test]
    fn line_text_strips_terminator() {
        let f = file("a <= b;\r\nc <= d;\nlast");
        assert_eq!(f.line(1), Some("a <= b;"));
        assert_eq!(f.line(2), Some("c <= d;"));
        assert_eq!(f.line(3), Some("last"));
        assert_eq!(f.line(0), None);
        assert_eq!(f.line(4), None);
        assert_eq!(f.line_count(), 3);
    }

    #[test]
    fn empty_text_has_one_line() {
        let f = file("");
        assert_eq!(f.line_count(), 1);
        assert_eq!(f.line_col(0), (1, 1));
        assert_eq!(f.line(1), Some(""));
    }

    #[test]
    fn slice_checks_bounds() {
        let f = file("entity e is end e;");
        assert_eq!(f.slice(Span::new(f.id, 7, 8)), Some("e"));
        assert_eq!(f.slice(Span::new(f.id, 10, 99)), None);
    }

    #[test]
    fn hash_matches_text() {
        let f = file("signal s: bit;");
        assert_eq!(f.hash, ContentHash::of_text("signal s: bit;"));
    }
}
