//! Byte ranges within a loaded file and their line/column resolution.

use crate::file::FileId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::PathBuf;

/// A half-open byte range `[start, end)` inside one source file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The file the range points into.
    pub file: FileId,
    /// First byte of the range.
    pub start: u32,
    /// One past the last byte of the range.
    pub end: u32,
}

impl Span {
    /// Creates a span over `start..end` in `file`.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Creates a span from a `usize` range as produced by the scanning helpers.
    ///
    /// Offsets beyond `u32::MAX` saturate.
    pub fn from_range(file: FileId, range: Range<usize>) -> Self {
        let clamp = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        Self::new(file, clamp(range.start), clamp(range.end))
    }

    /// Returns the covered range as `usize` offsets.
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Number of bytes covered.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for a zero-width span.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Smallest span covering both `self` and `other`, or `None` when they
    /// point into different files.
    pub fn cover(self, other: Span) -> Option<Span> {
        (self.file == other.file).then(|| Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        })
    }
}

/// A span resolved to 1-based line and column numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path of the file, as it was registered with the database.
    pub path: PathBuf,
    /// Line of the first byte.
    pub line: u32,
    /// Column of the first byte, counted in bytes.
    pub column: u32,
    /// Line of the last byte.
    pub end_line: u32,
    /// Column of the last byte.
    pub end_column: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_range_keeps_offsets() {
        let span = Span::from_range(FileId::from_raw(3), 4..19);
        assert_eq!(span.start, 4);
        assert_eq!(span.end, 19);
        assert_eq!(span.range(), 4..19);
        assert_eq!(span.len(), 15);
    }

    #[test]
    fn empty_span() {
        let span = Span::new(FileId::from_raw(0), 7, 7);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn cover_same_file() {
        let file = FileId::from_raw(0);
        let a = Span::new(file, 10, 20);
        let b = Span::new(file, 2, 12);
        assert_eq!(a.cover(b), Some(Span::new(file, 2, 20)));
        assert_eq!(a.cover(b), b.cover(a));
    }

    #[test]
    fn cover_across_files_fails() {
        let a = Span::new(FileId::from_raw(0), 0, 1);
        let b = Span::new(FileId::from_raw(1), 0, 1);
        assert_eq!(a.cover(b), None);
    }

    #[test]
    fn location_display() {
        let loc = Location {
            path: PathBuf::from("rtl/counter.vhd"),
            line: 12,
            column: 5,
            end_line: 14,
            end_column: 9,
        };
        assert_eq!(loc.to_string(), "rtl/counter.vhd:12:5");
    }

    #[test]
    fn serde_roundtrip() {
        let span = Span::new(FileId::from_raw(2), 40, 80);
        let json = serde_json::to_string(&span).unwrap();
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(span, back);
    }
}
