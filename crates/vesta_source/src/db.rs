//! The set of files loaded during one command invocation.

use crate::file::{FileId, SourceFile};
use crate::span::{Location, Span};
use std::io;
use std::path::{Path, PathBuf};

/// Owns every loaded [`SourceFile`] and resolves spans against them.
#[derive(Debug, Default)]
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path` from disk and registers it.
    pub fn load(&mut self, path: &Path) -> io::Result<FileId> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.insert(path, text))
    }

    /// Registers in-memory text under `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, path.into(), text));
        id
    }

    /// Looks up a file by id.
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.as_raw() as usize)
    }

    /// Iterates over all files in load order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    /// Number of loaded files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` when nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolves `span` to line/column coordinates.
    pub fn locate(&self, span: Span) -> Option<Location> {
        let file = self.file(span.file)?;
        let (line, column) = file.line_col(span.start);
        let last = span.end.saturating_sub(1).max(span.start);
        let (end_line, end_column) = file.line_col(last);
        Some(Location {
            path: file.path.clone(),
            line,
            column,
            end_line,
            end_column,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn insert_assigns_sequential_ids() {
        let mut db = SourceDb::new();
        let a = db.insert("a.vhd", "entity a is end a;".into());
        let b = db.insert("b.vhd", "entity b is end b;".into());
        assert_ne!(a, b);
        assert_eq!(db.len(), 2);
        assert_eq!(db.file(b).unwrap().text, "entity b is end b;");
    }

    #[test]
    fn unknown_id_is_none() {
        let db = SourceDb::new();
        assert!(db.is_empty());
        assert!(db.file(FileId::from_raw(5)).is_none());
        assert!(db.locate(Span::new(FileId::from_raw(5), 0, 1)).is_none());
    }

    #[test]
    fn locate_multiline_span() {
        let mut db = SourceDb::new();
        let id = db.insert("top.vhd", "library ieee;\nentity top is\nend top;\n".into());
        let loc = db.locate(Span::new(id, 14, 36)).unwrap();
        assert_eq!(loc.path, PathBuf::from("top.vhd"));
        assert_eq!((loc.line, loc.column), (2, 1));
        assert_eq!((loc.end_line, loc.end_column), (3, 8));
    }

    #[test]
    fn load_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "use work.all;").unwrap();
        let mut db = SourceDb::new();
        let id = db.load(tmp.path()).unwrap();
        assert_eq!(db.file(id).unwrap().text, "use work.all;");
    }

    #[test]
    fn load_missing_file_errors() {
        let mut db = SourceDb::new();
        assert!(db.load(Path::new("/nonexistent/dir/x.vhd")).is_err());
        assert!(db.is_empty());
    }
}
