//! Whole source files.

use crate::comment::Comment;
use crate::decl::{Architecture, Entity, Include, PackageBody, VhdlPackage};
use crate::limits;
use crate::scan::{self, Lexeme};
use crate::VhdlNode;
use std::ops::Range;

/// What a top-level unit was recognized as from its leading words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum UnitKind {
    /// A comment line.
    Comment,
    /// `library` or `use`.
    Include,
    /// `entity`
    Entity,
    /// `architecture`
    Architecture,
    /// `package`
    Package,
    /// `package body`
    PackageBody,
    /// Anything else.
    Unknown,
}

impl UnitKind {
    /// Classifies a unit by its first words.
    pub fn classify(text: &str) -> Self {
        if text.starts_with("--") {
            UnitKind::Comment
        } else if scan::starts_with_word(text, "library") || scan::starts_with_word(text, "use") {
            UnitKind::Include
        } else if scan::starts_with_word(text, "entity") {
            UnitKind::Entity
        } else if scan::starts_with_word(text, "architecture") {
            UnitKind::Architecture
        } else if scan::strip_sentence_prefix(text, &["package", "body"]).is_some() {
            UnitKind::PackageBody
        } else if scan::starts_with_word(text, "package") {
            UnitKind::Package
        } else {
            UnitKind::Unknown
        }
    }

    /// Human-readable name used in messages.
    pub fn describe(self) -> &'static str {
        match self {
            UnitKind::Comment => "comment",
            UnitKind::Include => "context clause",
            UnitKind::Entity => "entity",
            UnitKind::Architecture => "architecture",
            UnitKind::Package => "package",
            UnitKind::PackageBody => "package body",
            UnitKind::Unknown => "unit",
        }
    }
}

/// One top-level unit located in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignUnit<'a> {
    /// Recognized kind.
    pub kind: UnitKind,
    /// Byte range in the file.
    pub span: Range<usize>,
    /// The unit's text.
    pub text: &'a str,
}

/// Splits a file into top-level units.
///
/// A unit that never terminates runs to the end of the text; the parser for
/// its kind then rejects it.
pub fn split_units(text: &str) -> Vec<DesignUnit<'_>> {
    let bytes = text.as_bytes();
    let mut units = Vec::new();
    let mut pos = 0;
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() {
            return units;
        }
        let len = match scan::lexeme_at(bytes, pos) {
            Lexeme::Comment(len) => len,
            _ => scan::construct_end(&text[pos..]).unwrap_or(text.len() - pos),
        };
        let unit = &text[pos..pos + len];
        units.push(DesignUnit {
            kind: UnitKind::classify(unit),
            span: pos..pos + len,
            text: unit,
        });
        pos += len;
    }
}

/// A parsed source file.
///
/// Units are grouped by kind and serialized in a fixed order: header
/// comments, context clauses, packages, package bodies, entities, then
/// architectures. Header comments and context clauses share one block;
/// every other section is set off by a blank line. Comment lines after the
/// first unit are not kept.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct VhdlFile {
    /// Comment lines before the first unit.
    pub header: Vec<Comment>,
    /// `library` and `use` clauses.
    pub includes: Vec<Include>,
    /// Package declarations.
    pub packages: Vec<VhdlPackage>,
    /// Package bodies.
    pub package_bodies: Vec<PackageBody>,
    /// Entities.
    pub entities: Vec<Entity>,
    /// Architectures.
    pub architectures: Vec<Architecture>,
}

impl VhdlFile {
    /// Adds one parsed unit; returns `None` if `unit` does not parse as its
    /// kind.
    pub(crate) fn push_unit(&mut self, unit: &DesignUnit<'_>, first: bool) -> Option<()> {
        match unit.kind {
            UnitKind::Comment => {
                if first {
                    self.header.push(Comment::parse(unit.text)?);
                }
            }
            UnitKind::Include => self.includes.push(Include::parse(unit.text)?),
            UnitKind::Entity => self.entities.push(Entity::parse(unit.text)?),
            UnitKind::Architecture => self.architectures.push(Architecture::parse(unit.text)?),
            UnitKind::Package => self.packages.push(VhdlPackage::parse(unit.text)?),
            UnitKind::PackageBody => self.package_bodies.push(PackageBody::parse(unit.text)?),
            UnitKind::Unknown => return None,
        }
        Some(())
    }

    /// Returns `true` if the file declares nothing.
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty()
            && self.packages.is_empty()
            && self.package_bodies.is_empty()
            && self.entities.is_empty()
            && self.architectures.is_empty()
    }
}

impl VhdlNode for VhdlFile {
    fn parse(text: &str) -> Option<Self> {
        if !limits::within(text, limits::BLOCK_MAX_LEN) {
            return None;
        }
        let mut file = VhdlFile::default();
        let mut in_header = true;
        for unit in split_units(text) {
            in_header &= unit.kind == UnitKind::Comment;
            file.push_unit(&unit, in_header)?;
        }
        Some(file)
    }

    fn serialize(&self) -> String {
        let mut sections = Vec::new();
        // The header sits directly on top of the context clause.
        let prologue: Vec<String> = self
            .header
            .iter()
            .map(VhdlNode::serialize)
            .chain(self.includes.iter().map(VhdlNode::serialize))
            .collect();
        if !prologue.is_empty() {
            sections.push(prologue.join("\n"));
        }
        sections.extend(self.packages.iter().map(VhdlNode::serialize));
        sections.extend(self.package_bodies.iter().map(VhdlNode::serialize));
        sections.extend(self.entities.iter().map(VhdlNode::serialize));
        sections.extend(self.architectures.iter().map(VhdlNode::serialize));
        sections.join("\n\n")
    }
}

crate::display_via_serialize!(VhdlFile);
