//! Packages and package bodies.

use super::architecture::{format_head, names_unique, parse_head_statements, take_ident};
use super::{FunctionImplementation, HeadStatement, TypeDefinition};
use crate::comment::Comment;
use crate::limits::{self, BLOCK_MAX_LEN};
use crate::scan::{self, Piece};
use crate::stmt::{definition_with_trailer, nest, Definition};
use crate::VhdlNode;
use vesta_common::Ident;

/// `package name is declarations end package name;`
///
/// Function bodies are not allowed; they belong in a [`PackageBody`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VhdlPackage {
    /// Package name.
    pub name: Ident,
    statements: Vec<HeadStatement>,
}

impl VhdlPackage {
    /// Builds a package; fails on a repeated name or a function body.
    pub fn new(name: Ident, statements: Vec<HeadStatement>) -> Option<Self> {
        let declarations_only = !statements
            .iter()
            .any(|s| matches!(s, HeadStatement::Function(_)));
        (declarations_only && names_unique(&statements)).then_some(Self { name, statements })
    }

    /// Declarations in order.
    pub fn statements(&self) -> &[HeadStatement] {
        &self.statements
    }
}

impl VhdlNode for VhdlPackage {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) || scan::construct_end(text)? != text.len() {
            return None;
        }
        let rest = scan::strip_word_prefix(text, "package")?;
        let (name, rest) = take_ident(rest)?;
        let rest = scan::strip_word_prefix(rest, "is")?;
        let body = scan::strip_end_clause(rest, &["package"], false, Some(name.as_str()))?;
        VhdlPackage::new(name, parse_head_statements(body)?)
    }

    fn serialize(&self) -> String {
        format!(
            "package {} is{}\nend package {};",
            self.name,
            format_head(&self.statements),
            self.name
        )
    }
}

/// The contents of a package body.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PackageBodyBlock {
    /// A function with its body.
    Function(FunctionImplementation),
    /// A constant or other object declaration.
    Definition(Definition),
    /// A type local to the body.
    Type(TypeDefinition),
    /// A comment line.
    Comment(Comment),
    /// Zero or several items in order.
    Blocks(Vec<PackageBodyBlock>),
}

impl PackageBodyBlock {
    /// The items of the block, in order.
    pub fn elements(&self) -> &[PackageBodyBlock] {
        match self {
            PackageBodyBlock::Blocks(blocks) => blocks,
            single => std::slice::from_ref(single),
        }
    }
}

fn parse_body_item(text: &str) -> Option<PackageBodyBlock> {
    if scan::starts_with_word(text, "function") {
        FunctionImplementation::parse(text).map(PackageBodyBlock::Function)
    } else if scan::starts_with_word(text, "type") {
        TypeDefinition::parse(text).map(PackageBodyBlock::Type)
    } else {
        Definition::parse(text).map(PackageBodyBlock::Definition)
    }
}

impl VhdlNode for PackageBodyBlock {
    fn parse(text: &str) -> Option<Self> {
        if !limits::within(text, BLOCK_MAX_LEN) {
            return None;
        }
        let _guard = limits::enter()?;
        let mut blocks = Vec::new();
        for piece in scan::split_pieces(text)? {
            match piece {
                Piece::Comment(comment) => blocks.push(PackageBodyBlock::Comment(Comment::new(comment)?)),
                Piece::Code { text, trailer } => {
                    if let Some(definition) = definition_with_trailer(text, trailer) {
                        blocks.push(PackageBodyBlock::Definition(definition));
                        continue;
                    }
                    blocks.push(parse_body_item(text)?);
                    if let Some(trailer) = trailer {
                        blocks.push(PackageBodyBlock::Comment(Comment::new(trailer)?));
                    }
                }
            }
        }
        if blocks.len() == 1 {
            return blocks.pop();
        }
        Some(PackageBodyBlock::Blocks(blocks))
    }

    fn serialize(&self) -> String {
        match self {
            PackageBodyBlock::Function(function) => function.serialize(),
            PackageBodyBlock::Definition(definition) => definition.serialize(),
            PackageBodyBlock::Type(ty) => ty.serialize(),
            PackageBodyBlock::Comment(comment) => comment.serialize(),
            PackageBodyBlock::Blocks(blocks) => blocks
                .iter()
                .map(VhdlNode::serialize)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// `package body name is ... end package body name;`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PackageBody {
    /// Name of the package this body completes.
    pub name: Ident,
    /// Contents.
    pub body: PackageBodyBlock,
}

impl VhdlNode for PackageBody {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) || scan::construct_end(text)? != text.len() {
            return None;
        }
        let rest = scan::strip_sentence_prefix(text, &["package", "body"])?;
        let (name, rest) = take_ident(rest)?;
        let rest = scan::strip_word_prefix(rest, "is")?;
        let body = scan::strip_end_clause(rest, &["package", "body"], false, Some(name.as_str()))?;
        Some(PackageBody {
            body: PackageBodyBlock::parse(body)?,
            name,
        })
    }

    fn serialize(&self) -> String {
        format!(
            "package body {} is{}\nend package body {};",
            self.name,
            nest(&self.body.serialize()),
            self.name
        )
    }
}

crate::display_via_serialize!(VhdlPackage, PackageBodyBlock, PackageBody);
