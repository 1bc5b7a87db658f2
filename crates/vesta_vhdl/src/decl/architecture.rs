//! Architectures and the declarative part shared with packages.

use super::{all_unique, ComponentDefinition, FunctionDefinition, FunctionImplementation, TypeDefinition};
use crate::comment::Comment;
use crate::limits::{self, BLOCK_MAX_LEN};
use crate::scan::{self, Piece};
use crate::stmt::{definition_with_trailer, nest, AsynchronousBlock, Definition};
use crate::VhdlNode;
use vesta_common::Ident;

/// One item of an architecture's or package's declarative part.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum HeadStatement {
    /// A signal, variable or constant.
    Definition(Definition),
    /// A comment line.
    Comment(Comment),
    /// A type.
    Type(TypeDefinition),
    /// A component declaration.
    Component(ComponentDefinition),
    /// A function signature.
    FunctionDeclaration(FunctionDefinition),
    /// A function with its body.
    Function(FunctionImplementation),
}

impl HeadStatement {
    /// The name the item declares, if it must be unique in its region.
    ///
    /// Functions may be overloaded and are not counted.
    pub fn declared_name(&self) -> Option<&Ident> {
        match self {
            HeadStatement::Definition(definition) => Some(definition.name()),
            HeadStatement::Type(ty) => Some(ty.name()),
            HeadStatement::Component(component) => Some(&component.name),
            HeadStatement::Comment(_)
            | HeadStatement::FunctionDeclaration(_)
            | HeadStatement::Function(_) => None,
        }
    }
}

fn parse_item(text: &str) -> Option<HeadStatement> {
    let word = scan::first_word(text)?.to_ascii_lowercase();
    match word.as_str() {
        "signal" | "variable" | "constant" => Definition::parse(text).map(HeadStatement::Definition),
        "type" => TypeDefinition::parse(text).map(HeadStatement::Type),
        "component" => ComponentDefinition::parse(text).map(HeadStatement::Component),
        "function" => FunctionImplementation::parse(text)
            .map(HeadStatement::Function)
            .or_else(|| FunctionDefinition::parse(text).map(HeadStatement::FunctionDeclaration)),
        _ => None,
    }
}

/// Parses a declarative part into items, keeping comment lines.
pub(crate) fn parse_head_statements(text: &str) -> Option<Vec<HeadStatement>> {
    let mut items = Vec::new();
    for piece in scan::split_pieces(text)? {
        match piece {
            Piece::Comment(comment) => items.push(HeadStatement::Comment(Comment::new(comment)?)),
            Piece::Code { text, trailer } => {
                if let Some(definition) = definition_with_trailer(text, trailer) {
                    items.push(HeadStatement::Definition(definition));
                    continue;
                }
                items.push(parse_item(text)?);
                if let Some(trailer) = trailer {
                    items.push(HeadStatement::Comment(Comment::new(trailer)?));
                }
            }
        }
    }
    Some(items)
}

pub(crate) fn names_unique(statements: &[HeadStatement]) -> bool {
    all_unique(statements.iter().filter_map(HeadStatement::declared_name))
}

pub(crate) fn format_head(statements: &[HeadStatement]) -> String {
    let lines: Vec<String> = statements.iter().map(VhdlNode::serialize).collect();
    nest(&lines.join("\n"))
}

impl VhdlNode for HeadStatement {
    fn parse(text: &str) -> Option<Self> {
        let mut items = parse_head_statements(text)?;
        if items.len() == 1 {
            items.pop()
        } else {
            None
        }
    }

    fn serialize(&self) -> String {
        match self {
            HeadStatement::Definition(definition) => definition.serialize(),
            HeadStatement::Comment(comment) => comment.serialize(),
            HeadStatement::Type(ty) => ty.serialize(),
            HeadStatement::Component(component) => component.serialize(),
            HeadStatement::FunctionDeclaration(function) => function.serialize(),
            HeadStatement::Function(function) => function.serialize(),
        }
    }
}

/// The declarative part of an architecture.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ArchitectureHead {
    statements: Vec<HeadStatement>,
}

impl ArchitectureHead {
    /// Builds a declarative part; fails when two items declare the same name.
    pub fn new(statements: Vec<HeadStatement>) -> Option<Self> {
        names_unique(&statements).then_some(Self { statements })
    }

    /// Items in order.
    pub fn statements(&self) -> &[HeadStatement] {
        &self.statements
    }
}

impl VhdlNode for ArchitectureHead {
    fn parse(text: &str) -> Option<Self> {
        if !limits::within(text, BLOCK_MAX_LEN) {
            return None;
        }
        ArchitectureHead::new(parse_head_statements(text)?)
    }

    fn serialize(&self) -> String {
        let lines: Vec<String> = self.statements.iter().map(VhdlNode::serialize).collect();
        lines.join("\n")
    }
}

/// `architecture name of entity is head begin body end architecture name;`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Architecture {
    /// Architecture name.
    pub name: Ident,
    /// Name of the entity it implements.
    pub entity: Ident,
    /// Declarations before `begin`.
    pub head: ArchitectureHead,
    /// Concurrent statements.
    pub body: AsynchronousBlock,
}

/// Takes one identifier from the front of `text`.
pub(crate) fn take_ident(text: &str) -> Option<(Ident, &str)> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    Some((Ident::new(&text[..end])?, text[end..].trim_start()))
}

impl VhdlNode for Architecture {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) || scan::construct_end(text)? != text.len() {
            return None;
        }
        let _guard = limits::enter()?;
        let rest = scan::strip_word_prefix(text, "architecture")?;
        let (name, rest) = take_ident(rest)?;
        let (entity, rest) = take_ident(scan::strip_word_prefix(rest, "of")?)?;
        let rest = scan::strip_word_prefix(rest, "is")?;
        let rest = scan::strip_end_clause(rest, &["architecture"], false, Some(name.as_str()))?;
        let (begin, _) = scan::find_clause(rest, &["begin"])?;
        Some(Architecture {
            name,
            entity,
            head: ArchitectureHead::parse(&rest[..begin])?,
            body: AsynchronousBlock::parse(&rest[begin + "begin".len()..])?,
        })
    }

    fn serialize(&self) -> String {
        format!(
            "architecture {} of {} is{}\nbegin{}\nend architecture {};",
            self.name,
            self.entity,
            format_head(&self.head.statements),
            nest(&self.body.serialize()),
            self.name
        )
    }
}

crate::display_via_serialize!(HeadStatement, ArchitectureHead, Architecture);

#[cfg(test)]
mod tests {
    use super::*;

    const RTL: &str = "\
architecture rtl of counter is
    -- state
    signal count_r: unsigned(3 downto 0) := \"0000\"; -- current value
    type mode_t is (UP, DOWN);
    component inv is
        port (
            a: in bit;
            b: out bit
        );
    end component inv;
begin
    count <= count_r;
    tick: process(clk)
    begin
        if rising_edge(clk) then
            count_r <= count_r + 1;
        end if;
    end process tick;
end architecture rtl;";

    #[test]
    fn architecture_roundtrip() {
        let arch = Architecture::parse(RTL).unwrap();
        assert_eq!(arch.name.as_str(), "rtl");
        assert_eq!(arch.entity.as_str(), "counter");
        assert_eq!(arch.head.statements().len(), 4);
        assert_eq!(arch.body.elements().len(), 2);
        assert_eq!(arch.serialize(), RTL);
    }

    #[test]
    fn head_names_must_be_unique() {
        assert!(ArchitectureHead::parse("signal a: bit; signal A: std_logic;").is_none());
        assert!(ArchitectureHead::parse("signal a: bit; constant b: bit := '0';").is_some());
        assert!(ArchitectureHead::parse("type t is (X, Y); signal t: bit;").is_none());
    }

    #[test]
    fn head_rejects_statements() {
        assert!(ArchitectureHead::parse("a <= b;").is_none());
        assert!(HeadStatement::parse("signal a: bit; signal b: bit;").is_none());
        assert!(matches!(
            HeadStatement::parse("function f return bit;"),
            Some(HeadStatement::FunctionDeclaration(_))
        ));
    }

    #[test]
    fn empty_parts() {
        let arch = Architecture::parse("architecture a of e is begin end;").unwrap();
        assert_eq!(arch.serialize(), "architecture a of e is\nbegin\nend architecture a;");
    }

    #[test]
    fn end_name_must_match() {
        assert!(Architecture::parse("architecture a of e is begin end architecture b;").is_none());
        assert!(Architecture::parse("architecture a e is begin end;").is_none());
    }
}
