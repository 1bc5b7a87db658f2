//! Entity and component declarations.

use super::{GenericBlock, PortBlock};
use crate::limits::{self, BLOCK_MAX_LEN};
use crate::scan;
use crate::VhdlNode;
use vesta_common::Ident;

type Interface = (Option<GenericBlock>, Option<PortBlock>);

/// Parses an optional generic clause followed by an optional port clause.
fn parse_interface(body: &str) -> Option<Interface> {
    let mut generics = None;
    let mut ports = None;
    let mut pos = 0;
    loop {
        pos = scan::skip_trivia(body, pos);
        let rest = body.get(pos..)?;
        if rest.is_empty() {
            return Some((generics, ports));
        }
        let clause = &rest[..scan::construct_end(rest)?];
        if scan::starts_with_word(clause, "generic") && generics.is_none() && ports.is_none() {
            generics = Some(GenericBlock::parse(clause)?);
        } else if scan::starts_with_word(clause, "port") && ports.is_none() {
            ports = Some(PortBlock::parse(clause)?);
        } else {
            return None;
        }
        pos += clause.len();
    }
}

fn format_unit(keyword: &str, name: &Ident, generics: Option<&GenericBlock>, ports: Option<&PortBlock>) -> String {
    let mut out = format!("{keyword} {name} is");
    for clause in [generics.map(VhdlNode::serialize), ports.map(VhdlNode::serialize)]
        .into_iter()
        .flatten()
    {
        out.push('\n');
        out.push_str(&scan::indent(&clause, 1));
    }
    out.push_str(&format!("\nend {keyword} {name};"));
    out
}

/// Splits `keyword name is body end [keyword] [name];` into name and body.
fn parse_unit<'a>(text: &'a str, keyword: &str, require_is: bool) -> Option<(Ident, &'a str)> {
    if !limits::within(text, BLOCK_MAX_LEN) || scan::construct_end(text)? != text.len() {
        return None;
    }
    let rest = scan::strip_word_prefix(text, keyword)?;
    let name_end = rest
        .find(|c: char| c.is_whitespace() || c == '-')
        .unwrap_or(rest.len());
    let name = Ident::new(&rest[..name_end])?;
    let mut body = rest[name_end..].trim_start();
    match scan::strip_word_prefix(body, "is") {
        Some(after) => body = after,
        None if require_is => return None,
        None => {}
    }
    let body = scan::strip_end_clause(body, &[keyword], false, Some(name.as_str()))?;
    Some((name, body))
}

/// `entity name is [generic (...);] [port (...);] end entity name;`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Entity {
    /// Entity name.
    pub name: Ident,
    /// Generic clause.
    pub generics: Option<GenericBlock>,
    /// Port clause.
    pub ports: Option<PortBlock>,
}

impl VhdlNode for Entity {
    fn parse(text: &str) -> Option<Self> {
        let (name, body) = parse_unit(text.trim(), "entity", true)?;
        let (generics, ports) = parse_interface(body)?;
        Some(Entity {
            name,
            generics,
            ports,
        })
    }

    fn serialize(&self) -> String {
        format_unit("entity", &self.name, self.generics.as_ref(), self.ports.as_ref())
    }
}

/// `component name is [generic (...);] [port (...);] end component name;`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComponentDefinition {
    /// Component name.
    pub name: Ident,
    /// Generic clause.
    pub generics: Option<GenericBlock>,
    /// Port clause.
    pub ports: Option<PortBlock>,
}

impl VhdlNode for ComponentDefinition {
    fn parse(text: &str) -> Option<Self> {
        let (name, body) = parse_unit(text.trim(), "component", false)?;
        let (generics, ports) = parse_interface(body)?;
        Some(ComponentDefinition {
            name,
            generics,
            ports,
        })
    }

    fn serialize(&self) -> String {
        format_unit("component", &self.name, self.generics.as_ref(), self.ports.as_ref())
    }
}

crate::display_via_serialize!(Entity, ComponentDefinition);
