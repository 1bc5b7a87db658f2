//! Names that denote an object: plain, selected, indexed or attributed.

use crate::scan;
use crate::types::VectorIndex;
use crate::VhdlNode;
use vesta_common::Ident;

/// A reference to a signal, variable or part of one.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum DirectReference {
    /// `name`
    Variable(Ident),
    /// `record.member`
    Member {
        /// The record object.
        record: Ident,
        /// The selected field.
        member: Ident,
    },
    /// `name(index)`, `name(range)` or `name(others)`.
    Indexed {
        /// The array object.
        name: Ident,
        /// The selected element or slice.
        index: VectorIndex,
    },
    /// `prefix'attribute`, such as `clk'event`.
    Attribute {
        /// The object the attribute applies to.
        prefix: Ident,
        /// Attribute designator, lowercase.
        attribute: String,
    },
}

impl DirectReference {
    /// The object being referenced, ignoring any selection.
    pub fn base(&self) -> &Ident {
        match self {
            DirectReference::Variable(name)
            | DirectReference::Indexed { name, .. }
            | DirectReference::Member { record: name, .. }
            | DirectReference::Attribute { prefix: name, .. } => name,
        }
    }
}

fn attribute_designator(text: &str) -> Option<String> {
    let valid = text.starts_with(|c: char| c.is_ascii_alphabetic())
        && text.bytes().all(scan::is_ident_byte);
    valid.then(|| text.to_ascii_lowercase())
}

impl VhdlNode for DirectReference {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(name) = Ident::new(text) {
            return Some(DirectReference::Variable(name));
        }
        if text.ends_with(')') {
            let open = text.find('(')?;
            let span = scan::balanced_span(text, '(', ')')?;
            if span.start != open || span.end != text.len() {
                return None;
            }
            return Some(DirectReference::Indexed {
                name: Ident::new(text[..open].trim_end())?,
                index: VectorIndex::parse(&text[open + 1..text.len() - 1])?,
            });
        }
        if let Some((record, member)) = text.split_once('.') {
            return Some(DirectReference::Member {
                record: Ident::new(record.trim())?,
                member: Ident::new(member.trim())?,
            });
        }
        let (prefix, attribute) = text.split_once('\'')?;
        Some(DirectReference::Attribute {
            prefix: Ident::new(prefix.trim_end())?,
            attribute: attribute_designator(attribute)?,
        })
    }

    fn serialize(&self) -> String {
        match self {
            DirectReference::Variable(name) => name.to_string(),
            DirectReference::Member { record, member } => format!("{record}.{member}"),
            DirectReference::Indexed { name, index } => format!("{name}({})", index.serialize()),
            DirectReference::Attribute { prefix, attribute } => format!("{prefix}'{attribute}"),
        }
    }
}

crate::display_via_serialize!(DirectReference);
