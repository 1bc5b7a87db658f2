//! Type declarations: enumerations, records and constrained arrays.

use super::all_unique;
use crate::comment::{self, Comment};
use crate::limits::{self, BLOCK_MAX_LEN, STATEMENT_MAX_LEN};
use crate::scan::{self, Piece};
use crate::types::{Type, VectorSize};
use crate::VhdlNode;
use vesta_common::Ident;

/// `name: type;` inside a record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecordField {
    /// Field name.
    pub name: Ident,
    /// Field type.
    pub ty: Type,
    /// Comment ending the field's line.
    pub comment: Option<Comment>,
}

impl VhdlNode for RecordField {
    fn parse(text: &str) -> Option<Self> {
        if !limits::within(text, STATEMENT_MAX_LEN) {
            return None;
        }
        let (code, comment) = comment::split_trailer(text);
        let (name, ty) = code.strip_suffix(';')?.split_once(':')?;
        Some(RecordField {
            name: Ident::new(name.trim())?,
            ty: Type::parse(ty)?,
            comment,
        })
    }

    fn serialize(&self) -> String {
        comment::with_trailer(
            format!("{}: {};", self.name, self.ty.serialize()),
            self.comment.as_ref(),
        )
    }
}

/// A `type` declaration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TypeDefinition {
    /// `type name is (A, B, C);`
    Enumeration {
        /// Type name.
        name: Ident,
        /// Literals in order.
        values: Vec<Ident>,
    },
    /// `type name is record ... end record;`
    Record {
        /// Type name.
        name: Ident,
        /// Fields in order.
        fields: Vec<RecordField>,
    },
    /// `type name is array (range) of element;`
    Array {
        /// Type name.
        name: Ident,
        /// Index range.
        size: VectorSize,
        /// Element type.
        element: Type,
    },
}

impl TypeDefinition {
    /// An enumeration; fails when empty or when a literal repeats.
    pub fn enumeration(name: Ident, values: Vec<Ident>) -> Option<Self> {
        (!values.is_empty() && all_unique(&values)).then_some(TypeDefinition::Enumeration { name, values })
    }

    /// A record; fails when empty or when two fields share a name.
    pub fn record(name: Ident, fields: Vec<RecordField>) -> Option<Self> {
        (!fields.is_empty() && all_unique(fields.iter().map(|f| &f.name)))
            .then_some(TypeDefinition::Record { name, fields })
    }

    /// The declared type name.
    pub fn name(&self) -> &Ident {
        match self {
            TypeDefinition::Enumeration { name, .. }
            | TypeDefinition::Record { name, .. }
            | TypeDefinition::Array { name, .. } => name,
        }
    }
}

fn parse_enumeration(name: Ident, rest: &str) -> Option<TypeDefinition> {
    let span = scan::balanced_span(rest, '(', ')')?;
    if span.start != 0 || rest[span.end..].trim() != ";" {
        return None;
    }
    let values = scan::split_top_level(&rest[1..span.end - 1], b',')
        .into_iter()
        .map(|value| Ident::new(value.trim()))
        .collect::<Option<Vec<_>>>()?;
    TypeDefinition::enumeration(name, values)
}

fn parse_record(name: Ident, text: &str, rest: &str) -> Option<TypeDefinition> {
    if scan::construct_end(text)? != text.len() {
        return None;
    }
    let body = scan::strip_word_prefix(rest, "record")?;
    let body = scan::strip_end_clause(body, &["record"], true, Some(name.as_str()))?;
    let mut fields = Vec::new();
    for piece in scan::split_pieces(body)? {
        if let Piece::Code { text, trailer } = piece {
            let mut field = RecordField::parse(text)?;
            if field.comment.is_none() {
                field.comment = trailer.and_then(Comment::new);
            }
            fields.push(field);
        }
    }
    TypeDefinition::record(name, fields)
}

fn parse_array(name: Ident, rest: &str) -> Option<TypeDefinition> {
    let rest = scan::strip_word_prefix(rest, "array")?;
    if !rest.starts_with('(') {
        return None;
    }
    let span = scan::balanced_span(rest, '(', ')')?;
    let element = scan::strip_word_prefix(&rest[span.end..], "of")?;
    Some(TypeDefinition::Array {
        name,
        size: VectorSize::parse(&rest[1..span.end - 1])?,
        element: Type::parse(element.strip_suffix(';')?)?,
    })
}

impl VhdlNode for TypeDefinition {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) {
            return None;
        }
        let rest = scan::strip_word_prefix(text, "type")?;
        let is = scan::find_word(rest, "is", false)?;
        let name = Ident::new(rest[..is].trim())?;
        let rest = rest[is + "is".len()..].trim_start();
        if scan::starts_with_word(rest, "record") {
            return parse_record(name, text, rest);
        }
        let code = scan::strip_comments(rest);
        if code.starts_with('(') {
            parse_enumeration(name, &code)
        } else {
            parse_array(name, &code)
        }
    }

    fn serialize(&self) -> String {
        match self {
            TypeDefinition::Enumeration { name, values } => {
                let values: Vec<&str> = values.iter().map(Ident::as_str).collect();
                format!("type {name} is ({});", values.join(", "))
            }
            TypeDefinition::Record { name, fields } => {
                let fields: Vec<String> = fields.iter().map(VhdlNode::serialize).collect();
                format!(
                    "type {name} is record\n{}\nend record {name};",
                    scan::indent(&fields.join("\n"), 1)
                )
            }
            TypeDefinition::Array {
                name,
                size,
                element,
            } => format!(
                "type {name} is array ({}) of {};",
                size.serialize(),
                element.serialize()
            ),
        }
    }
}

crate::display_via_serialize!(RecordField, TypeDefinition);
