//! Object declarations: signals, variables and constants.

use super::Statement;
use crate::comment::{self, Comment};
use crate::expr::Expression;
use crate::limits::{self, STATEMENT_MAX_LEN};
use crate::scan::{self, Piece};
use crate::types::Type;
use crate::VhdlNode;
use vesta_common::Ident;

/// Returns `true` unless `value` is a literal that cannot hold a `ty`.
pub(crate) fn default_fits(ty: &Type, value: &Expression) -> bool {
    match (ty.as_signal(), value) {
        (Some(signal), Expression::Literal(literal)) => literal.is_valid_for(signal),
        _ => true,
    }
}

struct ObjectParts {
    name: Ident,
    ty: Type,
    default: Option<Expression>,
    comment: Option<Comment>,
}

/// Parses `keyword name: type [:= default];` with an optional trailing comment.
fn parse_object(text: &str, keyword: &str) -> Option<ObjectParts> {
    if !limits::within(text, STATEMENT_MAX_LEN) {
        return None;
    }
    let (code, comment) = comment::split_trailer(text);
    let body = scan::strip_word_prefix(&code, keyword)?
        .strip_suffix(';')?
        .trim_end();
    let colon = body.find(':')?;
    if body[colon + 1..].starts_with('=') {
        return None;
    }
    let name = Ident::new(body[..colon].trim())?;
    let rest = &body[colon + 1..];
    let (ty, default) = match scan::find_top_level(rest, ":=") {
        Some(at) => (Type::parse(&rest[..at])?, Some(Expression::parse(&rest[at + 2..])?)),
        None => (Type::parse(rest)?, None),
    };
    if let Some(value) = &default {
        if !default_fits(&ty, value) {
            return None;
        }
    }
    Some(ObjectParts {
        name,
        ty,
        default,
        comment,
    })
}

fn format_object(
    keyword: &str,
    name: &Ident,
    ty: &Type,
    default: Option<&Expression>,
    comment: Option<&Comment>,
) -> String {
    let code = match default {
        Some(value) => format!("{keyword} {name}: {} := {};", ty.serialize(), value.serialize()),
        None => format!("{keyword} {name}: {};", ty.serialize()),
    };
    comment::with_trailer(code, comment)
}

/// `signal name: type [:= default];`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LocalSignal {
    /// Signal name.
    pub name: Ident,
    /// Signal type.
    pub ty: Type,
    /// Initial value.
    pub default: Option<Expression>,
    /// Trailing comment.
    pub comment: Option<Comment>,
}

impl LocalSignal {
    /// Declares a signal without a default.
    pub fn new(name: Ident, ty: Type) -> Self {
        Self {
            name,
            ty,
            default: None,
            comment: None,
        }
    }

    /// Sets the default, rejecting a literal that does not fit the type.
    pub fn with_default_value(mut self, value: Expression) -> Option<Self> {
        if !default_fits(&self.ty, &value) {
            return None;
        }
        self.default = Some(value);
        Some(self)
    }
}

impl VhdlNode for LocalSignal {
    fn parse(text: &str) -> Option<Self> {
        let parts = parse_object(text, "signal")?;
        Some(Self {
            name: parts.name,
            ty: parts.ty,
            default: parts.default,
            comment: parts.comment,
        })
    }

    fn serialize(&self) -> String {
        format_object("signal", &self.name, &self.ty, self.default.as_ref(), self.comment.as_ref())
    }
}

/// `variable name: type [:= default];`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LocalVariable {
    /// Variable name.
    pub name: Ident,
    /// Variable type.
    pub ty: Type,
    /// Initial value.
    pub default: Option<Expression>,
    /// Trailing comment.
    pub comment: Option<Comment>,
}

impl LocalVariable {
    /// Declares a variable without a default.
    pub fn new(name: Ident, ty: Type) -> Self {
        Self {
            name,
            ty,
            default: None,
            comment: None,
        }
    }

    /// Sets the default, rejecting a literal that does not fit the type.
    pub fn with_default_value(mut self, value: Expression) -> Option<Self> {
        if !default_fits(&self.ty, &value) {
            return None;
        }
        self.default = Some(value);
        Some(self)
    }
}

impl VhdlNode for LocalVariable {
    fn parse(text: &str) -> Option<Self> {
        let parts = parse_object(text, "variable")?;
        Some(Self {
            name: parts.name,
            ty: parts.ty,
            default: parts.default,
            comment: parts.comment,
        })
    }

    fn serialize(&self) -> String {
        format_object("variable", &self.name, &self.ty, self.default.as_ref(), self.comment.as_ref())
    }
}

/// `constant name: type := value;`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConstantSignal {
    /// Constant name.
    pub name: Ident,
    /// Constant type.
    pub ty: Type,
    /// Value.
    pub value: Expression,
    /// Trailing comment.
    pub comment: Option<Comment>,
}

impl ConstantSignal {
    /// Declares a constant, rejecting a literal that does not fit the type.
    pub fn new(name: Ident, ty: Type, value: Expression) -> Option<Self> {
        default_fits(&ty, &value).then_some(Self {
            name,
            ty,
            value,
            comment: None,
        })
    }
}

impl VhdlNode for ConstantSignal {
    fn parse(text: &str) -> Option<Self> {
        let parts = parse_object(text, "constant")?;
        Some(Self {
            name: parts.name,
            ty: parts.ty,
            value: parts.default?,
            comment: parts.comment,
        })
    }

    fn serialize(&self) -> String {
        format_object("constant", &self.name, &self.ty, Some(&self.value), self.comment.as_ref())
    }
}

/// Any object declaration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Definition {
    /// A signal.
    Signal(LocalSignal),
    /// A variable.
    Variable(LocalVariable),
    /// A constant.
    Constant(ConstantSignal),
}

impl Definition {
    /// The declared name.
    pub fn name(&self) -> &Ident {
        match self {
            Definition::Signal(s) => &s.name,
            Definition::Variable(v) => &v.name,
            Definition::Constant(c) => &c.name,
        }
    }

    /// The trailing comment, if any.
    pub fn comment(&self) -> Option<&Comment> {
        match self {
            Definition::Signal(s) => s.comment.as_ref(),
            Definition::Variable(v) => v.comment.as_ref(),
            Definition::Constant(c) => c.comment.as_ref(),
        }
    }

    /// Replaces the trailing comment.
    pub fn with_comment(mut self, comment: Option<Comment>) -> Self {
        match &mut self {
            Definition::Signal(s) => s.comment = comment,
            Definition::Variable(v) => v.comment = comment,
            Definition::Constant(c) => c.comment = comment,
        }
        self
    }
}

impl VhdlNode for Definition {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim_start();
        if scan::starts_with_word(text, "signal") {
            LocalSignal::parse(text).map(Definition::Signal)
        } else if scan::starts_with_word(text, "variable") {
            LocalVariable::parse(text).map(Definition::Variable)
        } else if scan::starts_with_word(text, "constant") {
            ConstantSignal::parse(text).map(Definition::Constant)
        } else {
            None
        }
    }

    fn serialize(&self) -> String {
        match self {
            Definition::Signal(s) => s.serialize(),
            Definition::Variable(v) => v.serialize(),
            Definition::Constant(c) => c.serialize(),
        }
    }
}

crate::display_via_serialize!(LocalSignal, LocalVariable, ConstantSignal, Definition);

/// Attaches a same-line comment to a definition parsed without it.
pub(crate) fn definition_with_trailer(text: &str, trailer: Option<&str>) -> Option<Definition> {
    let definition = Definition::parse(text)?;
    match trailer {
        Some(trailer) if definition.comment().is_none() => {
            Some(definition.with_comment(Comment::new(trailer)))
        }
        _ => Some(definition),
    }
}

/// Parses a declarative part holding only object declarations and comments.
pub(crate) fn parse_declarations(text: &str) -> Option<Vec<Statement>> {
    scan::split_pieces(text)?
        .into_iter()
        .map(|piece| match piece {
            Piece::Comment(text) => Comment::new(text).map(Statement::Comment),
            Piece::Code { text, trailer } => {
                definition_with_trailer(text, trailer).map(Statement::Definition)
            }
        })
        .collect()
}
