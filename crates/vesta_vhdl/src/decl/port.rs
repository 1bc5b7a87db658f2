//! Port and generic clauses.

use super::{all_unique, format_list, list_interior, split_items};
use crate::comment::{self, Comment};
use crate::expr::Expression;
use crate::limits::{self, BLOCK_MAX_LEN, STATEMENT_MAX_LEN};
use crate::scan;
use crate::stmt::default_fits;
use crate::types::{Mode, Type};
use crate::VhdlNode;
use vesta_common::Ident;

struct InterfaceParts {
    name: Ident,
    mode: Option<Mode>,
    ty: Type,
    default: Option<Expression>,
}

/// Parses `name: [mode] type [:= default]`.
fn parse_interface(code: &str, allow_mode: bool) -> Option<InterfaceParts> {
    let colon = code.find(':')?;
    if code[colon + 1..].starts_with('=') {
        return None;
    }
    let name = Ident::new(code[..colon].trim())?;
    let mut rest = code[colon + 1..].trim_start();
    let mut mode = None;
    if allow_mode {
        if let Some(parsed) = scan::first_word(rest).and_then(Mode::parse) {
            mode = Some(parsed);
            rest = scan::strip_word_prefix(rest, &parsed.serialize())?;
        }
    }
    let (ty, default) = match scan::find_top_level(rest, ":=") {
        Some(at) => (Type::parse(&rest[..at])?, Some(Expression::parse(&rest[at + 2..])?)),
        None => (Type::parse(rest)?, None),
    };
    if let Some(value) = &default {
        if !default_fits(&ty, value) {
            return None;
        }
    }
    Some(InterfaceParts {
        name,
        mode,
        ty,
        default,
    })
}

fn with_default(code: String, default: Option<&Expression>) -> String {
    match default {
        Some(value) => format!("{code} := {}", value.serialize()),
        None => code,
    }
}

/// One port: `name: mode type [:= default]`.
///
/// A port written without a mode is an `in` port.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PortSignal {
    /// Port name.
    pub name: Ident,
    /// Direction.
    pub mode: Mode,
    /// Port type.
    pub ty: Type,
    /// Default value.
    pub default: Option<Expression>,
    /// Comment ending the port's line.
    pub comment: Option<Comment>,
}

impl PortSignal {
    /// A port without default or comment.
    pub fn new(name: Ident, mode: Mode, ty: Type) -> Self {
        Self {
            name,
            mode,
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

    fn declaration(&self) -> String {
        with_default(
            format!("{}: {} {}", self.name, self.mode.serialize(), self.ty.serialize()),
            self.default.as_ref(),
        )
    }
}

impl VhdlNode for PortSignal {
    fn parse(text: &str) -> Option<Self> {
        if !limits::within(text, STATEMENT_MAX_LEN) {
            return None;
        }
        let (code, comment) = comment::split_trailer(text);
        let parts = parse_interface(&code, true)?;
        Some(Self {
            name: parts.name,
            mode: parts.mode.unwrap_or(Mode::In),
            ty: parts.ty,
            default: parts.default,
            comment,
        })
    }

    fn serialize(&self) -> String {
        comment::with_trailer(self.declaration(), self.comment.as_ref())
    }
}

/// One generic: `name: type [:= default]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GenericTypeDeclaration {
    /// Generic name.
    pub name: Ident,
    /// Generic type.
    pub ty: Type,
    /// Default value.
    pub default: Option<Expression>,
    /// Comment ending the generic's line.
    pub comment: Option<Comment>,
}

impl GenericTypeDeclaration {
    /// A generic without default or comment.
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

    fn declaration(&self) -> String {
        with_default(
            format!("{}: {}", self.name, self.ty.serialize()),
            self.default.as_ref(),
        )
    }
}

impl VhdlNode for GenericTypeDeclaration {
    fn parse(text: &str) -> Option<Self> {
        if !limits::within(text, STATEMENT_MAX_LEN) {
            return None;
        }
        let (code, comment) = comment::split_trailer(text);
        let parts = parse_interface(&code, false)?;
        Some(Self {
            name: parts.name,
            ty: parts.ty,
            default: parts.default,
            comment,
        })
    }

    fn serialize(&self) -> String {
        comment::with_trailer(self.declaration(), self.comment.as_ref())
    }
}

/// `port (...);`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PortBlock {
    signals: Vec<PortSignal>,
}

impl PortBlock {
    /// Builds a port clause; fails when empty or when two ports share a name.
    pub fn new(signals: Vec<PortSignal>) -> Option<Self> {
        (!signals.is_empty() && all_unique(signals.iter().map(|s| &s.name)))
            .then_some(Self { signals })
    }

    /// The ports in declaration order.
    pub fn signals(&self) -> &[PortSignal] {
        &self.signals
    }
}

impl VhdlNode for PortBlock {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) {
            return None;
        }
        let signals = split_items(list_interior(text, "port")?)?
            .into_iter()
            .map(|item| {
                let parts = parse_interface(&item.code, true)?;
                Some(PortSignal {
                    name: parts.name,
                    mode: parts.mode.unwrap_or(Mode::In),
                    ty: parts.ty,
                    default: parts.default,
                    comment: item.comment,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        PortBlock::new(signals)
    }

    fn serialize(&self) -> String {
        format_list(
            "port",
            self.signals
                .iter()
                .map(|s| (s.declaration(), s.comment.as_ref())),
        )
    }
}

/// `generic (...);`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GenericBlock {
    generics: Vec<GenericTypeDeclaration>,
}

impl GenericBlock {
    /// Builds a generic clause; fails when empty or when two generics share a
    /// name.
    pub fn new(generics: Vec<GenericTypeDeclaration>) -> Option<Self> {
        (!generics.is_empty() && all_unique(generics.iter().map(|g| &g.name)))
            .then_some(Self { generics })
    }

    /// The generics in declaration order.
    pub fn generics(&self) -> &[GenericTypeDeclaration] {
        &self.generics
    }
}

impl VhdlNode for GenericBlock {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) {
            return None;
        }
        let generics = split_items(list_interior(text, "generic")?)?
            .into_iter()
            .map(|item| {
                let parts = parse_interface(&item.code, false)?;
                Some(GenericTypeDeclaration {
                    name: parts.name,
                    ty: parts.ty,
                    default: parts.default,
                    comment: item.comment,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        GenericBlock::new(generics)
    }

    fn serialize(&self) -> String {
        format_list(
            "generic",
            self.generics
                .iter()
                .map(|g| (g.declaration(), g.comment.as_ref())),
        )
    }
}

crate::display_via_serialize!(PortSignal, GenericTypeDeclaration, PortBlock, GenericBlock);
