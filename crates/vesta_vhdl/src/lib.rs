//! Bidirectional parser and pretty-printer for a subset of VHDL.
//!
//! Every construct is a typed node implementing [`VhdlNode`]: it can be parsed
//! from source text and serialized back to canonical source text, and for any
//! node the parser produces `parse(serialize(node)) == Some(node)`.
//!
//! # Architecture
//!
//! - **Scanning** ([`scan`]): free functions over borrowed text; balanced
//!   delimiters, word and sentence search, comment handling and statement
//!   extents. There is no tokenizer pass.
//! - **Literals** ([`literal`]) and **types** ([`types`]): leaf productions.
//! - **Expressions** ([`expr`]): a single recursive sum type tried in a fixed
//!   order of shapes.
//! - **Statements** ([`stmt`]): sequential and concurrent blocks built by an
//!   explicit accumulator loop with a nesting guard ([`limits`]).
//! - **Declarations** ([`decl`]): ports, generics, entities, architectures,
//!   packages, types and functions.
//! - **Files** ([`file`]): the top-level driver, and [`diagnose`] for the
//!   additive API that reports failing design units with spans.

#![warn(missing_docs)]

pub mod comment;
pub mod decl;
pub mod diagnose;
pub mod expr;
pub mod file;
pub mod limits;
pub mod literal;
pub mod scan;
pub mod stmt;
pub mod types;

pub use comment::Comment;
pub use decl::{
    Architecture, ArchitectureHead, ComponentDefinition, Entity, FunctionDefinition,
    FunctionImplementation, GenericBlock, GenericTypeDeclaration, HeadStatement, Include,
    PackageBody, PackageBodyBlock, Parameter, PortBlock, PortSignal, RecordField, TypeDefinition,
    VhdlPackage,
};
pub use diagnose::parse_source;
pub use expr::{
    Argument, ArithmeticOperator, BinaryOperation, BooleanExpression, CastOperation, CastType,
    ComparisonOperator, ConditionalExpression, DirectReference, EdgeKind, Expression,
    FunctionCall, LogicalOperator,
};
pub use file::{DesignUnit, UnitKind, VhdlFile};
pub use literal::{HexDigit, IndexedElement, OctalDigit, SignalLiteral, VectorLiteral};
pub use stmt::{
    AssignmentKind, AsynchronousBlock, AsynchronousStatement, AsynchronousValue, CaseStatement,
    ComponentInstantiation, ConstantSignal, Definition, ForGenerate, ForLoop, IfBlock,
    InstantiatedUnit, LocalSignal, LocalVariable, MapActual, ProcessBlock, Statement,
    SynchronousBlock, VariableMap, WhenBlock, WhenCase, WhenCondition,
};
pub use types::{Mode, RangedType, SignalType, Type, VectorIndex, VectorSize};

pub use vesta_common::{Ident, ParseError};

/// A VHDL construct that can be parsed from and serialized to source text.
pub trait VhdlNode: Sized {
    /// Parses `text` as this construct.
    ///
    /// Total: returns `None` for any input that is not exactly one instance of
    /// the construct, and never panics.
    fn parse(text: &str) -> Option<Self>;

    /// Renders the node as canonical source text.
    fn serialize(&self) -> String;

    /// Like [`parse`](VhdlNode::parse), but reports failure as a [`ParseError`]
    /// naming the construct.
    fn try_parse(text: &str) -> Result<Self, ParseError> {
        Self::parse(text).ok_or_else(|| ParseError::new(construct_name::<Self>()))
    }
}

fn construct_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Implements [`std::fmt::Display`] through [`VhdlNode::serialize`].
macro_rules! display_via_serialize {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&$crate::VhdlNode::serialize(self))
                }
            }
        )+
    };
}
pub(crate) use display_via_serialize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_parse_names_construct() {
        let err = Entity::try_parse("not an entity").unwrap_err();
        assert_eq!(err.construct, "Entity");
        assert_eq!(err.to_string(), "input is not a valid Entity");
    }

    #[test]
    fn try_parse_success() {
        let literal = SignalLiteral::try_parse("'1'").unwrap();
        assert_eq!(literal.serialize(), "'1'");
    }

    #[test]
    fn display_matches_serialize() {
        let expr = Expression::parse("(a - b) + c").unwrap();
        assert_eq!(expr.to_string(), expr.serialize());
    }
}
