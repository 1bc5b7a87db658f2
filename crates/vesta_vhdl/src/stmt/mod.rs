//! Statements and statement blocks.
//!
//! Sequential code lives in [`SynchronousBlock`]s, concurrent code in
//! [`AsynchronousBlock`]s. Both are built the same way: the region is split
//! into statements and constructs with [`scan::split_pieces`], each piece is
//! parsed by the construct its leading word selects, and a region holding a
//! single element is that element rather than a one-item list.
//!
//! Comment lines between statements are kept as [`Statement::Comment`]. A
//! comment on the same line as a declaration becomes its trailing comment; on
//! the same line as any other statement it becomes a comment line after it.

mod async_block;
mod definition;
mod instance;
mod process;
mod sync_block;

pub use async_block::{
    AsynchronousBlock, AsynchronousStatement, AsynchronousValue, ForGenerate, WhenBlock,
};
pub use definition::{ConstantSignal, Definition, LocalSignal, LocalVariable};
pub use instance::{ComponentInstantiation, InstantiatedUnit, MapActual, VariableMap};
pub use process::ProcessBlock;
pub use sync_block::{CaseStatement, ForLoop, IfBlock, SynchronousBlock, WhenCase, WhenCondition};

pub(crate) use definition::{default_fits, definition_with_trailer, parse_declarations};

use crate::comment::Comment;
use crate::expr::{DirectReference, Expression};
use crate::limits::{self, STATEMENT_MAX_LEN};
use crate::scan;
use crate::VhdlNode;
use vesta_common::Ident;

/// Assignment delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AssignmentKind {
    /// `<=`
    Signal,
    /// `:=`
    Variable,
}

impl AssignmentKind {
    /// The delimiter as written.
    pub fn symbol(self) -> &'static str {
        match self {
            AssignmentKind::Signal => "<=",
            AssignmentKind::Variable => ":=",
        }
    }
}

/// A simple sequential statement.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Statement {
    /// An object declaration.
    Definition(Definition),
    /// `target <= value;` or `target := value;`
    Assignment {
        /// Assigned object.
        target: DirectReference,
        /// Delimiter used.
        kind: AssignmentKind,
        /// Assigned value.
        value: Expression,
    },
    /// A comment line.
    Comment(Comment),
    /// `null;`
    Null,
    /// `return [value];`
    Return(Option<Expression>),
}

/// Finds the first top-level `<=` or `:=`.
pub(crate) fn find_assignment(text: &str) -> Option<(usize, AssignmentKind)> {
    let signal = scan::find_top_level(text, "<=").map(|at| (at, AssignmentKind::Signal));
    let variable = scan::find_top_level(text, ":=").map(|at| (at, AssignmentKind::Variable));
    match (signal, variable) {
        (Some(s), Some(v)) => Some(if s.0 < v.0 { s } else { v }),
        (s, v) => s.or(v),
    }
}

/// Splits `label: rest`, returning `None` when there is no label.
pub(crate) fn split_label(text: &str) -> Option<(Ident, &str)> {
    let text = text.trim_start();
    let colon = text.find(':')?;
    if text[colon + 1..].starts_with('=') {
        return None;
    }
    let label = Ident::new(text[..colon].trim_end())?;
    Some((label, text[colon + 1..].trim_start()))
}

/// Renders a nested region on the lines after its header, or nothing when
/// the region is empty.
pub(crate) fn nest(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!("\n{}", scan::indent(body, 1))
    }
}

impl VhdlNode for Statement {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, STATEMENT_MAX_LEN) {
            return None;
        }
        if let Some(comment) = Comment::parse(text) {
            return Some(Statement::Comment(comment));
        }
        if let Some(definition) = Definition::parse(text) {
            return Some(Statement::Definition(definition));
        }
        let code = scan::without_comments(text);
        if scan::construct_end(&code)? != code.len() {
            return None;
        }
        let body = code.strip_suffix(';')?.trim_end();
        if body.eq_ignore_ascii_case("null") {
            return Some(Statement::Null);
        }
        if let Some(rest) = scan::strip_word_prefix(body, "return") {
            if rest.is_empty() {
                return Some(Statement::Return(None));
            }
            return Expression::parse(rest).map(|value| Statement::Return(Some(value)));
        }
        let (at, kind) = find_assignment(body)?;
        Some(Statement::Assignment {
            target: DirectReference::parse(&body[..at])?,
            kind,
            value: Expression::parse(&body[at + 2..])?,
        })
    }

    fn serialize(&self) -> String {
        match self {
            Statement::Definition(definition) => definition.serialize(),
            Statement::Assignment {
                target,
                kind,
                value,
            } => format!("{} {} {};", target.serialize(), kind.symbol(), value.serialize()),
            Statement::Comment(comment) => comment.serialize(),
            Statement::Null => "null;".to_string(),
            Statement::Return(None) => "return;".to_string(),
            Statement::Return(Some(value)) => format!("return {};", value.serialize()),
        }
    }
}

crate::display_via_serialize!(Statement);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments() {
        let stmt = Statement::parse("q <= d;").unwrap();
        assert!(matches!(stmt, Statement::Assignment { kind: AssignmentKind::Signal, .. }));
        let stmt = Statement::parse("count:=count+1;").unwrap();
        assert_eq!(stmt.serialize(), "count := count + 1;");
        let stmt = Statement::parse("data(3 downto 0) <= x\"A\";").unwrap();
        assert_eq!(stmt.serialize(), "data(3 downto 0) <= x\"A\";");
    }

    #[test]
    fn earliest_delimiter_wins() {
        let stmt = Statement::parse("flag <= a <= b;").unwrap();
        let Statement::Assignment { value, .. } = stmt else {
            panic!("expected assignment");
        };
        assert!(matches!(value, Expression::Conditional(_)));
    }

    #[test]
    fn null_and_return() {
        assert_eq!(Statement::parse("NULL;"), Some(Statement::Null));
        assert_eq!(Statement::parse("return a + 1;").unwrap().serialize(), "return a + 1;");
        assert_eq!(Statement::parse("return;"), Some(Statement::Return(None)));
    }

    #[test]
    fn inner_comments_are_stripped() {
        let stmt = Statement::parse("q <= -- next\n  d;").unwrap();
        assert_eq!(stmt.serialize(), "q <= d;");
    }

    #[test]
    fn rejects_multiple_or_unterminated() {
        assert!(Statement::parse("a <= b; c <= d;").is_none());
        assert!(Statement::parse("a <= b").is_none());
        assert!(Statement::parse("a b;").is_none());
    }

    #[test]
    fn labels() {
        let (label, rest) = split_label("u1 : counter port map (a => b);").unwrap();
        assert_eq!(label.as_str(), "u1");
        assert!(rest.starts_with("counter"));
        assert!(split_label("x := 1;").is_none());
        assert!(split_label("a <= b;").is_none());
    }

    #[test]
    fn oversized_statement_rejected() {
        let text = format!("a <= {};", vec!["b"; STATEMENT_MAX_LEN].join(" or "));
        assert!(Statement::parse(&text).is_none());
    }
}
