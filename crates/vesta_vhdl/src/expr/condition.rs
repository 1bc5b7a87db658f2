//! Boolean-valued expressions: comparisons, clock edges and logic.

use super::reference::DirectReference;
use super::{ComparisonOperator, Expression, LogicalOperator};
use crate::VhdlNode;

/// Which clock transition an edge test detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EdgeKind {
    /// `rising_edge(s)`
    Rising,
    /// `falling_edge(s)`
    Falling,
}

impl EdgeKind {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("rising_edge") {
            Some(EdgeKind::Rising)
        } else if name.eq_ignore_ascii_case("falling_edge") {
            Some(EdgeKind::Falling)
        } else {
            None
        }
    }

    /// The edge function name.
    pub fn name(self) -> &'static str {
        match self {
            EdgeKind::Rising => "rising_edge",
            EdgeKind::Falling => "falling_edge",
        }
    }
}

/// A comparison or an edge test.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ConditionalExpression {
    /// `lhs op rhs`
    Comparison {
        /// Left operand.
        lhs: Box<Expression>,
        /// Relation.
        op: ComparisonOperator,
        /// Right operand.
        rhs: Box<Expression>,
    },
    /// `rising_edge(clk)` or `falling_edge(clk)`.
    Edge {
        /// Transition detected.
        kind: EdgeKind,
        /// Clock signal.
        signal: DirectReference,
    },
}

impl VhdlNode for ConditionalExpression {
    fn parse(text: &str) -> Option<Self> {
        match Expression::parse(text)? {
            Expression::Conditional(condition) => Some(condition),
            _ => None,
        }
    }

    fn serialize(&self) -> String {
        match self {
            ConditionalExpression::Comparison { lhs, op, rhs } => {
                format!("{} {op} {}", lhs.serialize(), rhs.serialize())
            }
            ConditionalExpression::Edge { kind, signal } => {
                format!("{}({})", kind.name(), signal.serialize())
            }
        }
    }
}

/// Logical negation and binary logical operations.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BooleanExpression {
    /// `not operand`
    Not(Box<Expression>),
    /// `lhs op rhs`
    Binary {
        /// Left operand.
        lhs: Box<Expression>,
        /// Operator.
        op: LogicalOperator,
        /// Right operand.
        rhs: Box<Expression>,
    },
}

impl VhdlNode for BooleanExpression {
    fn parse(text: &str) -> Option<Self> {
        match Expression::parse(text)? {
            Expression::Logical(logical) => Some(logical),
            _ => None,
        }
    }

    fn serialize(&self) -> String {
        match self {
            BooleanExpression::Not(operand) => format!("not {}", operand.serialize()),
            BooleanExpression::Binary { lhs, op, rhs } => {
                format!("{} {op} {}", lhs.serialize(), rhs.serialize())
            }
        }
    }
}

crate::display_via_serialize!(ConditionalExpression, BooleanExpression);
