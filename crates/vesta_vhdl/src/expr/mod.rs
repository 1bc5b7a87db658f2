//! The expression grammar.
//!
//! An expression is classified by its shape, tried in a fixed order:
//!
//! 1. a literal;
//! 2. a call shape `name(...)` covering the whole text, which is a type
//!    conversion, an edge test, a function call or a slice;
//! 3. a binary operation, split at the last top-level operator of the
//!    loosest tier present (logical, then relational, then adding, then
//!    multiplying), so chains associate to the left;
//! 4. a fully bracketed group, a `not` prefix, or a plain reference.
//!
//! Relational operators do not chain: `a = b = c` is rejected. Unary minus is
//! only accepted on numeric literals.

mod call;
mod condition;
mod ops;
mod reference;

pub use call::{Argument, CastOperation, CastType, FunctionCall};
pub use condition::{BooleanExpression, ConditionalExpression, EdgeKind};
pub use ops::{ArithmeticOperator, ComparisonOperator, LogicalOperator};
pub use reference::DirectReference;

use crate::limits::{self, EXPRESSION_MAX_LEN};
use crate::literal::SignalLiteral;
use crate::scan;
use crate::types::VectorIndex;
use crate::VhdlNode;
use ops::{Operator, OperatorMatch};
use vesta_common::Ident;

/// An arithmetic or concatenation operation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BinaryOperation {
    /// Left operand.
    pub lhs: Box<Expression>,
    /// Operator.
    pub op: ArithmeticOperator,
    /// Right operand.
    pub rhs: Box<Expression>,
}

impl BinaryOperation {
    /// Combines two operands.
    pub fn new(lhs: Expression, op: ArithmeticOperator, rhs: Expression) -> Self {
        Self {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }
}

/// Any VHDL expression.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Expression {
    /// A name, member, element, slice or attribute.
    Reference(DirectReference),
    /// A literal value.
    Literal(SignalLiteral),
    /// Arithmetic or concatenation.
    Binary(BinaryOperation),
    /// A parenthesized subexpression.
    Precedence(Box<Expression>),
    /// A comparison or edge test.
    Conditional(ConditionalExpression),
    /// A logical operation.
    Logical(BooleanExpression),
    /// A type conversion.
    Cast(CastOperation),
    /// A function call.
    Call(FunctionCall),
}

impl Expression {
    /// The value of an integer literal.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Expression::Literal(SignalLiteral::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Wraps `self` in parentheses.
    pub fn parenthesized(self) -> Self {
        Expression::Precedence(Box::new(self))
    }
}

impl From<SignalLiteral> for Expression {
    fn from(literal: SignalLiteral) -> Self {
        Expression::Literal(literal)
    }
}

impl From<DirectReference> for Expression {
    fn from(reference: DirectReference) -> Self {
        Expression::Reference(reference)
    }
}

impl From<Ident> for Expression {
    fn from(name: Ident) -> Self {
        Expression::Reference(DirectReference::Variable(name))
    }
}

/// Classifies text of the form `name(...)`.
///
/// Returns `None` when the text does not have that shape. Once it does, the
/// answer is final: `Some(None)` means the call shape was recognized but its
/// contents are invalid.
fn call_shape(text: &str) -> Option<Option<Expression>> {
    if !text.ends_with(')') {
        return None;
    }
    let open = text.find('(')?;
    let name = Ident::new(text[..open].trim_end())?;
    if scan::balanced_span(text, '(', ')')? != (open..text.len()) {
        return None;
    }
    let inner = &text[open + 1..text.len() - 1];
    let pieces = scan::split_top_level(inner, b',');
    Some(classify_call(name, inner, &pieces))
}

fn classify_call(name: Ident, inner: &str, pieces: &[&str]) -> Option<Expression> {
    if let Some(kind) = CastType::from_name(name.as_str()) {
        if pieces.len() != 1 {
            return None;
        }
        let value = Box::new(parse_expression(inner)?);
        return Some(Expression::Cast(CastOperation { kind, value }));
    }
    if let Some(kind) = EdgeKind::from_name(name.as_str()) {
        if pieces.len() != 1 {
            return None;
        }
        let signal = DirectReference::parse(inner)?;
        return Some(Expression::Conditional(ConditionalExpression::Edge { kind, signal }));
    }
    let arguments: Option<Vec<Argument>> = pieces.iter().map(|p| Argument::parse(p)).collect();
    if let Some(arguments) = arguments {
        return FunctionCall::new(name, arguments).map(Expression::Call);
    }
    if pieces.len() != 1 {
        return None;
    }
    match VectorIndex::parse(inner)? {
        VectorIndex::Index(_) => None,
        index => Some(Expression::Reference(DirectReference::Indexed { name, index })),
    }
}

fn combine(lhs: Expression, op: Operator, rhs: Expression) -> Expression {
    let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
    match op {
        Operator::Arithmetic(op) => Expression::Binary(BinaryOperation { lhs, op, rhs }),
        Operator::Comparison(op) => {
            Expression::Conditional(ConditionalExpression::Comparison { lhs, op, rhs })
        }
        Operator::Logical(op) => Expression::Logical(BooleanExpression::Binary { lhs, op, rhs }),
    }
}

fn split_binary(text: &str, operators: &[OperatorMatch]) -> Option<Expression> {
    let loosest = operators.iter().map(|m| m.op.level()).min()?;
    let tier: Vec<&OperatorMatch> = operators
        .iter()
        .filter(|m| m.op.level() == loosest)
        .collect();
    if matches!(tier[0].op, Operator::Comparison(_)) && tier.len() > 1 {
        return None;
    }
    let split = tier.last()?;
    let lhs = parse_expression(&text[..split.range.start])?;
    let rhs = parse_expression(&text[split.range.end..])?;
    Some(combine(lhs, split.op, rhs))
}

fn parse_operand(text: &str) -> Option<Expression> {
    if text.starts_with('(') {
        if scan::balanced_span(text, '(', ')')? != (0..text.len()) {
            return None;
        }
        let inner = parse_expression(&text[1..text.len() - 1])?;
        return Some(Expression::Precedence(Box::new(inner)));
    }
    if let Some(rest) = scan::strip_word_prefix(text, "not") {
        let operand = parse_expression(rest)?;
        return Some(Expression::Logical(BooleanExpression::Not(Box::new(operand))));
    }
    DirectReference::parse(text).map(Expression::Reference)
}

fn parse_expression(text: &str) -> Option<Expression> {
    let text = text.trim();
    if text.is_empty() || !limits::within(text, EXPRESSION_MAX_LEN) {
        return None;
    }
    let _guard = limits::enter()?;
    if let Some(literal) = SignalLiteral::parse(text) {
        return Some(Expression::Literal(literal));
    }
    if let Some(call) = call_shape(text) {
        return call;
    }
    let operators = ops::top_level_operators(text)?;
    if operators.is_empty() {
        parse_operand(text)
    } else {
        split_binary(text, &operators)
    }
}

impl VhdlNode for Expression {
    fn parse(text: &str) -> Option<Self> {
        parse_expression(&scan::without_comments(text))
    }

    fn serialize(&self) -> String {
        match self {
            Expression::Reference(reference) => reference.serialize(),
            Expression::Literal(literal) => literal.serialize(),
            Expression::Binary(BinaryOperation { lhs, op, rhs }) => {
                format!("{} {op} {}", lhs.serialize(), rhs.serialize())
            }
            Expression::Precedence(inner) => format!("({})", inner.serialize()),
            Expression::Conditional(condition) => condition.serialize(),
            Expression::Logical(logical) => logical.serialize(),
            Expression::Cast(cast) => cast.serialize(),
            Expression::Call(call) => call.serialize(),
        }
    }
}

crate::display_via_serialize!(Expression, BinaryOperation);

impl VhdlNode for BinaryOperation {
    fn parse(text: &str) -> Option<Self> {
        match Expression::parse(text)? {
            Expression::Binary(binary) => Some(binary),
            _ => None,
        }
    }

    fn serialize(&self) -> String {
        format!("{} {} {}", self.lhs.serialize(), self.op, self.rhs.serialize())
    }
}
