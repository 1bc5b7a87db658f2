//! Binary operators and the top-level operator scan.

use crate::scan::{self, Lexeme};
use std::fmt;
use std::ops::Range;

/// Arithmetic and concatenation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ArithmeticOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `&`
    Concat,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `mod`
    Mod,
    /// `rem`
    Rem,
}

impl ArithmeticOperator {
    /// The operator as written.
    pub fn symbol(self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Sub => "-",
            ArithmeticOperator::Concat => "&",
            ArithmeticOperator::Mul => "*",
            ArithmeticOperator::Div => "/",
            ArithmeticOperator::Mod => "mod",
            ArithmeticOperator::Rem => "rem",
        }
    }

    /// Returns `true` for `*`, `/`, `mod` and `rem`.
    pub fn is_multiplicative(self) -> bool {
        matches!(
            self,
            ArithmeticOperator::Mul
                | ArithmeticOperator::Div
                | ArithmeticOperator::Mod
                | ArithmeticOperator::Rem
        )
    }
}

/// Relational operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ComparisonOperator {
    /// `=`
    Eq,
    /// `/=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl ComparisonOperator {
    /// The operator as written.
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::Ne => "/=",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Ge => ">=",
        }
    }
}

/// Binary logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LogicalOperator {
    /// `and`
    And,
    /// `or`
    Or,
    /// `nand`
    Nand,
    /// `nor`
    Nor,
    /// `xor`
    Xor,
    /// `xnor`
    Xnor,
}

impl LogicalOperator {
    /// The operator as written.
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
            LogicalOperator::Nand => "nand",
            LogicalOperator::Nor => "nor",
            LogicalOperator::Xor => "xor",
            LogicalOperator::Xnor => "xnor",
        }
    }
}

macro_rules! display_symbol {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.symbol())
                }
            }
        )+
    };
}

display_symbol!(ArithmeticOperator, ComparisonOperator, LogicalOperator);

/// Any binary operator found by [`top_level_operators`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Arithmetic(ArithmeticOperator),
    Comparison(ComparisonOperator),
    Logical(LogicalOperator),
}

impl Operator {
    /// Binding tier; lower binds looser.
    pub(crate) fn level(self) -> u8 {
        match self {
            Operator::Logical(_) => 1,
            Operator::Comparison(_) => 2,
            Operator::Arithmetic(op) if op.is_multiplicative() => 4,
            Operator::Arithmetic(_) => 3,
        }
    }
}

/// An operator occurrence at parenthesis depth zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OperatorMatch {
    pub(crate) range: Range<usize>,
    pub(crate) op: Operator,
}

fn word_operator(word: &str) -> Option<Operator> {
    let op = match word.to_ascii_lowercase().as_str() {
        "and" => Operator::Logical(LogicalOperator::And),
        "or" => Operator::Logical(LogicalOperator::Or),
        "nand" => Operator::Logical(LogicalOperator::Nand),
        "nor" => Operator::Logical(LogicalOperator::Nor),
        "xor" => Operator::Logical(LogicalOperator::Xor),
        "xnor" => Operator::Logical(LogicalOperator::Xnor),
        "mod" => Operator::Arithmetic(ArithmeticOperator::Mod),
        "rem" => Operator::Arithmetic(ArithmeticOperator::Rem),
        _ => return None,
    };
    Some(op)
}

/// End of a numeric token starting at `i`, including a fraction and an
/// exponent, so the sign of `1.0e-3` is not read as an operator.
fn number_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.') {
        let exponent = matches!(bytes[i], b'e' | b'E');
        i += 1;
        if exponent
            && matches!(bytes.get(i), Some(b'+' | b'-'))
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
        {
            i += 1;
        }
    }
    i
}

/// Finds every binary operator outside parentheses and literals.
///
/// A `+` or `-` that does not follow an operand is a sign and is not reported.
/// `=>` and `:=` are skipped. Returns `None` for unbalanced parentheses or
/// operators outside the supported set such as `**`.
pub(crate) fn top_level_operators(text: &str) -> Option<Vec<OperatorMatch>> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut depth = 0usize;
    let mut operand = false;
    let mut i = 0;
    while i < bytes.len() {
        let b = match scan::lexeme_at(bytes, i) {
            Lexeme::Comment(len) => {
                i += len;
                continue;
            }
            Lexeme::Literal(len) => {
                operand = true;
                i += len;
                continue;
            }
            Lexeme::Code(b) => b,
        };
        if depth > 0 {
            match b {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    operand = depth == 0;
                }
                _ => {}
            }
            i += 1;
            continue;
        }
        let next = bytes.get(i + 1).copied();
        let (op, len) = match (b, next) {
            (b'(', _) => {
                depth += 1;
                i += 1;
                continue;
            }
            (b')', _) => return None,
            (b'0'..=b'9', _) => {
                operand = true;
                i = number_end(bytes, i);
                continue;
            }
            (c, _) if scan::is_ident_byte(c) => {
                let end = bytes[i..]
                    .iter()
                    .position(|&c| !scan::is_ident_byte(c))
                    .map_or(bytes.len(), |n| i + n);
                let word = &text[i..end];
                match word_operator(word) {
                    Some(op) => {
                        found.push(OperatorMatch { range: i..end, op });
                        operand = false;
                    }
                    None => operand = !word.eq_ignore_ascii_case("not"),
                }
                i = end;
                continue;
            }
            (b'=', Some(b'>')) | (b':', Some(b'=')) => {
                operand = false;
                i += 2;
                continue;
            }
            (b'*', Some(b'*')) => return None,
            (b'/', Some(b'=')) => (Operator::Comparison(ComparisonOperator::Ne), 2),
            (b'<', Some(b'=')) => (Operator::Comparison(ComparisonOperator::Le), 2),
            (b'>', Some(b'=')) => (Operator::Comparison(ComparisonOperator::Ge), 2),
            (b'<', _) => (Operator::Comparison(ComparisonOperator::Lt), 1),
            (b'>', _) => (Operator::Comparison(ComparisonOperator::Gt), 1),
            (b'=', _) => (Operator::Comparison(ComparisonOperator::Eq), 1),
            (b'*', _) => (Operator::Arithmetic(ArithmeticOperator::Mul), 1),
            (b'/', _) => (Operator::Arithmetic(ArithmeticOperator::Div), 1),
            (b'&', _) => (Operator::Arithmetic(ArithmeticOperator::Concat), 1),
            (b'+', _) if operand => (Operator::Arithmetic(ArithmeticOperator::Add), 1),
            (b'-', _) if operand => (Operator::Arithmetic(ArithmeticOperator::Sub), 1),
            _ => {
                i += 1;
                continue;
            }
        };
        found.push(OperatorMatch { range: i..i + len, op });
        operand = false;
        i += len;
    }
    (depth == 0).then_some(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(text: &str) -> Vec<&str> {
        top_level_operators(text)
            .unwrap()
            .into_iter()
            .map(|m| &text[m.range])
            .collect()
    }

    #[test]
    fn finds_symbolic_and_word_operators() {
        assert_eq!(ops("a + b * c"), vec!["+", "*"]);
        assert_eq!(ops("a and b or c"), vec!["and", "or"]);
        assert_eq!(ops("x mod 4 /= 0"), vec!["mod", "/="]);
        assert_eq!(ops("a <= b"), vec!["<="]);
    }

    #[test]
    fn skips_nested_and_literals() {
        assert_eq!(ops("f(a + b) & \"+-\""), vec!["&"]);
        assert_eq!(ops("(a - b) + c"), vec!["+"]);
        assert_eq!(ops("x = '-'"), vec!["="]);
    }

    #[test]
    fn unary_signs_are_not_operators() {
        assert_eq!(ops("-1"), Vec::<&str>::new());
        assert_eq!(ops("a * -1"), vec!["*"]);
        assert_eq!(ops("not a - b"), vec!["-"]);
    }

    #[test]
    fn exponent_signs_belong_to_number() {
        assert_eq!(ops("1.0e-3 + x"), vec!["+"]);
        assert_eq!(ops("x - 1"), vec!["-"]);
    }

    #[test]
    fn attribute_tick_is_not_literal() {
        assert_eq!(ops("clk'event and clk = '1'"), vec!["and", "="]);
    }

    #[test]
    fn rejects_unbalanced_and_power() {
        assert!(top_level_operators("(a + b").is_none());
        assert!(top_level_operators("a) + b").is_none());
        assert!(top_level_operators("a ** 2").is_none());
    }

    #[test]
    fn levels() {
        assert!(Operator::Logical(LogicalOperator::Or).level() < Operator::Comparison(ComparisonOperator::Eq).level());
        assert!(Operator::Arithmetic(ArithmeticOperator::Add).level() < Operator::Arithmetic(ArithmeticOperator::Mul).level());
    }
}
