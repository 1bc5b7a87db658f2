//! Leaf literal productions: scalar, numeric and vector literals.
//!
//! Character literals are exactly `'c'`. A bare `"…"` vector is scanned against
//! the bit alphabet first and against the logic alphabet only when some
//! character falls outside it. Numbers are tried as integers before reals, and
//! a real needs a decimal point.

use crate::limits::{self, LITERAL_MAX_LEN};
use crate::scan;
use crate::types::{RangedType, SignalType, VectorIndex};
use crate::VhdlNode;
use vesta_common::{BitLiteral, LogicLiteral};

// ============================================================================
// Digits
// ============================================================================

/// One hexadecimal digit of an `x"…"` literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct HexDigit(u8);

impl HexDigit {
    /// Parses a digit, accepting either letter case.
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(16).map(|v| Self(v as u8))
    }

    /// The digit value, `0..=15`.
    pub fn value(self) -> u8 {
        self.0
    }

    /// The digit as written, uppercase for letters.
    pub fn as_char(self) -> char {
        char::from_digit(u32::from(self.0), 16)
            .map_or('0', |c| c.to_ascii_uppercase())
    }
}

impl TryFrom<char> for HexDigit {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or_else(|| format!("'{c}' is not a hexadecimal digit"))
    }
}

impl From<HexDigit> for char {
    fn from(digit: HexDigit) -> Self {
        digit.as_char()
    }
}

/// One octal digit of an `o"…"` literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct OctalDigit(u8);

impl OctalDigit {
    /// Parses a digit in `0..=7`.
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(8).map(|v| Self(v as u8))
    }

    /// The digit value, `0..=7`.
    pub fn value(self) -> u8 {
        self.0
    }

    /// The digit as written.
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<char> for OctalDigit {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or_else(|| format!("'{c}' is not an octal digit"))
    }
}

impl From<OctalDigit> for char {
    fn from(digit: OctalDigit) -> Self {
        digit.as_char()
    }
}

// ============================================================================
// Vectors
// ============================================================================

/// One `choice => value` element of an aggregate literal.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndexedElement {
    /// The positions being assigned.
    pub index: VectorIndex,
    /// The value assigned to them.
    pub value: SignalLiteral,
}

/// A vector-valued literal.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum VectorLiteral {
    /// `"0101"` or `b"0101"`.
    Bits(Vec<BitLiteral>),
    /// `"01ZX"`: at least one non-bit character.
    Logics(Vec<LogicLiteral>),
    /// `x"AB"`.
    Hexadecimal(Vec<HexDigit>),
    /// `o"17"`.
    Octal(Vec<OctalDigit>),
    /// `(0 => '1', others => '0')`.
    Indexed(Vec<IndexedElement>),
}

impl VectorLiteral {
    /// Number of bits the literal denotes, when it is fixed by the literal.
    pub fn size(&self) -> Option<usize> {
        match self {
            VectorLiteral::Bits(bits) => Some(bits.len()),
            VectorLiteral::Logics(values) => Some(values.len()),
            VectorLiteral::Hexadecimal(digits) => Some(digits.len() * 4),
            VectorLiteral::Octal(digits) => Some(digits.len() * 3),
            VectorLiteral::Indexed(_) => None,
        }
    }

    /// Returns `true` if every element is a two-state bit.
    pub fn is_bits_only(&self) -> bool {
        match self {
            VectorLiteral::Logics(_) => false,
            VectorLiteral::Indexed(elements) => elements
                .iter()
                .all(|e| matches!(e.value, SignalLiteral::Bit(_))),
            _ => true,
        }
    }
}

/// Contents of a string-like literal with its `""` escapes resolved, or `None`
/// if `text` is not exactly one quoted string.
fn quoted(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '"' {
            if chars.next() != Some('"') {
                return None;
            }
        } else if c == '\n' {
            return None;
        }
        out.push(c);
    }
    Some(out)
}

/// Digits of a bit-string literal; single underscores may separate digits.
fn digits(body: &str) -> Option<Vec<char>> {
    if body.starts_with('_') || body.ends_with('_') || body.contains("__") {
        return None;
    }
    Some(body.chars().filter(|&c| c != '_').collect())
}

fn parse_indexed(text: &str) -> Option<Vec<IndexedElement>> {
    if scan::balanced_span(text, '(', ')')? != (0..text.len()) {
        return None;
    }
    let inner = &text[1..text.len() - 1];
    scan::find_top_level(inner, "=>")?;
    scan::split_top_level(inner, b',')
        .into_iter()
        .map(|element| {
            let arrow = scan::find_top_level(element, "=>")?;
            Some(IndexedElement {
                index: VectorIndex::parse(&element[..arrow])?,
                value: SignalLiteral::parse(&element[arrow + 2..])?,
            })
        })
        .collect()
}

impl VhdlNode for VectorLiteral {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, LITERAL_MAX_LEN) {
            return None;
        }
        if text.starts_with('(') {
            return parse_indexed(text).map(VectorLiteral::Indexed);
        }
        let (prefix, body) = match text.find('"')? {
            0 => (None, text),
            1 => (text.chars().next().map(|c| c.to_ascii_lowercase()), &text[1..]),
            _ => return None,
        };
        let body = quoted(body)?;
        match prefix {
            Some('x') => digits(&body)?
                .into_iter()
                .map(HexDigit::from_char)
                .collect::<Option<_>>()
                .map(VectorLiteral::Hexadecimal),
            Some('o') => digits(&body)?
                .into_iter()
                .map(OctalDigit::from_char)
                .collect::<Option<_>>()
                .map(VectorLiteral::Octal),
            Some('b') => digits(&body)?
                .into_iter()
                .map(BitLiteral::from_char)
                .collect::<Option<_>>()
                .map(VectorLiteral::Bits),
            Some(_) => None,
            None => {
                let bits: Option<Vec<_>> = body.chars().map(BitLiteral::from_char).collect();
                match bits {
                    Some(bits) => Some(VectorLiteral::Bits(bits)),
                    None => body
                        .chars()
                        .map(LogicLiteral::from_char)
                        .collect::<Option<_>>()
                        .map(VectorLiteral::Logics),
                }
            }
        }
    }

    fn serialize(&self) -> String {
        match self {
            VectorLiteral::Bits(bits) => {
                format!("\"{}\"", bits.iter().map(|b| b.as_char()).collect::<String>())
            }
            VectorLiteral::Logics(values) => {
                format!("\"{}\"", values.iter().map(|v| v.as_char()).collect::<String>())
            }
            VectorLiteral::Hexadecimal(digits) => {
                format!("x\"{}\"", digits.iter().map(|d| d.as_char()).collect::<String>())
            }
            VectorLiteral::Octal(digits) => {
                format!("o\"{}\"", digits.iter().map(|d| d.as_char()).collect::<String>())
            }
            VectorLiteral::Indexed(elements) => {
                let parts: Vec<String> = elements
                    .iter()
                    .map(|e| format!("{} => {}", e.index.serialize(), e.value.serialize()))
                    .collect();
                format!("({})", parts.join(", "))
            }
        }
    }
}

// ============================================================================
// Scalars
// ============================================================================

/// Any literal value that may appear in an expression or as a default.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SignalLiteral {
    /// `'0'` or `'1'`.
    Bit(BitLiteral),
    /// `true` or `false`.
    Boolean(bool),
    /// A real number such as `0.5` or `1.0e3`.
    Decimal(f64),
    /// An integer such as `42`, `-3` or `1_000`.
    Integer(i64),
    /// A nine-state value other than `'0'`/`'1'`, such as `'Z'`.
    Logic(LogicLiteral),
    /// A vector literal.
    Vector(VectorLiteral),
}

fn char_literal(text: &str) -> Option<char> {
    let mut chars = text.strip_prefix('\'')?.strip_suffix('\'')?.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

/// A run of digits with single underscores between them.
fn digit_group(text: &str) -> Option<String> {
    let valid = !text.is_empty()
        && text.chars().all(|c| c.is_ascii_digit() || c == '_')
        && text.starts_with(|c: char| c.is_ascii_digit())
        && text.ends_with(|c: char| c.is_ascii_digit())
        && !text.contains("__");
    valid.then(|| text.replace('_', ""))
}

fn parse_integer(text: &str) -> Option<i64> {
    let (negative, magnitude) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let digits = digit_group(magnitude)?;
    let signed = if negative { format!("-{digits}") } else { digits };
    signed.parse().ok()
}

fn parse_decimal(text: &str) -> Option<f64> {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        Some(at) => (&rest[..at], Some(&rest[at + 1..])),
        None => (rest, None),
    };
    let (whole, fraction) = mantissa.split_once('.')?;
    let mut normalized = format!("{sign}{}.{}", digit_group(whole)?, digit_group(fraction)?);
    if let Some(exponent) = exponent {
        let (exp_sign, exp_digits) = match exponent.strip_prefix(['+', '-']) {
            Some(digits) => (&exponent[..1], digits),
            None => ("", exponent),
        };
        normalized.push_str(&format!("e{exp_sign}{}", digit_group(exp_digits)?));
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

fn integer_bounds(range: &crate::types::VectorSize) -> Option<(i64, i64)> {
    Some((range.low().as_integer()?, range.high().as_integer()?))
}

impl SignalLiteral {
    /// Checks that this literal may be assigned to a value of type `ty`.
    pub fn is_valid_for(&self, ty: &SignalType) -> bool {
        match (self, ty) {
            (SignalLiteral::Bit(_), SignalType::Bit | SignalType::StdLogic | SignalType::StdULogic) => {
                true
            }
            (SignalLiteral::Logic(_), SignalType::StdLogic | SignalType::StdULogic) => true,
            (SignalLiteral::Boolean(_), SignalType::Boolean) => true,
            (SignalLiteral::Decimal(_), SignalType::Real) => true,
            (SignalLiteral::Integer(_), SignalType::Integer) => true,
            (SignalLiteral::Integer(n), SignalType::Natural) => *n >= 0,
            (SignalLiteral::Integer(n), SignalType::Positive) => *n > 0,
            (SignalLiteral::Integer(n), SignalType::Ranged(RangedType::Integer(range))) => {
                integer_bounds(range).map_or(true, |(low, high)| low <= *n && *n <= high)
            }
            (SignalLiteral::Vector(vector), SignalType::Ranged(ranged)) => {
                let Some(range) = ranged.vector_range() else {
                    return false;
                };
                if matches!(ranged, RangedType::BitVector(_)) && !vector.is_bits_only() {
                    return false;
                }
                match (vector.size(), range.size()) {
                    (Some(actual), Some(expected)) => actual == expected,
                    _ => true,
                }
            }
            _ => false,
        }
    }
}

impl VhdlNode for SignalLiteral {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, LITERAL_MAX_LEN) || text.is_empty() {
            return None;
        }
        if let Some(c) = char_literal(text) {
            return BitLiteral::from_char(c)
                .map(SignalLiteral::Bit)
                .or_else(|| LogicLiteral::from_char(c).map(SignalLiteral::Logic));
        }
        if text.eq_ignore_ascii_case("true") {
            return Some(SignalLiteral::Boolean(true));
        }
        if text.eq_ignore_ascii_case("false") {
            return Some(SignalLiteral::Boolean(false));
        }
        if let Some(n) = parse_integer(text) {
            return Some(SignalLiteral::Integer(n));
        }
        if text.contains('.') {
            return parse_decimal(text).map(SignalLiteral::Decimal);
        }
        VectorLiteral::parse(text).map(SignalLiteral::Vector)
    }

    fn serialize(&self) -> String {
        match self {
            SignalLiteral::Bit(bit) => format!("'{bit}'"),
            SignalLiteral::Boolean(value) => value.to_string(),
            SignalLiteral::Decimal(value) => format_decimal(*value),
            SignalLiteral::Integer(value) => value.to_string(),
            SignalLiteral::Logic(value) => format!("'{value}'"),
            SignalLiteral::Vector(vector) => vector.serialize(),
        }
    }
}

crate::display_via_serialize!(VectorLiteral, SignalLiteral);
