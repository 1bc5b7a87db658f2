//! Type marks, ranges and port modes.

use crate::expr::Expression;
use crate::limits::{self, EXPRESSION_MAX_LEN};
use crate::scan;
use crate::VhdlNode;
use vesta_common::Ident;

/// A discrete range: `low to high` or `high downto low`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum VectorSize {
    /// Ascending range.
    To {
        /// Left bound.
        lower: Box<Expression>,
        /// Right bound.
        upper: Box<Expression>,
    },
    /// Descending range.
    Downto {
        /// Left bound.
        upper: Box<Expression>,
        /// Right bound.
        lower: Box<Expression>,
    },
}

impl VectorSize {
    /// Ascending range `lower to upper`.
    pub fn to(lower: Expression, upper: Expression) -> Self {
        VectorSize::To {
            lower: Box::new(lower),
            upper: Box::new(upper),
        }
    }

    /// Descending range `upper downto lower`.
    pub fn downto(upper: Expression, lower: Expression) -> Self {
        VectorSize::Downto {
            upper: Box::new(upper),
            lower: Box::new(lower),
        }
    }

    /// The bound written as the low end of the range.
    pub fn low(&self) -> &Expression {
        match self {
            VectorSize::To { lower, .. } | VectorSize::Downto { lower, .. } => lower,
        }
    }

    /// The bound written as the high end of the range.
    pub fn high(&self) -> &Expression {
        match self {
            VectorSize::To { upper, .. } | VectorSize::Downto { upper, .. } => upper,
        }
    }

    /// Number of elements, when both bounds are integer literals.
    ///
    /// A null range such as `3 to 0` has size zero.
    pub fn size(&self) -> Option<usize> {
        let low = i128::from(self.low().as_integer()?);
        let high = i128::from(self.high().as_integer()?);
        usize::try_from((high - low + 1).max(0)).ok()
    }
}

impl VhdlNode for VectorSize {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, EXPRESSION_MAX_LEN) {
            return None;
        }
        let (keyword, descending) = match scan::top_level_matches(text, "downto").as_slice() {
            [at] => (*at..*at + "downto".len(), true),
            [] => match scan::top_level_matches(text, "to").as_slice() {
                [at] => (*at..*at + "to".len(), false),
                _ => return None,
            },
            _ => return None,
        };
        let left = Expression::parse(&text[..keyword.start])?;
        let right = Expression::parse(&text[keyword.end..])?;
        Some(if descending {
            VectorSize::downto(left, right)
        } else {
            VectorSize::to(left, right)
        })
    }

    fn serialize(&self) -> String {
        match self {
            VectorSize::To { lower, upper } => {
                format!("{} to {}", lower.serialize(), upper.serialize())
            }
            VectorSize::Downto { upper, lower } => {
                format!("{} downto {}", upper.serialize(), lower.serialize())
            }
        }
    }
}

/// A choice selecting part of a vector: one index, a range, or `others`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum VectorIndex {
    /// A single position.
    Index(Box<Expression>),
    /// A slice.
    Range(VectorSize),
    /// Every position not otherwise named.
    Others,
}

impl VhdlNode for VectorIndex {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("others") {
            return Some(VectorIndex::Others);
        }
        if let Some(range) = VectorSize::parse(text) {
            return Some(VectorIndex::Range(range));
        }
        Expression::parse(text).map(|e| VectorIndex::Index(Box::new(e)))
    }

    fn serialize(&self) -> String {
        match self {
            VectorIndex::Index(index) => index.serialize(),
            VectorIndex::Range(range) => range.serialize(),
            VectorIndex::Others => "others".to_string(),
        }
    }
}

/// A constrained array or integer subtype.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RangedType {
    /// `bit_vector(r)`.
    BitVector(VectorSize),
    /// `std_logic_vector(r)`.
    StdLogicVector(VectorSize),
    /// `std_ulogic_vector(r)`.
    StdULogicVector(VectorSize),
    /// `signed(r)`.
    Signed(VectorSize),
    /// `unsigned(r)`.
    Unsigned(VectorSize),
    /// `integer range r`.
    Integer(VectorSize),
}

const VECTOR_TYPES: &[(&str, fn(VectorSize) -> RangedType)] = &[
    ("bit_vector", RangedType::BitVector),
    ("std_logic_vector", RangedType::StdLogicVector),
    ("std_ulogic_vector", RangedType::StdULogicVector),
    ("signed", RangedType::Signed),
    ("unsigned", RangedType::Unsigned),
];

impl RangedType {
    /// The constraint range.
    pub fn range(&self) -> &VectorSize {
        match self {
            RangedType::BitVector(r)
            | RangedType::StdLogicVector(r)
            | RangedType::StdULogicVector(r)
            | RangedType::Signed(r)
            | RangedType::Unsigned(r)
            | RangedType::Integer(r) => r,
        }
    }

    /// The index range of an array type; `None` for a ranged integer.
    pub fn vector_range(&self) -> Option<&VectorSize> {
        match self {
            RangedType::Integer(_) => None,
            other => Some(other.range()),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            RangedType::BitVector(_) => "bit_vector",
            RangedType::StdLogicVector(_) => "std_logic_vector",
            RangedType::StdULogicVector(_) => "std_ulogic_vector",
            RangedType::Signed(_) => "signed",
            RangedType::Unsigned(_) => "unsigned",
            RangedType::Integer(_) => "integer",
        }
    }
}

/// A built-in scalar or array type.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SignalType {
    /// `bit`.
    Bit,
    /// `boolean`.
    Boolean,
    /// `integer`.
    Integer,
    /// `natural`.
    Natural,
    /// `positive`.
    Positive,
    /// `real`.
    Real,
    /// `std_logic`.
    StdLogic,
    /// `std_ulogic`.
    StdULogic,
    /// A constrained vector or integer.
    Ranged(RangedType),
}

const SCALAR_TYPES: &[(&str, SignalType)] = &[
    ("bit", SignalType::Bit),
    ("boolean", SignalType::Boolean),
    ("integer", SignalType::Integer),
    ("natural", SignalType::Natural),
    ("positive", SignalType::Positive),
    ("real", SignalType::Real),
    ("std_logic", SignalType::StdLogic),
    ("std_ulogic", SignalType::StdULogic),
];

impl VhdlNode for SignalType {
    fn parse(text: &str) -> Option<Self> {
        let text = scan::without_comments(text);
        let text = text.trim();
        if !limits::within(text, EXPRESSION_MAX_LEN) {
            return None;
        }
        if let Some((_, ty)) = SCALAR_TYPES.iter().find(|(name, _)| text.eq_ignore_ascii_case(name)) {
            return Some(ty.clone());
        }
        if let Some(rest) = scan::strip_word_prefix(text, "integer") {
            let range = scan::strip_word_prefix(rest, "range")?;
            return VectorSize::parse(range).map(|r| SignalType::Ranged(RangedType::Integer(r)));
        }
        let open = text.find('(')?;
        let name = text[..open].trim_end();
        let (_, build) = VECTOR_TYPES
            .iter()
            .find(|(candidate, _)| name.eq_ignore_ascii_case(candidate))?;
        let span = scan::balanced_span(text, '(', ')')?;
        if span.end != text.len() {
            return None;
        }
        let range = VectorSize::parse(&text[span.start + 1..span.end - 1])?;
        Some(SignalType::Ranged(build(range)))
    }

    fn serialize(&self) -> String {
        match self {
            SignalType::Ranged(RangedType::Integer(range)) => {
                format!("integer range {}", range.serialize())
            }
            SignalType::Ranged(ranged) => {
                format!("{}({})", ranged.type_name(), ranged.range().serialize())
            }
            scalar => SCALAR_TYPES
                .iter()
                .find(|(_, ty)| ty == scalar)
                .map_or_else(String::new, |(name, _)| (*name).to_string()),
        }
    }
}

/// The type of a declared object: a built-in type or a user-defined name.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Type {
    /// A built-in type.
    Signal(SignalType),
    /// A user-defined type referred to by name.
    Alias(Ident),
}

impl Type {
    /// The built-in type, if this is not a user-defined name.
    pub fn as_signal(&self) -> Option<&SignalType> {
        match self {
            Type::Signal(ty) => Some(ty),
            Type::Alias(_) => None,
        }
    }
}

impl VhdlNode for Type {
    fn parse(text: &str) -> Option<Self> {
        SignalType::parse(text)
            .map(Type::Signal)
            .or_else(|| Ident::new(text.trim()).map(Type::Alias))
    }

    fn serialize(&self) -> String {
        match self {
            Type::Signal(ty) => ty.serialize(),
            Type::Alias(name) => name.to_string(),
        }
    }
}

/// Direction of a port or subprogram parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Mode {
    /// `in`.
    In,
    /// `out`.
    Out,
    /// `inout`.
    InOut,
    /// `buffer`.
    Buffer,
    /// `linkage`.
    Linkage,
}

const MODES: &[(&str, Mode)] = &[
    ("in", Mode::In),
    ("out", Mode::Out),
    ("inout", Mode::InOut),
    ("buffer", Mode::Buffer),
    ("linkage", Mode::Linkage),
];

impl VhdlNode for Mode {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        MODES
            .iter()
            .find(|(name, _)| text.eq_ignore_ascii_case(name))
            .map(|(_, mode)| *mode)
    }

    fn serialize(&self) -> String {
        MODES
            .iter()
            .find(|(_, mode)| mode == self)
            .map_or_else(String::new, |(name, _)| (*name).to_string())
    }
}

crate::display_via_serialize!(VectorSize, VectorIndex, SignalType, Type, Mode);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges() {
        let down = VectorSize::parse("7 downto 0").unwrap();
        assert_eq!(down.size(), Some(8));
        assert_eq!(down.serialize(), "7 downto 0");
        let up = VectorSize::parse("0 TO 3").unwrap();
        assert_eq!(up.size(), Some(4));
        assert_eq!(up.serialize(), "0 to 3");
        assert_eq!(VectorSize::parse("3 to 0").unwrap().size(), Some(0));
    }

    #[test]
    fn symbolic_range_has_no_size() {
        let range = VectorSize::parse("WIDTH - 1 downto 0").unwrap();
        assert_eq!(range.size(), None);
        assert_eq!(range.serialize(), "WIDTH - 1 downto 0");
    }

    #[test]
    fn malformed_ranges() {
        assert!(VectorSize::parse("7 downto").is_none());
        assert!(VectorSize::parse("1 to 2 to 3").is_none());
        assert!(VectorSize::parse("7").is_none());
    }

    #[test]
    fn scalar_types() {
        assert_eq!(SignalType::parse("STD_LOGIC"), Some(SignalType::StdLogic));
        assert_eq!(SignalType::parse("natural").unwrap().serialize(), "natural");
        assert!(SignalType::parse("std_logics").is_none());
    }

    #[test]
    fn vector_types() {
        let ty = SignalType::parse("Std_Logic_Vector (7 downto 0)").unwrap();
        assert_eq!(ty.serialize(), "std_logic_vector(7 downto 0)");
        let ty = SignalType::parse("unsigned(WIDTH-1 downto 0)").unwrap();
        assert_eq!(ty.serialize(), "unsigned(WIDTH - 1 downto 0)");
        assert!(SignalType::parse("bit_vector(7 downto 0) x").is_none());
        assert!(SignalType::parse("foo(7 downto 0)").is_none());
    }

    #[test]
    fn ranged_integer() {
        let ty = SignalType::parse("integer range 0 to 255").unwrap();
        assert!(matches!(ty, SignalType::Ranged(RangedType::Integer(_))));
        assert_eq!(ty.serialize(), "integer range 0 to 255");
        assert!(SignalType::parse("integer 0 to 255").is_none());
    }

    #[test]
    fn named_types() {
        assert_eq!(Type::parse("bit"), Some(Type::Signal(SignalType::Bit)));
        let alias = Type::parse("state_t").unwrap();
        assert_eq!(alias, Type::Alias(Ident::new("STATE_T").unwrap()));
        assert_eq!(alias.serialize(), "state_t");
        assert!(Type::parse("signal").is_none());
    }

    #[test]
    fn modes() {
        assert_eq!(Mode::parse("INOUT"), Some(Mode::InOut));
        assert_eq!(Mode::Buffer.serialize(), "buffer");
        assert!(Mode::parse("input").is_none());
    }

    #[test]
    fn vector_index_order() {
        assert_eq!(VectorIndex::parse("others"), Some(VectorIndex::Others));
        assert!(matches!(VectorIndex::parse("3 downto 0"), Some(VectorIndex::Range(_))));
        assert!(matches!(VectorIndex::parse("i + 1"), Some(VectorIndex::Index(_))));
    }
}
