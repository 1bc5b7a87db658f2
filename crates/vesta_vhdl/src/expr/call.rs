//! Function calls and type conversions.

use super::Expression;
use crate::scan;
use crate::VhdlNode;
use vesta_common::Ident;

/// Target of a type conversion or conversion function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CastType {
    /// `std_logic_vector(x)`
    StdLogicVector,
    /// `std_ulogic_vector(x)`
    StdULogicVector,
    /// `bit_vector(x)`
    BitVector,
    /// `signed(x)`
    Signed,
    /// `unsigned(x)`
    Unsigned,
    /// `integer(x)`
    Integer,
    /// `real(x)`
    Real,
    /// `to_integer(x)`
    ToInteger,
}

const CASTS: &[(&str, CastType)] = &[
    ("std_logic_vector", CastType::StdLogicVector),
    ("std_ulogic_vector", CastType::StdULogicVector),
    ("bit_vector", CastType::BitVector),
    ("signed", CastType::Signed),
    ("unsigned", CastType::Unsigned),
    ("integer", CastType::Integer),
    ("real", CastType::Real),
    ("to_integer", CastType::ToInteger),
];

impl CastType {
    /// Looks up a conversion by its name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        CASTS
            .iter()
            .find(|(candidate, _)| name.eq_ignore_ascii_case(candidate))
            .map(|(_, cast)| *cast)
    }

    /// The conversion name as written.
    pub fn name(self) -> &'static str {
        CASTS
            .iter()
            .find(|(_, cast)| *cast == self)
            .map_or("", |(name, _)| name)
    }
}

/// A single-argument type conversion.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CastOperation {
    /// Conversion applied.
    pub kind: CastType,
    /// Converted operand.
    pub value: Box<Expression>,
}

impl VhdlNode for CastOperation {
    fn parse(text: &str) -> Option<Self> {
        match Expression::parse(text)? {
            Expression::Cast(cast) => Some(cast),
            _ => None,
        }
    }

    fn serialize(&self) -> String {
        format!("{}({})", self.kind.name(), self.value.serialize())
    }
}

/// One actual parameter, positional or named.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Argument {
    /// Formal parameter name for `name => value` association.
    pub label: Option<Ident>,
    /// Actual value.
    pub value: Expression,
}

impl VhdlNode for Argument {
    fn parse(text: &str) -> Option<Self> {
        match scan::find_top_level(text, "=>") {
            Some(arrow) => Some(Argument {
                label: Some(Ident::new(text[..arrow].trim())?),
                value: Expression::parse(&text[arrow + 2..])?,
            }),
            None => Some(Argument {
                label: None,
                value: Expression::parse(text)?,
            }),
        }
    }

    fn serialize(&self) -> String {
        match &self.label {
            Some(label) => format!("{label} => {}", self.value.serialize()),
            None => self.value.serialize(),
        }
    }
}

/// A call to a named function.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FunctionCall {
    /// Called function.
    pub name: Ident,
    /// Arguments in call order; never empty.
    pub arguments: Vec<Argument>,
}

impl FunctionCall {
    /// Builds a call, rejecting an empty argument list.
    pub fn new(name: Ident, arguments: Vec<Argument>) -> Option<Self> {
        (!arguments.is_empty()).then_some(Self { name, arguments })
    }
}

impl VhdlNode for FunctionCall {
    fn parse(text: &str) -> Option<Self> {
        match Expression::parse(text)? {
            Expression::Call(call) => Some(call),
            _ => None,
        }
    }

    fn serialize(&self) -> String {
        let arguments: Vec<String> = self.arguments.iter().map(Argument::serialize).collect();
        format!("{}({})", self.name, arguments.join(", "))
    }
}

crate::display_via_serialize!(CastOperation, Argument, FunctionCall);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_names() {
        assert_eq!(CastType::from_name("To_Integer"), Some(CastType::ToInteger));
        assert_eq!(CastType::Unsigned.name(), "unsigned");
        assert_eq!(CastType::from_name("resize"), None);
    }

    #[test]
    fn cast_roundtrip() {
        let cast = CastOperation::parse("UNSIGNED(a + b)").unwrap();
        assert_eq!(cast.kind, CastType::Unsigned);
        assert_eq!(cast.serialize(), "unsigned(a + b)");
        assert!(CastOperation::parse("resize(a, 8)").is_none());
    }

    #[test]
    fn call_with_named_argument() {
        let call = FunctionCall::parse("resize(value, new_size => 8)").unwrap();
        assert_eq!(call.arguments.len(), 2);
        assert_eq!(call.arguments[1].label.as_ref().map(Ident::as_str), Some("new_size"));
        assert_eq!(call.serialize(), "resize(value, new_size => 8)");
    }

    #[test]
    fn empty_call_rejected() {
        assert!(FunctionCall::new(Ident::new("f").unwrap(), vec![]).is_none());
        assert!(FunctionCall::parse("f()").is_none());
    }
}
