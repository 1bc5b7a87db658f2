//! Function declarations and bodies.

use super::all_unique;
use crate::limits::{self, BLOCK_MAX_LEN, STATEMENT_MAX_LEN};
use crate::scan;
use crate::stmt::{nest, parse_declarations, Statement, SynchronousBlock};
use crate::types::{Mode, Type};
use crate::VhdlNode;
use vesta_common::Ident;

/// A function parameter: `[constant] name: [in] type`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: Ident,
    /// Parameter type.
    pub ty: Type,
}

impl VhdlNode for Parameter {
    fn parse(text: &str) -> Option<Self> {
        let text = scan::strip_word_prefix(text, "constant").unwrap_or(text);
        let (name, rest) = text.split_once(':')?;
        let rest = rest.trim_start();
        let rest = match scan::first_word(rest).and_then(Mode::parse) {
            Some(Mode::In) => scan::strip_word_prefix(rest, "in")?,
            Some(_) => return None,
            None => rest,
        };
        Some(Parameter {
            name: Ident::new(name.trim())?,
            ty: Type::parse(rest)?,
        })
    }

    fn serialize(&self) -> String {
        format!("{}: {}", self.name, self.ty.serialize())
    }
}

/// `function name[(parameters)] return type;`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FunctionDefinition {
    /// Function name.
    pub name: Ident,
    parameters: Vec<Parameter>,
    /// Result type.
    pub return_type: Type,
}

impl FunctionDefinition {
    /// Builds a signature; fails when two parameters share a name.
    pub fn new(name: Ident, parameters: Vec<Parameter>, return_type: Type) -> Option<Self> {
        all_unique(parameters.iter().map(|p| &p.name)).then_some(Self {
            name,
            parameters,
            return_type,
        })
    }

    /// Parameters in order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Parses the signature without its terminating `;` or `is`.
    fn parse_signature(text: &str) -> Option<Self> {
        let rest = scan::strip_word_prefix(text, "function")?;
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '(')
            .unwrap_or(rest.len());
        let name = Ident::new(&rest[..name_end])?;
        let mut rest = rest[name_end..].trim_start();
        let mut parameters = Vec::new();
        if rest.starts_with('(') {
            let span = scan::balanced_span(rest, '(', ')')?;
            parameters = scan::split_top_level(&rest[1..span.end - 1], b';')
                .into_iter()
                .map(Parameter::parse)
                .collect::<Option<Vec<_>>>()?;
            rest = &rest[span.end..];
        }
        let return_type = Type::parse(scan::strip_word_prefix(rest, "return")?)?;
        FunctionDefinition::new(name, parameters, return_type)
    }

    fn signature(&self) -> String {
        let mut out = format!("function {}", self.name);
        if !self.parameters.is_empty() {
            let parameters: Vec<String> = self.parameters.iter().map(VhdlNode::serialize).collect();
            out.push_str(&format!("({})", parameters.join("; ")));
        }
        out.push_str(&format!(" return {}", self.return_type.serialize()));
        out
    }
}

impl VhdlNode for FunctionDefinition {
    fn parse(text: &str) -> Option<Self> {
        let text = scan::without_comments(text);
        let text = text.trim();
        if !limits::within(text, STATEMENT_MAX_LEN) {
            return None;
        }
        FunctionDefinition::parse_signature(text.strip_suffix(';')?.trim_end())
    }

    fn serialize(&self) -> String {
        format!("{};", self.signature())
    }
}

/// `function ... return type is declarations begin body end function name;`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FunctionImplementation {
    /// Signature.
    pub definition: FunctionDefinition,
    /// Local declarations and comment lines.
    pub declarations: Vec<Statement>,
    /// Sequential body.
    pub body: SynchronousBlock,
}

impl VhdlNode for FunctionImplementation {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) || scan::construct_end(text)? != text.len() {
            return None;
        }
        let _guard = limits::enter()?;
        let is = scan::find_top_level(text, "is")?;
        let header = scan::without_comments(&text[..is]);
        let definition = FunctionDefinition::parse_signature(header.trim())?;
        let rest = scan::strip_end_clause(
            &text[is + "is".len()..],
            &["function"],
            false,
            Some(definition.name.as_str()),
        )?;
        let (begin, _) = scan::find_clause(rest, &["begin"])?;
        Some(FunctionImplementation {
            declarations: parse_declarations(&rest[..begin])?,
            body: SynchronousBlock::parse(&rest[begin + "begin".len()..])?,
            definition,
        })
    }

    fn serialize(&self) -> String {
        let declarations: Vec<String> = self.declarations.iter().map(VhdlNode::serialize).collect();
        format!(
            "{} is{}\nbegin{}\nend function {};",
            self.definition.signature(),
            nest(&declarations.join("\n")),
            nest(&self.body.serialize()),
            self.definition.name
        )
    }
}

crate::display_via_serialize!(Parameter, FunctionDefinition, FunctionImplementation);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration() {
        let f = FunctionDefinition::parse("function max(a : integer; constant b : in integer) return integer;").unwrap();
        assert_eq!(f.parameters().len(), 2);
        assert_eq!(f.serialize(), "function max(a: integer; b: integer) return integer;");
        let g = FunctionDefinition::parse("function zero return bit;").unwrap();
        assert_eq!(g.serialize(), "function zero return bit;");
        assert!(FunctionDefinition::parse("function f(a: bit; A: bit) return bit;").is_none());
        assert!(FunctionDefinition::parse("function f(a: out bit) return bit;").is_none());
        assert!(FunctionDefinition::parse("function f(a: bit);").is_none());
    }

    #[test]
    fn implementation_roundtrip() {
        let text = "\
function parity(v: std_logic_vector(7 downto 0)) return std_logic is
    variable p: std_logic := '0';
begin
    for i in 0 to 7 loop
        p := p xor v(i);
    end loop;
    return p;
end function parity;";
        let f = FunctionImplementation::parse(text).unwrap();
        assert_eq!(f.declarations.len(), 1);
        assert_eq!(f.body.elements().len(), 2);
        assert_eq!(f.serialize(), text);
    }

    #[test]
    fn implementation_end_forms() {
        for end in ["end;", "end parity;", "end function;", "END FUNCTION parity;"] {
            let text = format!("function parity return bit is begin return '0'; {end}");
            assert!(FunctionImplementation::parse(&text).is_some(), "{end}");
        }
        assert!(FunctionImplementation::parse("function f return bit is begin return '0'; end function g;").is_none());
        assert!(FunctionImplementation::parse("function f return bit is return '0'; end;").is_none());
    }
}
