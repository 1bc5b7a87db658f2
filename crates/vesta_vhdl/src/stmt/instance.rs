//! Component and entity instantiation.

use super::split_label;
use crate::expr::{DirectReference, Expression};
use crate::limits::{self, BLOCK_MAX_LEN};
use crate::scan::{self, INDENT};
use crate::VhdlNode;
use vesta_common::Ident;

/// The value bound to a formal in a map.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MapActual {
    /// A connected expression.
    Expression(Expression),
    /// `open`
    Open,
}

/// One association in a generic or port map: `formal => actual` or a
/// positional `actual`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VariableMap {
    /// Formal name, absent for positional association.
    pub formal: Option<DirectReference>,
    /// Connected value.
    pub actual: MapActual,
}

impl VhdlNode for VariableMap {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (formal, actual) = match scan::find_top_level(text, "=>") {
            Some(at) => (Some(DirectReference::parse(&text[..at])?), text[at + 2..].trim()),
            None => (None, text),
        };
        let actual = if actual.eq_ignore_ascii_case("open") {
            MapActual::Open
        } else {
            MapActual::Expression(Expression::parse(actual)?)
        };
        Some(VariableMap { formal, actual })
    }

    fn serialize(&self) -> String {
        let actual = match &self.actual {
            MapActual::Expression(value) => value.serialize(),
            MapActual::Open => "open".to_string(),
        };
        match &self.formal {
            Some(formal) => format!("{} => {actual}", formal.serialize()),
            None => actual,
        }
    }
}

/// What an instance instantiates.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum InstantiatedUnit {
    /// A declared component, with or without the `component` keyword.
    Component(Ident),
    /// `entity library.name[(architecture)]`
    Entity {
        /// Library holding the entity.
        library: Ident,
        /// Entity name.
        name: Ident,
        /// Selected architecture.
        architecture: Option<Ident>,
    },
}

impl VhdlNode for InstantiatedUnit {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(rest) = scan::strip_word_prefix(text, "entity") {
            let (selected, architecture) = match rest.find('(') {
                Some(open) => {
                    let inner = rest[open + 1..].trim_end().strip_suffix(')')?;
                    (&rest[..open], Some(Ident::new(inner.trim())?))
                }
                None => (rest, None),
            };
            let (library, name) = selected.split_once('.')?;
            return Some(InstantiatedUnit::Entity {
                library: Ident::new(library.trim())?,
                name: Ident::new(name.trim())?,
                architecture,
            });
        }
        let name = scan::strip_word_prefix(text, "component").unwrap_or(text);
        Ident::new(name).map(InstantiatedUnit::Component)
    }

    fn serialize(&self) -> String {
        match self {
            InstantiatedUnit::Component(name) => format!("component {name}"),
            InstantiatedUnit::Entity {
                library,
                name,
                architecture: Some(architecture),
            } => format!("entity {library}.{name}({architecture})"),
            InstantiatedUnit::Entity { library, name, .. } => format!("entity {library}.{name}"),
        }
    }
}

/// `label: unit [generic map (...)] [port map (...)];`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComponentInstantiation {
    /// Instance label.
    pub label: Ident,
    /// Instantiated unit.
    pub unit: InstantiatedUnit,
    /// Generic associations.
    pub generic_map: Vec<VariableMap>,
    /// Port associations.
    pub port_map: Vec<VariableMap>,
}

/// Strips `keyword map (...)` from the front of `text`, returning the
/// associations and the remainder.
fn take_map<'a>(text: &'a str, keyword: &str) -> Option<(Vec<VariableMap>, &'a str)> {
    let rest = scan::strip_sentence_prefix(text, &[keyword, "map"])?;
    if !rest.starts_with('(') {
        return None;
    }
    let span = scan::balanced_span(rest, '(', ')')?;
    let inner = &rest[span.start + 1..span.end - 1];
    let maps = scan::split_top_level(inner, b',')
        .into_iter()
        .map(VariableMap::parse)
        .collect::<Option<Vec<_>>>()?;
    if maps.is_empty() {
        return None;
    }
    Some((maps, rest[span.end..].trim_start()))
}

fn format_map(keyword: &str, maps: &[VariableMap]) -> String {
    let pad = INDENT.repeat(2);
    let lines: Vec<String> = maps.iter().map(|m| format!("{pad}{}", m.serialize())).collect();
    format!("\n{INDENT}{keyword} map (\n{}\n{INDENT})", lines.join(",\n"))
}

impl VhdlNode for ComponentInstantiation {
    fn parse(text: &str) -> Option<Self> {
        let text = scan::without_comments(text);
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) {
            return None;
        }
        let (label, rest) = split_label(text)?;
        let body = rest.strip_suffix(';')?.trim_end();
        let generic = scan::top_level_matches(body, "generic").into_iter();
        let port = scan::top_level_matches(body, "port").into_iter();
        let maps_start = generic.chain(port).min().unwrap_or(body.len());
        let unit = InstantiatedUnit::parse(&body[..maps_start])?;
        let mut rest = &body[maps_start..];
        let mut generic_map = Vec::new();
        let mut port_map = Vec::new();
        if let Some((maps, after)) = take_map(rest, "generic") {
            generic_map = maps;
            rest = after;
        }
        if let Some((maps, after)) = take_map(rest, "port") {
            port_map = maps;
            rest = after;
        }
        if !rest.is_empty() {
            return None;
        }
        Some(ComponentInstantiation {
            label,
            unit,
            generic_map,
            port_map,
        })
    }

    fn serialize(&self) -> String {
        let mut out = format!("{}: {}", self.label, self.unit.serialize());
        if !self.generic_map.is_empty() {
            out.push_str(&format_map("generic", &self.generic_map));
        }
        if !self.port_map.is_empty() {
            out.push_str(&format_map("port", &self.port_map));
        }
        out.push(';');
        out
    }
}

crate::display_via_serialize!(VariableMap, InstantiatedUnit, ComponentInstantiation);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_port_map() {
        let text = "u1 : counter port map (clk => clk, q => count(3 downto 0), carry => open);";
        let inst = ComponentInstantiation::parse(text).unwrap();
        assert_eq!(inst.label.as_str(), "u1");
        assert!(inst.generic_map.is_empty());
        assert_eq!(inst.port_map.len(), 3);
        assert_eq!(inst.port_map[2].actual, MapActual::Open);
        assert_eq!(
            inst.serialize(),
            "u1: component counter\n    port map (\n        clk => clk,\n        q => count(3 downto 0),\n        carry => open\n    );"
        );
        assert_eq!(ComponentInstantiation::parse(&inst.serialize()), Some(inst));
    }

    #[test]
    fn generic_and_positional() {
        let text = "fifo0: component fifo generic map (8, DEPTH => 16) port map (clk, rst, din, dout);";
        let inst = ComponentInstantiation::parse(text).unwrap();
        assert_eq!(inst.generic_map.len(), 2);
        assert!(inst.generic_map[0].formal.is_none());
        assert_eq!(inst.port_map.len(), 4);
        assert_eq!(ComponentInstantiation::parse(&inst.serialize()), Some(inst));
    }

    #[test]
    fn entity_instantiation() {
        let text = "u2: entity work.alu(rtl) port map (a => x, b => y);";
        let inst = ComponentInstantiation::parse(text).unwrap();
        assert!(matches!(
            &inst.unit,
            InstantiatedUnit::Entity { architecture: Some(arch), .. } if arch.as_str() == "rtl"
        ));
        assert!(inst.serialize().starts_with("u2: entity work.alu(rtl)\n    port map ("));
        let plain = ComponentInstantiation::parse("u3: entity work.alu;").unwrap();
        assert_eq!(plain.serialize(), "u3: entity work.alu;");
    }

    #[test]
    fn aggregate_actual_stays_whole() {
        let inst =
            ComponentInstantiation::parse("u: reg port map (d => (others => '0'), q => q);").unwrap();
        assert_eq!(inst.port_map.len(), 2);
    }

    #[test]
    fn rejects_malformed() {
        assert!(ComponentInstantiation::parse("counter port map (a => b);").is_none());
        assert!(ComponentInstantiation::parse("u1: counter port map (a => b)").is_none());
        assert!(ComponentInstantiation::parse("u1: counter port map ();").is_none());
        assert!(ComponentInstantiation::parse("u1: counter port map (a => b) extra;").is_none());
        assert!(ComponentInstantiation::parse("u1: port map (a => b);").is_none());
    }
}
