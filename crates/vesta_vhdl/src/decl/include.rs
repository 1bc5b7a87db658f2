//! Context clauses.

use crate::limits::{self, STATEMENT_MAX_LEN};
use crate::scan;
use crate::VhdlNode;
use vesta_common::Ident;

/// `library name;` or `use prefix.name[.all];`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Include {
    /// A library clause.
    Library(Ident),
    /// A use clause.
    Use {
        /// Selected name, library first.
        path: Vec<Ident>,
        /// Whether the clause ends in `.all`.
        all: bool,
    },
}

impl VhdlNode for Include {
    fn parse(text: &str) -> Option<Self> {
        let text = scan::without_comments(text);
        let text = text.trim();
        if !limits::within(text, STATEMENT_MAX_LEN) {
            return None;
        }
        let body = text.strip_suffix(';')?.trim_end();
        if let Some(name) = scan::strip_word_prefix(body, "library") {
            return Ident::new(name).map(Include::Library);
        }
        let selected = scan::strip_word_prefix(body, "use")?;
        let mut segments: Vec<&str> = selected.split('.').map(str::trim).collect();
        let all = segments.last().is_some_and(|s| s.eq_ignore_ascii_case("all"));
        if all {
            segments.pop();
        }
        let path = segments
            .into_iter()
            .map(Ident::new)
            .collect::<Option<Vec<_>>>()?;
        if path.len() < 2 && !(all && path.len() == 1) {
            return None;
        }
        Some(Include::Use { path, all })
    }

    fn serialize(&self) -> String {
        match self {
            Include::Library(name) => format!("library {name};"),
            Include::Use { path, all } => {
                let mut names: Vec<&str> = path.iter().map(Ident::as_str).collect();
                if *all {
                    names.push("all");
                }
                format!("use {};", names.join("."))
            }
        }
    }
}

crate::display_via_serialize!(Include);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_and_use() {
        assert_eq!(Include::parse("LIBRARY ieee;").unwrap().serialize(), "library ieee;");
        let include = Include::parse("use IEEE.std_logic_1164.ALL;").unwrap();
        assert!(matches!(&include, Include::Use { path, all: true } if path.len() == 2));
        assert_eq!(include.serialize(), "use IEEE.std_logic_1164.all;");
        assert_eq!(
            Include::parse("use work.pkg.max;").unwrap().serialize(),
            "use work.pkg.max;"
        );
    }

    #[test]
    fn rejects_malformed() {
        for text in ["library ieee", "use ieee;", "use .all;", "use a..b;", "library a, b;", "entity e;"] {
            assert!(Include::parse(text).is_none(), "{text}");
        }
    }
}
