//! Process statements.

use super::{nest, parse_declarations, split_label, Statement, SynchronousBlock};
use crate::limits::{self, BLOCK_MAX_LEN};
use crate::scan;
use crate::VhdlNode;
use vesta_common::Ident;

/// `[label:] process[(sensitivity)] [is] declarations begin body end process [label];`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProcessBlock {
    /// Optional label, repeated after `end process`.
    pub label: Option<Ident>,
    /// Signals the process is sensitive to.
    pub sensitivity: Vec<Ident>,
    /// Variable, constant and comment lines before `begin`.
    pub declarations: Vec<Statement>,
    /// Sequential body.
    pub body: SynchronousBlock,
}

fn parse_sensitivity(inner: &str) -> Option<Vec<Ident>> {
    let names = scan::split_top_level(inner, b',')
        .into_iter()
        .map(|name| Ident::new(name.trim()))
        .collect::<Option<Vec<_>>>()?;
    let mut seen = std::collections::HashSet::new();
    names.iter().all(|name| seen.insert(name)).then_some(names)
}

impl VhdlNode for ProcessBlock {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) || scan::construct_end(text)? != text.len() {
            return None;
        }
        let _guard = limits::enter()?;
        let (label, rest) = match split_label(text) {
            Some((label, rest)) => (Some(label), rest),
            None => (None, text),
        };
        let rest = scan::strip_word_prefix(rest, "process")?;
        let rest = scan::strip_end_clause(rest, &["process"], true, label.as_ref().map(Ident::as_str))?;
        let (sensitivity, rest) = if rest.starts_with('(') {
            let span = scan::balanced_span(rest, '(', ')')?;
            (
                parse_sensitivity(&rest[1..span.end - 1])?,
                rest[span.end..].trim_start(),
            )
        } else {
            (Vec::new(), rest)
        };
        let rest = scan::strip_word_prefix(rest, "is").unwrap_or(rest);
        let (begin, _) = scan::find_clause(rest, &["begin"])?;
        Some(ProcessBlock {
            label,
            sensitivity,
            declarations: parse_declarations(&rest[..begin])?,
            body: SynchronousBlock::parse(&rest[begin + "begin".len()..])?,
        })
    }

    fn serialize(&self) -> String {
        let mut out = String::new();
        if let Some(label) = &self.label {
            out.push_str(&format!("{label}: "));
        }
        out.push_str("process");
        if !self.sensitivity.is_empty() {
            let names: Vec<&str> = self.sensitivity.iter().map(Ident::as_str).collect();
            out.push_str(&format!("({})", names.join(", ")));
        }
        let declarations: Vec<String> = self.declarations.iter().map(VhdlNode::serialize).collect();
        out.push_str(&nest(&declarations.join("\n")));
        out.push_str("\nbegin");
        out.push_str(&nest(&self.body.serialize()));
        out.push_str("\nend process");
        if let Some(label) = &self.label {
            out.push_str(&format!(" {label}"));
        }
        out.push(';');
        out
    }
}

crate::display_via_serialize!(ProcessBlock);

#[cfg(test)]
mod tests {
    use super::*;

    const CLOCKED: &str = "\
sync: process(clk, rst)
    variable n: natural := 0; -- ticks
begin
    if rst = '1' then
        n := 0;
    elsif rising_edge(clk) then
        n := n + 1;
    end if;
end process sync;";

    #[test]
    fn clocked_process_roundtrip() {
        let process = ProcessBlock::parse(CLOCKED).unwrap();
        assert_eq!(process.label.as_ref().unwrap().as_str(), "sync");
        assert_eq!(process.sensitivity.len(), 2);
        assert_eq!(process.declarations.len(), 1);
        assert!(matches!(process.body, SynchronousBlock::IfBlock(_)));
        assert_eq!(process.serialize(), CLOCKED);
    }

    #[test]
    fn unlabelled_with_is() {
        let text = "PROCESS (a) IS BEGIN y <= not a; END PROCESS;";
        let process = ProcessBlock::parse(text).unwrap();
        assert!(process.label.is_none());
        assert_eq!(process.serialize(), "process(a)\nbegin\n    y <= not a;\nend process;");
    }

    #[test]
    fn end_label_is_optional() {
        assert!(ProcessBlock::parse("p: process begin null; end process;").is_some());
        assert!(ProcessBlock::parse("p: process begin null; end process q;").is_none());
    }

    #[test]
    fn rejects_bad_headers() {
        assert!(ProcessBlock::parse("process(a, a) begin null; end process;").is_none());
        assert!(ProcessBlock::parse("process(a) null; end process;").is_none());
        assert!(ProcessBlock::parse("process(a) begin null; end;").is_none());
        assert!(ProcessBlock::parse("process(a) x <= 1; begin null; end process;").is_none());
    }
}
