//! Concurrent statement regions.

use super::{nest, split_label, ComponentInstantiation, ProcessBlock};
use crate::comment::Comment;
use crate::expr::{DirectReference, Expression};
use crate::limits::{self, BLOCK_MAX_LEN, STATEMENT_MAX_LEN};
use crate::scan::{self, Piece};
use crate::types::VectorSize;
use crate::VhdlNode;
use vesta_common::Ident;

/// A conditional value chain: `a when c1 else b when c2 else d`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum WhenBlock {
    /// The final unconditional value.
    Value(Expression),
    /// `value when condition else otherwise`
    When {
        /// Value chosen when the condition holds.
        value: Expression,
        /// Tested condition.
        condition: Expression,
        /// The rest of the chain.
        otherwise: Box<WhenBlock>,
    },
}

impl VhdlNode for WhenBlock {
    fn parse(text: &str) -> Option<Self> {
        let text = scan::without_comments(text);
        let text = text.trim();
        if !limits::within(text, STATEMENT_MAX_LEN) {
            return None;
        }
        let mut keywords: Vec<(usize, bool)> = scan::top_level_matches(text, "when")
            .into_iter()
            .map(|at| (at, true))
            .chain(scan::top_level_matches(text, "else").into_iter().map(|at| (at, false)))
            .collect();
        keywords.sort_unstable();
        // Keywords must alternate when, else, when, else ...
        if keywords.len() % 2 != 0
            || keywords
                .iter()
                .enumerate()
                .any(|(i, &(_, is_when))| is_when != (i % 2 == 0))
        {
            return None;
        }
        let mut segments = Vec::with_capacity(keywords.len() + 1);
        let mut start = 0;
        for &(at, is_when) in &keywords {
            segments.push(&text[start..at]);
            start = at + if is_when { "when".len() } else { "else".len() };
        }
        segments.push(&text[start..]);

        let (last, pairs) = segments.split_last()?;
        let mut block = WhenBlock::Value(Expression::parse(last)?);
        for pair in pairs.chunks(2).rev() {
            let [value, condition] = pair else {
                return None;
            };
            block = WhenBlock::When {
                value: Expression::parse(value)?,
                condition: Expression::parse(condition)?,
                otherwise: Box::new(block),
            };
        }
        Some(block)
    }

    fn serialize(&self) -> String {
        let mut out = String::new();
        let mut current = self;
        loop {
            match current {
                WhenBlock::Value(value) => {
                    out.push_str(&value.serialize());
                    return out;
                }
                WhenBlock::When {
                    value,
                    condition,
                    otherwise,
                } => {
                    out.push_str(&format!(
                        "{} when {} else ",
                        value.serialize(),
                        condition.serialize()
                    ));
                    current = otherwise;
                }
            }
        }
    }
}

/// The right-hand side of a concurrent assignment.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AsynchronousValue {
    /// A plain expression.
    Expression(Expression),
    /// A conditional chain.
    When(WhenBlock),
}

impl VhdlNode for AsynchronousValue {
    fn parse(text: &str) -> Option<Self> {
        match WhenBlock::parse(text)? {
            WhenBlock::Value(value) => Some(AsynchronousValue::Expression(value)),
            chain => Some(AsynchronousValue::When(chain)),
        }
    }

    fn serialize(&self) -> String {
        match self {
            AsynchronousValue::Expression(value) => value.serialize(),
            AsynchronousValue::When(chain) => chain.serialize(),
        }
    }
}

/// A simple concurrent statement.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AsynchronousStatement {
    /// `target <= value;`
    Assignment {
        /// Driven signal.
        target: DirectReference,
        /// Driving value.
        value: AsynchronousValue,
    },
    /// A comment line.
    Comment(Comment),
}

impl VhdlNode for AsynchronousStatement {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, STATEMENT_MAX_LEN) {
            return None;
        }
        if let Some(comment) = Comment::parse(text) {
            return Some(AsynchronousStatement::Comment(comment));
        }
        let code = scan::without_comments(text);
        if scan::construct_end(&code)? != code.len() {
            return None;
        }
        let body = code.strip_suffix(';')?;
        let at = scan::find_top_level(body, "<=")?;
        Some(AsynchronousStatement::Assignment {
            target: DirectReference::parse(&body[..at])?,
            value: AsynchronousValue::parse(&body[at + 2..])?,
        })
    }

    fn serialize(&self) -> String {
        match self {
            AsynchronousStatement::Assignment { target, value } => {
                format!("{} <= {};", target.serialize(), value.serialize())
            }
            AsynchronousStatement::Comment(comment) => comment.serialize(),
        }
    }
}

/// `label: for i in range generate ... end generate [label];`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ForGenerate {
    /// Required generate label.
    pub label: Ident,
    /// Generate parameter.
    pub iterator: Ident,
    /// Iterated range.
    pub range: VectorSize,
    /// Replicated concurrent statements.
    pub body: Box<AsynchronousBlock>,
}

impl VhdlNode for ForGenerate {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) || scan::construct_end(text)? != text.len() {
            return None;
        }
        let _guard = limits::enter()?;
        let (label, rest) = split_label(text)?;
        let rest = scan::strip_word_prefix(rest, "for")?;
        let inner = scan::strip_end_clause(rest, &["generate"], true, Some(label.as_str()))?;
        let within = scan::find_top_level(inner, "in")?;
        let header_end = scan::find_top_level(inner, "generate")?;
        if header_end < within {
            return None;
        }
        let body = &inner[header_end + "generate".len()..];
        let body = scan::strip_word_prefix(body, "begin").unwrap_or(body);
        Some(ForGenerate {
            iterator: Ident::new(inner[..within].trim())?,
            range: VectorSize::parse(&inner[within + "in".len()..header_end])?,
            body: Box::new(AsynchronousBlock::parse(body)?),
            label,
        })
    }

    fn serialize(&self) -> String {
        format!(
            "{}: for {} in {} generate{}\nend generate {};",
            self.label,
            self.iterator,
            self.range.serialize(),
            nest(&self.body.serialize()),
            self.label
        )
    }
}

/// A region of concurrent code.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AsynchronousBlock {
    /// A simple statement.
    Statement(AsynchronousStatement),
    /// A process.
    Process(ProcessBlock),
    /// An instance.
    Component(ComponentInstantiation),
    /// A generate loop.
    Generate(ForGenerate),
    /// Zero or several elements in order.
    Blocks(Vec<AsynchronousBlock>),
}

impl AsynchronousBlock {
    /// The elements of the region, in order.
    pub fn elements(&self) -> &[AsynchronousBlock] {
        match self {
            AsynchronousBlock::Blocks(blocks) => blocks,
            single => std::slice::from_ref(single),
        }
    }
}

fn parse_concurrent(text: &str) -> Option<AsynchronousBlock> {
    match split_label(text) {
        Some((_, rest)) if scan::starts_with_word(rest, "process") => {
            ProcessBlock::parse(text).map(AsynchronousBlock::Process)
        }
        Some((_, rest)) if scan::starts_with_word(rest, "for") => {
            ForGenerate::parse(text).map(AsynchronousBlock::Generate)
        }
        Some(_) => ComponentInstantiation::parse(text).map(AsynchronousBlock::Component),
        None if scan::starts_with_word(text, "process") => {
            ProcessBlock::parse(text).map(AsynchronousBlock::Process)
        }
        None => AsynchronousStatement::parse(text).map(AsynchronousBlock::Statement),
    }
}

impl VhdlNode for AsynchronousBlock {
    fn parse(text: &str) -> Option<Self> {
        if !limits::within(text, BLOCK_MAX_LEN) {
            return None;
        }
        let _guard = limits::enter()?;
        let mut blocks = Vec::new();
        for piece in scan::split_pieces(text)? {
            match piece {
                Piece::Comment(comment) => blocks.push(AsynchronousBlock::Statement(
                    AsynchronousStatement::Comment(Comment::new(comment)?),
                )),
                Piece::Code { text, trailer } => {
                    blocks.push(parse_concurrent(text)?);
                    if let Some(trailer) = trailer {
                        blocks.push(AsynchronousBlock::Statement(AsynchronousStatement::Comment(
                            Comment::new(trailer)?,
                        )));
                    }
                }
            }
        }
        if blocks.len() == 1 {
            return blocks.pop();
        }
        Some(AsynchronousBlock::Blocks(blocks))
    }

    fn serialize(&self) -> String {
        match self {
            AsynchronousBlock::Statement(statement) => statement.serialize(),
            AsynchronousBlock::Process(process) => process.serialize(),
            AsynchronousBlock::Component(instance) => instance.serialize(),
            AsynchronousBlock::Generate(generate) => generate.serialize(),
            AsynchronousBlock::Blocks(blocks) => blocks
                .iter()
                .map(VhdlNode::serialize)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

crate::display_via_serialize!(
    WhenBlock,
    AsynchronousValue,
    AsynchronousStatement,
    ForGenerate,
    AsynchronousBlock
);
