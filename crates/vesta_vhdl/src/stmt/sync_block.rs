//! Sequential statement regions and their compound statements.

use super::{definition_with_trailer, nest, Statement};
use crate::comment::Comment;
use crate::expr::Expression;
use crate::limits::{self, BLOCK_MAX_LEN};
use crate::scan::{self, Piece};
use crate::types::VectorSize;
use crate::VhdlNode;
use vesta_common::Ident;

/// A region of sequential code.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SynchronousBlock {
    /// A single simple statement.
    Statement(Statement),
    /// An `if` statement.
    IfBlock(IfBlock),
    /// A `case` statement.
    Case(CaseStatement),
    /// A `for` loop.
    ForLoop(ForLoop),
    /// Zero or several elements in order.
    Blocks(Vec<SynchronousBlock>),
}

impl SynchronousBlock {
    /// The elements of the region, in order.
    pub fn elements(&self) -> &[SynchronousBlock] {
        match self {
            SynchronousBlock::Blocks(blocks) => blocks,
            single => std::slice::from_ref(single),
        }
    }

    fn from_elements(mut blocks: Vec<SynchronousBlock>) -> Self {
        if blocks.len() == 1 {
            blocks.remove(0)
        } else {
            SynchronousBlock::Blocks(blocks)
        }
    }
}

fn parse_construct(text: &str) -> Option<SynchronousBlock> {
    if scan::starts_with_word(text, "if") {
        IfBlock::parse(text).map(SynchronousBlock::IfBlock)
    } else if scan::starts_with_word(text, "case") {
        CaseStatement::parse(text).map(SynchronousBlock::Case)
    } else if scan::starts_with_word(text, "for") {
        ForLoop::parse(text).map(SynchronousBlock::ForLoop)
    } else {
        Statement::parse(text).map(SynchronousBlock::Statement)
    }
}

impl VhdlNode for SynchronousBlock {
    fn parse(text: &str) -> Option<Self> {
        if !limits::within(text, BLOCK_MAX_LEN) {
            return None;
        }
        let _guard = limits::enter()?;
        let mut blocks = Vec::new();
        for piece in scan::split_pieces(text)? {
            match piece {
                Piece::Comment(comment) => {
                    blocks.push(SynchronousBlock::Statement(Statement::Comment(Comment::new(
                        comment,
                    )?)));
                }
                Piece::Code { text, trailer } => {
                    let block = match definition_with_trailer(text, trailer) {
                        Some(definition) => {
                            blocks.push(SynchronousBlock::Statement(Statement::Definition(
                                definition,
                            )));
                            continue;
                        }
                        None => parse_construct(text)?,
                    };
                    blocks.push(block);
                    if let Some(trailer) = trailer {
                        blocks.push(SynchronousBlock::Statement(Statement::Comment(
                            Comment::new(trailer)?,
                        )));
                    }
                }
            }
        }
        Some(SynchronousBlock::from_elements(blocks))
    }

    fn serialize(&self) -> String {
        match self {
            SynchronousBlock::Statement(statement) => statement.serialize(),
            SynchronousBlock::IfBlock(block) => block.serialize(),
            SynchronousBlock::Case(case) => case.serialize(),
            SynchronousBlock::ForLoop(each) => each.serialize(),
            SynchronousBlock::Blocks(blocks) => blocks
                .iter()
                .map(VhdlNode::serialize)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

// ============================================================================
// if
// ============================================================================

/// `if condition then ... [elsif ... | else ...] end if;`
///
/// An `elsif` is an `otherwise` branch holding exactly one nested [`IfBlock`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IfBlock {
    /// Tested condition.
    pub condition: Expression,
    /// Statements run when the condition holds.
    pub body: Box<SynchronousBlock>,
    /// Statements run otherwise.
    pub otherwise: Option<Box<SynchronousBlock>>,
}

impl IfBlock {
    /// An `if` without an alternative.
    pub fn new(condition: Expression, body: SynchronousBlock) -> Self {
        Self {
            condition,
            body: Box::new(body),
            otherwise: None,
        }
    }

    /// Adds an `else` branch.
    pub fn with_else(mut self, otherwise: SynchronousBlock) -> Self {
        self.otherwise = Some(Box::new(otherwise));
        self
    }

    /// Returns the nested statement when the alternative is an `elsif`.
    pub fn elsif(&self) -> Option<&IfBlock> {
        match self.otherwise.as_deref() {
            Some(SynchronousBlock::IfBlock(nested)) => Some(nested),
            _ => None,
        }
    }
}

impl VhdlNode for IfBlock {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) || scan::construct_end(text)? != text.len() {
            return None;
        }
        let _guard = limits::enter()?;
        let rest = scan::strip_word_prefix(text, "if")?;
        let inner = scan::strip_end_clause(rest, &["if"], true, None)?;
        let then = scan::find_top_level(inner, "then")?;
        let condition = Expression::parse(&inner[..then])?;
        let branches = &inner[then + "then".len()..];
        let block = match scan::find_clause(branches, &["elsif", "else"]) {
            None => IfBlock::new(condition, SynchronousBlock::parse(branches)?),
            Some((at, 0)) => {
                let nested = format!("if {} end if;", &branches[at + "elsif".len()..]);
                IfBlock::new(condition, SynchronousBlock::parse(&branches[..at])?)
                    .with_else(SynchronousBlock::IfBlock(IfBlock::parse(&nested)?))
            }
            Some((at, _)) => IfBlock::new(condition, SynchronousBlock::parse(&branches[..at])?)
                .with_else(SynchronousBlock::parse(&branches[at + "else".len()..])?),
        };
        Some(block)
    }

    fn serialize(&self) -> String {
        let mut out = format!(
            "if {} then{}",
            self.condition.serialize(),
            nest(&self.body.serialize())
        );
        let mut current = self;
        while let Some(otherwise) = current.otherwise.as_deref() {
            match otherwise {
                SynchronousBlock::IfBlock(nested) => {
                    out.push_str(&format!(
                        "\nelsif {} then{}",
                        nested.condition.serialize(),
                        nest(&nested.body.serialize())
                    ));
                    current = nested;
                }
                other => {
                    out.push_str(&format!("\nelse{}", nest(&other.serialize())));
                    break;
                }
            }
        }
        out.push_str("\nend if;");
        out
    }
}

// ============================================================================
// case
// ============================================================================

/// A choice of a `case` branch.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum WhenCondition {
    /// A single value.
    Expression(Expression),
    /// A range of values.
    Range(VectorSize),
    /// Alternatives separated by `|`.
    Selection(Vec<WhenCondition>),
    /// `others`
    Others,
}

impl VhdlNode for WhenCondition {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let alternatives = scan::split_top_level(text, b'|');
        if alternatives.len() > 1 {
            return alternatives
                .into_iter()
                .map(|alternative| match WhenCondition::parse(alternative)? {
                    WhenCondition::Selection(_) | WhenCondition::Others => None,
                    single => Some(single),
                })
                .collect::<Option<_>>()
                .map(WhenCondition::Selection);
        }
        if text.eq_ignore_ascii_case("others") {
            return Some(WhenCondition::Others);
        }
        if let Some(range) = VectorSize::parse(text) {
            return Some(WhenCondition::Range(range));
        }
        Expression::parse(text).map(WhenCondition::Expression)
    }

    fn serialize(&self) -> String {
        match self {
            WhenCondition::Expression(value) => value.serialize(),
            WhenCondition::Range(range) => range.serialize(),
            WhenCondition::Selection(alternatives) => alternatives
                .iter()
                .map(VhdlNode::serialize)
                .collect::<Vec<_>>()
                .join(" | "),
            WhenCondition::Others => "others".to_string(),
        }
    }
}

/// `when choice => statements`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WhenCase {
    /// Selected values.
    pub condition: WhenCondition,
    /// Statements run for them.
    pub body: SynchronousBlock,
}

impl VhdlNode for WhenCase {
    fn parse(text: &str) -> Option<Self> {
        let rest = scan::strip_word_prefix(text, "when")?;
        let arrow = scan::find_top_level(rest, "=>")?;
        Some(WhenCase {
            condition: WhenCondition::parse(&rest[..arrow])?,
            body: SynchronousBlock::parse(&rest[arrow + 2..])?,
        })
    }

    fn serialize(&self) -> String {
        format!("when {} =>{}", self.condition.serialize(), nest(&self.body.serialize()))
    }
}

/// `case selector is when ... end case;`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaseStatement {
    /// Value being matched.
    pub selector: Expression,
    /// Branches in order.
    pub cases: Vec<WhenCase>,
}

impl VhdlNode for CaseStatement {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) || scan::construct_end(text)? != text.len() {
            return None;
        }
        let _guard = limits::enter()?;
        let rest = scan::strip_word_prefix(text, "case")?;
        let inner = scan::strip_end_clause(rest, &["case"], true, None)?;
        let is = scan::find_top_level(inner, "is")?;
        let selector = Expression::parse(&inner[..is])?;
        let mut branches = &inner[is + "is".len()..];
        let mut cases = Vec::new();
        let (start, _) = scan::find_clause(branches, &["when"])?;
        if !branches[..start].trim().is_empty() {
            return None;
        }
        branches = &branches[start..];
        loop {
            let after_keyword = "when".len();
            let arrow = after_keyword + scan::find_top_level(&branches[after_keyword..], "=>")?;
            let next = scan::find_clause(&branches[arrow + 2..], &["when"])
                .map(|(at, _)| arrow + 2 + at);
            let end = next.unwrap_or(branches.len());
            cases.push(WhenCase::parse(&branches[..end])?);
            match next {
                Some(at) => branches = &branches[at..],
                None => break,
            }
        }
        Some(CaseStatement { selector, cases })
    }

    fn serialize(&self) -> String {
        let cases: Vec<String> = self.cases.iter().map(VhdlNode::serialize).collect();
        format!(
            "case {} is{}\nend case;",
            self.selector.serialize(),
            nest(&cases.join("\n"))
        )
    }
}

// ============================================================================
// for
// ============================================================================

/// `for i in range loop ... end loop;`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ForLoop {
    /// Loop parameter.
    pub iterator: Ident,
    /// Iterated range.
    pub range: VectorSize,
    /// Loop body.
    pub body: Box<SynchronousBlock>,
}

impl VhdlNode for ForLoop {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !limits::within(text, BLOCK_MAX_LEN) || scan::construct_end(text)? != text.len() {
            return None;
        }
        let _guard = limits::enter()?;
        let rest = scan::strip_word_prefix(text, "for")?;
        let inner = scan::strip_end_clause(rest, &["loop"], true, None)?;
        let within = scan::find_top_level(inner, "in")?;
        let header_end = scan::find_top_level(inner, "loop")?;
        if header_end < within {
            return None;
        }
        Some(ForLoop {
            iterator: Ident::new(inner[..within].trim())?,
            range: VectorSize::parse(&inner[within + "in".len()..header_end])?,
            body: Box::new(SynchronousBlock::parse(&inner[header_end + "loop".len()..])?),
        })
    }

    fn serialize(&self) -> String {
        format!(
            "for {} in {} loop{}\nend loop;",
            self.iterator,
            self.range.serialize(),
            nest(&self.body.serialize())
        )
    }
}

crate::display_via_serialize!(SynchronousBlock, IfBlock, WhenCondition, WhenCase, CaseStatement, ForLoop);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_statement_block() {
        let text = "signal x: std_logic := '1'; signal y: std_logic := '0';";
        let block = SynchronousBlock::parse(text).unwrap();
        let SynchronousBlock::Blocks(elements) = &block else {
            panic!("expected list");
        };
        assert_eq!(elements.len(), 2);
        assert_eq!(
            block.serialize(),
            "signal x: std_logic := '1';\nsignal y: std_logic := '0';"
        );
    }

    #[test]
    fn single_element_is_the_block() {
        let block = SynchronousBlock::parse("  q <= d;  ").unwrap();
        assert!(matches!(block, SynchronousBlock::Statement(_)));
        assert_eq!(SynchronousBlock::parse(""), Some(SynchronousBlock::Blocks(vec![])));
    }

    #[test]
    fn elsif_is_nested_if() {
        let text = "if (a) then b <= c; elsif (d) then e <= f; end if;";
        let block = IfBlock::parse(text).unwrap();
        let nested = block.elsif().expect("elsif branch");
        assert!(nested.otherwise.is_none());
        assert_eq!(
            block.serialize(),
            "if (a) then\n    b <= c;\nelsif (d) then\n    e <= f;\nend if;"
        );
        assert_eq!(IfBlock::parse(&block.serialize()), Some(block));
    }

    #[test]
    fn else_branch_and_nesting() {
        let text = "if rst = '1' then\n  q <= '0';\nelse\n  if en = '1' then q <= d; end if;\nend if;";
        let block = IfBlock::parse(text).unwrap();
        // An else holding exactly one `if` is the same tree as elsif.
        assert!(block.elsif().is_some());
        let text = "if a then x := 1; else x := 2; y := 3; end if;";
        let block = IfBlock::parse(text).unwrap();
        assert!(matches!(block.otherwise.as_deref(), Some(SynchronousBlock::Blocks(b)) if b.len() == 2));
        assert_eq!(
            block.serialize(),
            "if a then\n    x := 1;\nelse\n    x := 2;\n    y := 3;\nend if;"
        );
    }

    #[test]
    fn elsif_chain_with_else() {
        let text = "if a then x := 1; elsif b then x := 2; elsif c then x := 3; else x := 4; end if;";
        let block = IfBlock::parse(text).unwrap();
        let serialized = block.serialize();
        assert_eq!(serialized.matches("elsif").count(), 2);
        assert!(serialized.contains("\nelse\n    x := 4;"));
        assert_eq!(IfBlock::parse(&serialized), Some(block));
    }

    #[test]
    fn if_requires_end_if() {
        assert!(IfBlock::parse("if a then b <= c;").is_none());
        assert!(IfBlock::parse("if a then b <= c; end;").is_none());
        assert!(IfBlock::parse("if a b <= c; end if;").is_none());
    }

    #[test]
    fn case_statement() {
        let text = "case state is\n  when IDLE => q <= '0';\n  when RUN | HOLD => q <= '1'; n := n + 1;\n  when others => null;\nend case;";
        let case = CaseStatement::parse(text).unwrap();
        assert_eq!(case.cases.len(), 3);
        assert!(matches!(case.cases[1].condition, WhenCondition::Selection(ref s) if s.len() == 2));
        assert_eq!(case.cases[2].condition, WhenCondition::Others);
        let serialized = case.serialize();
        assert!(serialized.ends_with("    when others =>\n        null;\nend case;"));
        assert_eq!(CaseStatement::parse(&serialized), Some(case));
    }

    #[test]
    fn nested_case_branches_stay_inside() {
        let text = "case a is when '0' => case b is when '0' => x := 1; when others => x := 2; end case; when others => null; end case;";
        let case = CaseStatement::parse(text).unwrap();
        assert_eq!(case.cases.len(), 2);
        assert!(matches!(case.cases[0].body, SynchronousBlock::Case(_)));
    }

    #[test]
    fn case_ranges() {
        let text = "case n is when 0 to 3 => x := 1; when others => x := 0; end case;";
        let case = CaseStatement::parse(text).unwrap();
        assert!(matches!(case.cases[0].condition, WhenCondition::Range(_)));
    }

    #[test]
    fn for_loop() {
        let text = "for i in 0 to 7 loop\n  v(i) := '0';\nend loop;";
        let each = ForLoop::parse(text).unwrap();
        assert_eq!(each.iterator.as_str(), "i");
        assert_eq!(each.serialize(), "for i in 0 to 7 loop\n    v(i) := '0';\nend loop;");
    }

    #[test]
    fn comments_are_kept_as_statements() {
        let text = "-- reset\nq <= '0'; -- clear\ncount := 0;";
        let block = SynchronousBlock::parse(text).unwrap();
        assert_eq!(block.elements().len(), 4);
        assert_eq!(block.serialize(), "-- reset\nq <= '0';\n-- clear\ncount := 0;");
        assert_eq!(SynchronousBlock::parse(&block.serialize()), Some(block));
    }

    #[test]
    fn deep_nesting_is_refused() {
        let depth = 200;
        let text = format!("{}x := 1;{}", "if a then ".repeat(depth), " end if;".repeat(depth));
        assert!(SynchronousBlock::parse(&text).is_none());
        let text = format!("{}x := 1;{}", "if a then ".repeat(10), " end if;".repeat(10));
        assert!(SynchronousBlock::parse(&text).is_some());
    }
}
