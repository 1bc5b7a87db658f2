//! Property-based tests for the scanning helpers and parser totality.

use proptest::prelude::*;
use std::path::PathBuf;
use vesta_common::{BitLiteral, Ident};
use vesta_diagnostics::DiagnosticSink;
use vesta_source::{FileId, SourceFile};
use vesta_vhdl::scan::{balanced_span, strip_comments};
use vesta_vhdl::{
    parse_source, ArithmeticOperator, AssignmentKind, BinaryOperation, BooleanExpression,
    ComparisonOperator, ConditionalExpression, DirectReference, EdgeKind, Expression, IfBlock,
    LogicalOperator, SignalLiteral, Statement, SynchronousBlock, VhdlFile, VhdlNode,
};

/// Balanced parenthesized groups with identifier text between them.
fn balanced() -> impl Strategy<Value = String> {
    let leaf = "[a-z ]{0,4}".prop_map(|s| format!("({s})"));
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec(inner, 1..4).prop_map(|groups| format!("({})", groups.join(" ")))
    })
}

/// Source-like text assembled from VHDL fragments.
fn token_soup() -> impl Strategy<Value = String> {
    let fragment = prop::sample::select(vec![
        "entity", "architecture", "package", "body", "is", "of", "begin", "end", "process",
        "if", "then", "elsif", "else", "case", "when", "others", "=>", "for", "in", "loop",
        "generate", "port", "generic", "map", "signal", "constant", "variable", "function",
        "return", "type", "record", "library", "use", "(", ")", ";", ":", ",", "<=", ":=",
        "a", "b", "clk", "'1'", "\"0101\"", "x\"F\"", "7", "downto", "to", "--", "\n",
    ]);
    prop::collection::vec(fragment, 0..40).prop_map(|parts| parts.join(" "))
}

fn name() -> impl Strategy<Value = Ident> {
    prop::sample::select(vec!["a", "b", "q", "sel", "count", "din_r"])
        .prop_filter_map("reserved word", Ident::new)
}

fn atom() -> BoxedStrategy<Expression> {
    prop_oneof![
        name().prop_map(Expression::from),
        (0i64..1000).prop_map(|n| Expression::Literal(SignalLiteral::Integer(n))),
        any::<bool>().prop_map(|high| {
            let bit = if high { BitLiteral::High } else { BitLiteral::Low };
            Expression::Literal(SignalLiteral::Bit(bit))
        }),
        name().prop_map(|clk| {
            Expression::Conditional(ConditionalExpression::Edge {
                kind: EdgeKind::Rising,
                signal: DirectReference::Variable(clk),
            })
        }),
    ]
    .boxed()
}

/// Expression trees in the shape the parser produces: every operand of a
/// binary operation or `not` is a leaf or a parenthesized group.
fn expression() -> BoxedStrategy<Expression> {
    atom()
        .prop_recursive(4, 24, 2, |inner| {
            let operand = prop_oneof![atom(), inner.prop_map(Expression::parenthesized)].boxed();
            let arithmetic = prop::sample::select(vec![
                ArithmeticOperator::Add,
                ArithmeticOperator::Sub,
                ArithmeticOperator::Concat,
                ArithmeticOperator::Mul,
                ArithmeticOperator::Div,
                ArithmeticOperator::Mod,
                ArithmeticOperator::Rem,
            ]);
            let comparison = prop::sample::select(vec![
                ComparisonOperator::Eq,
                ComparisonOperator::Ne,
                ComparisonOperator::Lt,
                ComparisonOperator::Le,
                ComparisonOperator::Gt,
                ComparisonOperator::Ge,
            ]);
            let logical = prop::sample::select(vec![
                LogicalOperator::And,
                LogicalOperator::Or,
                LogicalOperator::Nand,
                LogicalOperator::Nor,
                LogicalOperator::Xor,
                LogicalOperator::Xnor,
            ]);
            prop_oneof![
                (operand.clone(), arithmetic, operand.clone()).prop_map(|(lhs, op, rhs)| {
                    Expression::Binary(BinaryOperation::new(lhs, op, rhs))
                }),
                (operand.clone(), comparison, operand.clone()).prop_map(|(lhs, op, rhs)| {
                    Expression::Conditional(ConditionalExpression::Comparison {
                        lhs: Box::new(lhs),
                        op,
                        rhs: Box::new(rhs),
                    })
                }),
                (operand.clone(), logical, operand.clone()).prop_map(|(lhs, op, rhs)| {
                    Expression::Logical(BooleanExpression::Binary {
                        lhs: Box::new(lhs),
                        op,
                        rhs: Box::new(rhs),
                    })
                }),
                operand.prop_map(|e| Expression::Logical(BooleanExpression::Not(Box::new(e)))),
            ]
        })
        .boxed()
}

/// A region of one element is that element; otherwise a list.
fn region(mut elements: Vec<SynchronousBlock>) -> SynchronousBlock {
    if elements.len() == 1 {
        elements.remove(0)
    } else {
        SynchronousBlock::Blocks(elements)
    }
}

/// Single sequential elements: assignments, `null` and nested `if`s.
fn sequential() -> BoxedStrategy<SynchronousBlock> {
    let kind = prop::sample::select(vec![AssignmentKind::Signal, AssignmentKind::Variable]);
    let statement = prop_oneof![
        4 => (name(), kind, expression()).prop_map(|(target, kind, value)| {
            SynchronousBlock::Statement(Statement::Assignment {
                target: DirectReference::Variable(target),
                kind,
                value,
            })
        }),
        1 => Just(SynchronousBlock::Statement(Statement::Null)),
    ];
    statement
        .prop_recursive(3, 16, 3, |inner| {
            let body = prop::collection::vec(inner, 1..4).prop_map(region).boxed();
            prop_oneof![
                (expression(), body.clone()).prop_map(|(condition, then)| {
                    SynchronousBlock::IfBlock(IfBlock::new(condition, then))
                }),
                (expression(), body.clone(), body).prop_map(|(condition, then, otherwise)| {
                    SynchronousBlock::IfBlock(IfBlock::new(condition, then).with_else(otherwise))
                }),
            ]
        })
        .boxed()
}

proptest! {
    #[test]
    fn strip_comments_is_idempotent(text in "[a-z0-9 '\"();<=\\-\n]{0,80}") {
        let once = strip_comments(&text);
        prop_assert_eq!(strip_comments(&once), once.clone());
        prop_assert!(!once.contains("\n\n"));
    }

    #[test]
    fn balanced_span_covers_outer_group(prefix in "[a-z ]{0,6}", group in balanced(), suffix in "[a-z ]{0,6}") {
        let text = format!("{prefix}{group}{suffix}");
        let span = balanced_span(&text, '(', ')').unwrap();
        prop_assert_eq!(span, prefix.len()..prefix.len() + group.len());
    }

    #[test]
    fn unbalanced_groups_are_rejected(group in balanced()) {
        let text = &group[..group.len() - 1];
        prop_assert!(balanced_span(text, '(', ')').is_none());
    }

    #[test]
    fn file_parsing_never_panics(text in token_soup()) {
        let parsed = VhdlFile::parse(&text);
        let file = SourceFile::new(FileId::from_raw(0), PathBuf::from("soup.vhd"), text);
        let sink = DiagnosticSink::new();
        let reported = parse_source(&file, &sink);
        prop_assert_eq!(reported.is_some(), parsed.is_some());
        if let Some(parsed) = parsed {
            prop_assert_eq!(VhdlFile::parse(&parsed.serialize()), Some(parsed));
        }
    }

    #[test]
    fn expressions_roundtrip(expr in expression()) {
        let text = expr.serialize();
        prop_assert_eq!(Expression::parse(&text), Some(expr), "text: {}", text);
    }

    #[test]
    fn sequential_regions_roundtrip(elements in prop::collection::vec(sequential(), 1..4)) {
        let block = region(elements);
        let text = block.serialize();
        prop_assert_eq!(SynchronousBlock::parse(&text), Some(block), "text: {}", text);
    }

    #[test]
    fn arbitrary_text_never_panics(text in any::<String>()) {
        let parsed = VhdlFile::parse(&text);
        let _ = Expression::parse(&text);
        let _ = SynchronousBlock::parse(&text);
        let once = strip_comments(&text);
        prop_assert_eq!(strip_comments(&once), once.clone());
        let file = SourceFile::new(FileId::from_raw(0), PathBuf::from("any.vhd"), text);
        let sink = DiagnosticSink::new();
        prop_assert_eq!(parse_source(&file, &sink).is_some(), parsed.is_some());
    }

    #[test]
    fn multibyte_text_in_vhdl_never_panics(
        parts in prop::collection::vec(
            prop_oneof![
                token_soup(),
                "\\PC{0,6}",
                Just("\u{e9}".to_string()),
                Just("--\u{2013}\u{65e5}\n".to_string()),
            ],
            0..12,
        )
    ) {
        let text = parts.concat();
        if let Some(file) = VhdlFile::parse(&text) {
            prop_assert_eq!(VhdlFile::parse(&file.serialize()), Some(file));
        }
    }

    #[test]
    fn integers_roundtrip(n in 0i64..i64::from(i32::MAX)) {
        let text = n.to_string();
        let expr = Expression::parse(&text).unwrap();
        prop_assert_eq!(expr.as_integer(), Some(n));
        prop_assert_eq!(expr.serialize(), text);
    }

    #[test]
    fn names_roundtrip(name in "[a-z][a-z0-9]{0,8}") {
        prop_assume!(Ident::new(&name).is_some());
        let expr = Expression::parse(&name).unwrap();
        prop_assert_eq!(expr.serialize(), name);
    }
}
