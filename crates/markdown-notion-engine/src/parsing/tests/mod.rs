//! Tests for the parsing module.
//!
//! Fixtures (.md) live in `fixtures/`; their expected block outlines are
//! inline snapshots.


use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::{
    models::{Block, DEFAULT_CODE_LANGUAGE, HeadingLevel, Span},
    parsing::{markdown_to_blocks, parse_document},
};

use outline::outline;

// Fixture-based snapshot tests

#[test]
fn fixture_mixed_note() {
    let doc = parse_document(include_str!("fixtures/mixed_note.md"));
    assert_snapshot!(outline(&doc.blocks), @r#"
    L0 heading_1 plain("Spanish Verbs")
    L2 paragraph plain("Notes on ") bold("ser") plain(" vs ") code("estar") plain(".")
    L4 heading_2 plain("Conjugation")
    L6 table width=3 header=true
      row plain("Person") | plain("ser") | plain("estar")
      row plain("yo") | plain("soy") | plain("estoy")
      row plain("tú") | plain("eres") | (empty)
    L11 bulleted_list_item plain("Use ") bold("ser") plain(" for identity")
    L12 bulleted_list_item plain("Use estar for ") link("state", "https://example.com/estar")
    L13 numbered_list_item plain("First rule")
    L14 numbered_list_item plain("Second rule")
    L16 quote plain("Quote with ") equation("x^2") plain(" math")
    L18 code[python] "def f():\n    return 1"
    L23 equation "a^2 + b^2 = c^2"
    L27 equation "E = mc^2"
    L28 heading_3 plain("Deep heading")
    "#);
}

#[test]
fn fixture_unterminated_fence() {
    let doc = parse_document(include_str!("fixtures/unterminated_fence.md"));
    assert_snapshot!(outline(&doc.blocks), @r#"
    L0 paragraph plain("Intro paragraph")
    L1 table width=2 header=true
      row plain("a") | plain("b")
    L2 code[js] "let x = 1;"
    "#);
}

#[test]
fn fixture_adjacent_constructs() {
    let doc = parse_document(include_str!("fixtures/adjacent_constructs.md"));
    assert_snapshot!(outline(&doc.blocks), @r#"
    L0 table width=2 header=true
      row plain("k") | plain("v")
      row plain("1") | plain("2")
    L3 equation "x"
    L6 table width=1 header=true
      row plain("only")
    L7 code[plain text] "| not a table |\n$$ not math $$"
    L11 paragraph plain("after")
    "#);
}

// Scenario tests

#[test]
fn heading_with_bold() {
    assert_eq!(
        markdown_to_blocks("## Hello **World**"),
        vec![Block::heading(
            HeadingLevel::H2,
            vec![Span::plain("Hello "), Span::bold("World")]
        )]
    );
}

#[test]
fn unterminated_code_fence_flushes_at_end() {
    assert_eq!(
        markdown_to_blocks("```python\nprint(1)"),
        vec![Block::Code {
            text: "print(1)".into(),
            language: "python".into(),
        }]
    );
}

#[test]
fn unterminated_math_fence_flushes_at_end() {
    assert_eq!(
        markdown_to_blocks("$$\na = b\nc = d"),
        vec![Block::equation("a = b\nc = d")]
    );
}

#[test]
fn empty_unterminated_fence_emits_nothing() {
    assert!(markdown_to_blocks("text\n```").len() == 1);
    assert!(markdown_to_blocks("$$").is_empty());
}

#[test]
fn code_without_language_uses_default() {
    assert_eq!(
        markdown_to_blocks("```\nx\n```"),
        vec![Block::Code {
            text: "x".into(),
            language: DEFAULT_CODE_LANGUAGE.into(),
        }]
    );
}

#[test]
fn code_lines_are_kept_verbatim() {
    let blocks = markdown_to_blocks("```\n  # not a heading  \n- not a list\n```");
    assert_eq!(
        blocks,
        vec![Block::code("  # not a heading  \n- not a list", "")]
    );
}

#[test]
fn single_line_math_inside_math_fence_closes_it_and_is_kept() {
    assert_eq!(
        markdown_to_blocks("$$\nx\n$$ y $$\nafter"),
        vec![
            Block::equation("x"),
            Block::equation("y"),
            Block::Paragraph {
                spans: vec![Span::plain("after")]
            },
        ]
    );
}

#[test]
fn single_line_math_after_table_rows_flushes_table_first() {
    let doc = parse_document("| a | b |\n$$ x $$\nafter");
    let order: Vec<_> = doc
        .blocks
        .iter()
        .map(|n| (n.line, n.block.type_name()))
        .collect();
    assert_eq!(order, vec![(0, "table"), (1, "equation"), (2, "paragraph")]);
}

#[test]
fn math_fence_text_after_opener_is_dropped() {
    assert_eq!(
        markdown_to_blocks("$$ \\begin{aligned}\nx &= 1\n$$"),
        vec![Block::equation("x &= 1")]
    );
}

#[test]
fn windows_line_endings() {
    assert_eq!(
        markdown_to_blocks("# Title\r\n```\r\ncode\r\n```\r\n"),
        vec![
            Block::heading(HeadingLevel::H1, vec![Span::plain("Title")]),
            Block::code("code", ""),
        ]
    );
}

#[test]
fn separator_only_table_emits_nothing() {
    assert!(markdown_to_blocks("|---|---|\ntext").len() == 1);
}

#[test]
fn blank_line_splits_tables() {
    let blocks = markdown_to_blocks("| a |\n\n| b |");
    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|b| matches!(b, Block::Table(_))));
}

#[rstest]
#[case("- item", "bulleted_list_item")]
#[case("* item", "bulleted_list_item")]
#[case("7. item", "numbered_list_item")]
#[case("> item", "quote")]
#[case("# item", "heading_1")]
#[case("### item", "heading_3")]
#[case("##### item", "paragraph")]
#[case("-item", "paragraph")]
fn prefix_classification(#[case] line: &str, #[case] type_name: &str) {
    let blocks = markdown_to_blocks(line);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].type_name(), type_name);
}

// Invariant tests

/// Emitted blocks follow the source order of their first line.
#[test]
fn order_preservation() {
    for md in [
        include_str!("fixtures/mixed_note.md"),
        include_str!("fixtures/adjacent_constructs.md"),
        include_str!("fixtures/unterminated_fence.md"),
    ] {
        let doc = parse_document(md);
        assert!(
            doc.blocks.windows(2).all(|w| w[0].line < w[1].line),
            "blocks out of order: {:?}",
            doc.blocks.iter().map(|b| b.line).collect::<Vec<_>>()
        );
    }
}

/// Tables emitted by the parser always have rows of exactly `width` cells.
#[test]
fn table_width_invariant() {
    let md = "| a |\n| b | c | d |\n|--|\n| e | f |";
    let blocks = markdown_to_blocks(md);
    let Block::Table(table) = &blocks[0] else {
        panic!("expected a table, got {blocks:?}");
    };
    assert_eq!(table.width(), 3);
    assert_eq!(table.rows().len(), 3);
    assert!(table.rows().iter().all(|r| r.cells.len() == table.width()));
}

/// Test empty document produces no blocks.
#[test]
fn empty_document() {
    assert!(parse_document("").blocks.is_empty());
}

/// Test blank lines don't produce blocks.
#[test]
fn blank_lines_only() {
    assert!(parse_document("\n  \n\t\n").blocks.is_empty());
}
