//! Block-level conversion: headings, paragraphs, lists, tables, separators.

use crate::common::*;
use docmd::ir::nodes::{Element, ParagraphHeading, TextStyle};
use docmd::{convert_document, convert_elements, ConvertOptions, TocMode};
use insta::assert_snapshot;

fn to_markdown(children: Vec<Element>) -> String {
    convert_document(&doc(children), &ConvertOptions::default()).markdown
}

#[test]
fn test_heading_with_bold_text() {
    let md = to_markdown(vec![Element::Paragraph(
        docmd::ir::nodes::Paragraph::heading(
            ParagraphHeading::Heading2,
            vec![styled(vec![("Hi", TextStyle::bold())])],
        ),
    )]);
    assert_eq!(md, "## **Hi**");
}

#[test]
fn test_title_levels_collapse_to_h1() {
    let md = to_markdown(vec![
        heading(ParagraphHeading::Title, "Title"),
        heading(ParagraphHeading::Subtitle, "Subtitle"),
        heading(ParagraphHeading::Heading5, "Deep"),
    ]);
    assert_eq!(md, "# Title\n\n# Subtitle\n\n##### Deep");
}

#[test]
fn test_nested_bullet_list() {
    let md = to_markdown(vec![bullet("l", 0, "A"), bullet("l", 1, "B")]);
    assert_eq!(md, "* A\n * B");
}

#[test]
fn test_empty_paragraph_is_a_single_blank_line() {
    let md = to_markdown(vec![
        heading(ParagraphHeading::Heading1, "A"),
        para_of(vec![]),
        heading(ParagraphHeading::Heading1, "B"),
    ]);
    let lines: Vec<&str> = md.lines().collect();
    assert_eq!(lines, vec!["# A", "", "# B"]);
}

#[test]
fn test_whitespace_only_paragraphs_collapse() {
    let md = to_markdown(vec![para("one"), para("   "), para(""), para("two")]);
    assert_eq!(md, "one\n\ntwo");
}

#[test]
fn test_table_is_four_lines() {
    let md = to_markdown(vec![table(&[
        &["Name", "Qty"],
        &["Apples", "3"],
        &["Pears", "5"],
    ])]);
    let lines: Vec<&str> = md.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "| Name | Qty |");
    assert_eq!(lines[1], "| --- | --- |");
    assert_eq!(lines[2], "| Apples | 3 |");
    assert_eq!(lines[3], "| Pears | 5 |");
}

#[test]
fn test_table_is_separated_from_paragraphs() {
    let md = to_markdown(vec![para("before"), table(&[&["h"], &["v"]]), para("after")]);
    assert_eq!(md, "before\n\n| h |\n| --- |\n| v |\n\nafter");
}

#[test]
fn test_distinct_list_identities_restart_numbering() {
    let md = to_markdown(vec![
        numbered("a", 0, "x"),
        para("break"),
        numbered("b", 0, "y"),
    ]);
    assert_eq!(md, "1. x\n\nbreak\n\n1. y");
}

#[test]
fn test_same_list_resumes_numbering_after_interruption() {
    let md = to_markdown(vec![numbered("a", 0, "x"), para("mid"), numbered("a", 0, "y")]);
    assert_eq!(md, "1. x\n\nmid\n\n2. y");
}

#[test]
fn test_numbering_ignores_interleaved_bullets() {
    let md = to_markdown(vec![
        numbered("a", 0, "one"),
        bullet("b", 0, "dot"),
        numbered("a", 0, "two"),
        numbered("a", 1, "sub"),
        numbered("a", 0, "three"),
    ]);
    assert_eq!(md, "1. one\n* dot\n2. two\n 1. sub\n3. three");
}

#[test]
fn test_horizontal_rule_stands_alone() {
    let md = to_markdown(vec![
        para("above"),
        para_of(vec![Element::HorizontalRule]),
        para("below"),
    ]);
    assert_eq!(md, "above\n\n---\n\nbelow");
}

#[test]
fn test_table_of_contents_modes() {
    let children = vec![Element::TableOfContents, para("Body")];
    let omitted = convert_document(&doc(children.clone()), &ConvertOptions::default());
    assert_eq!(omitted.markdown, "Body");

    let options = ConvertOptions::default().with_table_of_contents(TocMode::Placeholder);
    let placeholder = convert_document(&doc(children), &options);
    assert_eq!(placeholder.markdown, "[[TOC]]\n\nBody");
    assert!(placeholder.warnings.is_empty());
}

#[test]
fn test_footnotes_are_numbered_in_reference_order() {
    let md = to_markdown(vec![
        para_of(vec![
            Element::text("First"),
            footnote(vec![para("one")]),
            Element::text("and second"),
            footnote(vec![para("two"), para("more")]),
        ]),
        para("Closing."),
    ]);
    assert_eq!(
        md,
        "First[^1] and second[^2]\n\nClosing.\n\n[^1]: one\n[^2]: two\n    more"
    );
}

#[test]
fn test_selection_converts_only_given_elements() {
    let document = doc(vec![
        heading(ParagraphHeading::Heading1, "Skipped"),
        para("Kept"),
        bullet("l", 0, "Also skipped"),
        numbered("n", 0, "Kept item"),
    ]);
    let selection = [&document.body.children[1], &document.body.children[3]];
    let result = convert_elements(selection, &ConvertOptions::default());
    assert_eq!(result.markdown, "Kept\n\n1. Kept item");
}

#[test]
fn test_kitchensink() {
    let md = to_markdown(vec![
        heading(ParagraphHeading::Title, "Report"),
        para_of(vec![styled(vec![
            ("Sales ", TextStyle::default()),
            ("grew", TextStyle::bold()),
            (".", TextStyle::default()),
        ])]),
        bullet("l", 0, "First"),
        bullet("l", 1, "Nested"),
        numbered("n", 0, "Step"),
        table(&[&["Q", "Total"], &["1", "10"]]),
        para_of(vec![Element::HorizontalRule]),
        para_of(vec![
            Element::text("See note"),
            footnote(vec![para("Source: audit.")]),
        ]),
    ]);

    assert_snapshot!(md, @r"
    # Report

    Sales **grew**.

    * First
     * Nested
    1. Step

    | Q | Total |
    | --- | --- |
    | 1 | 10 |

    ---

    See note[^1]

    [^1]: Source: audit.
    ");
}

#[test]
fn test_whitespace_only_lines_inside_text_stay_blank() {
    let md = to_markdown(vec![para_of(vec![Element::text("a\n\n \n\nb")])]);
    assert_eq!(md, "a\n\nb");
}
