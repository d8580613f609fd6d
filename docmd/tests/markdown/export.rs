//! Export tests for the Markdown format
//!
//! These tests verify that converted documents are structurally valid GFM
//! by parsing the output with comrak and inspecting the resulting AST.

use crate::common::*;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options};
use docmd::format::Format;
use docmd::formats::markdown::MarkdownFormat;
use docmd::ir::nodes::{Document, Element, ParagraphHeading, TextStyle};
use docmd::ConvertOptions;
use std::collections::HashSet;

fn gfm_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.footnotes = true;
    options
}

/// Helper to convert a document to Markdown and parse it back with comrak
fn to_comrak_ast<'a>(
    document: &Document,
    format: &MarkdownFormat,
    arena: &'a Arena<AstNode<'a>>,
) -> &'a AstNode<'a> {
    let md = format.serialize(document).unwrap();
    parse_document(arena, &md, &gfm_options())
}

/// Helper to recursively collect node types from a comrak AST
fn collect_node_types<'a>(node: &'a AstNode<'a>, types: &mut HashSet<String>) {
    let type_name = match &node.data.borrow().value {
        NodeValue::Document => "Document",
        NodeValue::Paragraph => "Paragraph",
        NodeValue::Heading(_) => "Heading",
        NodeValue::List(_) => "List",
        NodeValue::Item(_) => "Item",
        NodeValue::Table(_) => "Table",
        NodeValue::TableRow(_) => "TableRow",
        NodeValue::ThematicBreak => "ThematicBreak",
        NodeValue::Strong => "Strong",
        NodeValue::Emph => "Emph",
        NodeValue::Strikethrough => "Strikethrough",
        NodeValue::Code(_) => "Code",
        NodeValue::Link(_) => "Link",
        NodeValue::Image(_) => "Image",
        NodeValue::FootnoteReference(_) => "FootnoteReference",
        NodeValue::FootnoteDefinition(_) => "FootnoteDefinition",
        _ => "Other",
    };
    types.insert(type_name.to_string());

    for child in node.children() {
        collect_node_types(child, &mut *types);
    }
}

fn node_types(document: &Document) -> HashSet<String> {
    let arena = Arena::new();
    let root = to_comrak_ast(document, &MarkdownFormat::default(), &arena);
    let mut types = HashSet::new();
    collect_node_types(root, &mut types);
    types
}

#[test]
fn test_heading_levels() {
    let document = doc(vec![
        heading(ParagraphHeading::Title, "Title"),
        heading(ParagraphHeading::Heading3, "Section"),
        para("Body text."),
    ]);

    let arena = Arena::new();
    let root = to_comrak_ast(&document, &MarkdownFormat::default(), &arena);

    let levels: Vec<u8> = root
        .children()
        .filter_map(|child| match &child.data.borrow().value {
            NodeValue::Heading(heading) => Some(heading.level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![1, 3]);

    let paragraphs = root
        .children()
        .filter(|child| matches!(child.data.borrow().value, NodeValue::Paragraph))
        .count();
    assert_eq!(paragraphs, 1, "Body text should not merge into a heading");
}

#[test]
fn test_inline_styles_parse_as_emphasis() {
    let document = doc(vec![para_of(vec![styled(vec![
        ("bold", TextStyle::bold()),
        (" ", TextStyle::default()),
        ("slanted", TextStyle::italic()),
        (" ", TextStyle::default()),
        (
            "gone",
            TextStyle {
                strikethrough: true,
                ..Default::default()
            },
        ),
        (" ", TextStyle::default()),
        ("code", TextStyle::font("Courier New")),
        (" ", TextStyle::default()),
        ("site", TextStyle::link("https://example.com")),
    ])])]);

    let types = node_types(&document);
    for expected in ["Strong", "Emph", "Strikethrough", "Code", "Link"] {
        assert!(types.contains(expected), "missing {expected} in {types:?}");
    }
}

#[test]
fn test_bold_italic_is_valid_markup() {
    let both = TextStyle {
        bold: true,
        italic: true,
        ..Default::default()
    };
    let document = doc(vec![para_of(vec![styled(vec![("both", both)])])]);

    let types = node_types(&document);
    assert!(types.contains("Strong"));
    assert!(types.contains("Emph"));
}

#[test]
fn test_nested_list_with_wider_indent() {
    // A single-space indent reads as siblings in CommonMark; two spaces nest
    // under a `* ` marker.
    let document = doc(vec![
        bullet("l", 0, "Parent"),
        bullet("l", 1, "Child"),
        bullet("l", 0, "Sibling"),
    ]);
    let format = MarkdownFormat::new(ConvertOptions::default().with_list_indent("  "));

    let arena = Arena::new();
    let root = to_comrak_ast(&document, &format, &arena);

    let lists: Vec<_> = root
        .children()
        .filter(|child| matches!(child.data.borrow().value, NodeValue::List(_)))
        .collect();
    assert_eq!(lists.len(), 1);

    let items: Vec<_> = lists[0].children().collect();
    assert_eq!(items.len(), 2);

    let nested = items[0]
        .children()
        .any(|child| matches!(child.data.borrow().value, NodeValue::List(_)));
    assert!(nested, "Child should be nested under Parent");
}

#[test]
fn test_ordered_list_type() {
    let document = doc(vec![numbered("n", 0, "one"), numbered("n", 0, "two")]);

    let arena = Arena::new();
    let root = to_comrak_ast(&document, &MarkdownFormat::default(), &arena);

    let list = root.first_child().unwrap();
    match &list.data.borrow().value {
        NodeValue::List(list) => {
            assert_eq!(list.list_type, ListType::Ordered);
            assert_eq!(list.start, 1);
        }
        other => panic!("Expected ordered list, got {other:?}"),
    };
    assert_eq!(list.children().count(), 2);
}

#[test]
fn test_table_structure() {
    let document = doc(vec![table(&[&["A", "B"], &["1", "2"], &["3", "4"]])]);

    let arena = Arena::new();
    let root = to_comrak_ast(&document, &MarkdownFormat::default(), &arena);

    let table = root.first_child().unwrap();
    match &table.data.borrow().value {
        NodeValue::Table(table) => assert_eq!(table.num_columns, 2),
        other => panic!("Expected table, got {other:?}"),
    };
    assert_eq!(table.children().count(), 3);
}

#[test]
fn test_table_cell_with_pipe_stays_in_column() {
    let document = doc(vec![table(&[&["a|b", "c"], &["1", "2"]])]);

    let arena = Arena::new();
    let root = to_comrak_ast(&document, &MarkdownFormat::default(), &arena);

    let table = root.first_child().unwrap();
    match &table.data.borrow().value {
        NodeValue::Table(table) => assert_eq!(table.num_columns, 2),
        other => panic!("Expected table, got {other:?}"),
    };
}

#[test]
fn test_footnotes_parse() {
    let document = doc(vec![para_of(vec![
        Element::text("Claim"),
        footnote(vec![para("Evidence.")]),
    ])]);

    let types = node_types(&document);
    assert!(types.contains("FootnoteReference"));
    assert!(types.contains("FootnoteDefinition"));
}

#[test]
fn test_image_placeholder_is_an_image() {
    let document = doc(vec![para_of(vec![image()])]);
    let types = node_types(&document);
    assert!(types.contains("Image"));
}

#[test]
fn test_horizontal_rule_is_not_a_setext_heading() {
    let document = doc(vec![
        para("Text right above"),
        para_of(vec![Element::HorizontalRule]),
    ]);
    let types = node_types(&document);
    assert!(types.contains("ThematicBreak"));
    assert!(!types.contains("Heading"));
}
