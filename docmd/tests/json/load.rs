//! End-to-end: exported JSON → document tree → Markdown.

use docmd::ir::from_json::from_json_str;
use docmd::ir::nodes::Element;
use docmd::{convert_document, ConvertOptions, FormatError, FormatRegistry};
use insta::assert_snapshot;

const REPORT: &str = include_str!("fixtures/report.json");

#[test]
fn test_report_fixture_converts() {
    let document = from_json_str(REPORT).expect("fixture should load");
    assert_eq!(document.title.as_deref(), Some("Quarterly report"));

    let result = convert_document(&document, &ConvertOptions::default());
    assert_snapshot!(result.markdown, @r"
    # Quarterly report

    Revenue **grew by a third**. See [the dashboard](https://example.com/dash) for details.[^1]

    1. Close the books
     1. Reconcile accounts
    2. Publish

    | Region | Growth |
    | --- | --- |
    | North | 41% |

    ![Growth chart]()(WARN_UNRECOGNIZED_ELEMENT: EQUATION)

    [^1]: Unaudited figures.
    ");

    let warnings: Vec<(usize, &str)> = result
        .warnings
        .iter()
        .map(|w| (w.line, w.message.as_str()))
        .collect();
    assert_eq!(
        warnings,
        vec![
            (13, "Image to replace"),
            (13, "Unrecognized element: EQUATION"),
        ]
    );
}

#[test]
fn test_registry_pipeline_matches_direct_conversion() {
    let registry = FormatRegistry::default();
    let document = registry.parse(REPORT, "json").unwrap();
    let via_registry = registry.serialize(&document, "markdown").unwrap();
    let direct = convert_document(&document, &ConvertOptions::default()).markdown;
    assert_eq!(via_registry, direct);
}

#[test]
fn test_unknown_kinds_survive_loading() {
    let document = from_json_str(REPORT).unwrap();
    let last = document.body.children.last().unwrap();
    let kinds: Vec<&str> = last
        .children()
        .unwrap()
        .iter()
        .map(Element::kind_name)
        .collect();
    assert_eq!(kinds, vec!["INLINE_IMAGE", "EQUATION"]);
}

#[test]
fn test_treeviz_of_fixture() {
    let registry = FormatRegistry::default();
    let document = registry.parse(REPORT, "json").unwrap();
    let tree = registry.serialize(&document, "treeviz").unwrap();

    assert!(tree.starts_with("⧉ Document \"Quarterly report\" (9 items)"));
    assert!(tree.contains("≡ TABLE_OF_CONTENTS"));
    assert!(tree.contains("• NUMBER level 1 (list kix.steps)"));
    assert!(tree.contains("○ EQUATION"));
}

#[test]
fn test_wrong_shape_is_a_parse_error() {
    let result = from_json_str(r#"{ "body": { "children": [ { "text": "no type tag" } ] } }"#);
    assert!(matches!(result, Err(FormatError::ParseError(_))));
}
