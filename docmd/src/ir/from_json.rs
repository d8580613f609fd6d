//! JSON loading for document trees.
//!
//! Host adapters export the editor's tree as JSON, elements tagged by a
//! `"type"` field. Kinds this crate has no variant for are loaded as
//! [`Element::Unknown`] so a single unexpected node never fails the load;
//! the converter then reports it inline.

use super::nodes::{Document, Element};
use crate::error::FormatError;
use serde_json::{Map, Value};

const KNOWN_TYPES: &[&str] = &[
    "paragraph",
    "list_item",
    "table",
    "table_row",
    "table_cell",
    "text",
    "inline_image",
    "footnote",
    "horizontal_rule",
    "table_of_contents",
    "page_break",
    "inline_drawing",
    "unsupported",
    "unknown",
];

/// Load a document from its JSON export.
pub fn from_json_str(source: &str) -> Result<Document, FormatError> {
    let mut value: Value =
        serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))?;
    if let Some(body) = value.get_mut("body") {
        mark_unknown_kinds(body);
    }
    let mut doc: Document =
        serde_json::from_value(value).map_err(|e| FormatError::ParseError(e.to_string()))?;
    normalize_runs(&mut doc.body.children);
    Ok(doc)
}

/// Serialize a document back to pretty-printed JSON.
pub fn to_json_string(doc: &Document) -> Result<String, FormatError> {
    serde_json::to_string_pretty(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
}

fn mark_unknown_kinds(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(mark_unknown_kinds),
        Value::Object(map) => {
            let unknown = match map.get("type") {
                Some(Value::String(kind)) if !KNOWN_TYPES.contains(&kind.as_str()) => {
                    Some(kind.to_uppercase())
                }
                _ => None,
            };
            match unknown {
                Some(kind) => {
                    log::debug!("loading unrecognized element kind {kind} as unknown");
                    let mut replacement = Map::new();
                    replacement.insert("type".to_string(), Value::String("unknown".to_string()));
                    replacement.insert("kind".to_string(), Value::String(kind));
                    *map = replacement;
                }
                None => map.values_mut().for_each(mark_unknown_kinds),
            }
        }
        _ => {}
    }
}

fn normalize_runs(elements: &mut [Element]) {
    for element in elements {
        match element {
            Element::Text(run) => run.normalize(),
            Element::Paragraph(p) => normalize_runs(&mut p.children),
            Element::ListItem(item) => normalize_runs(&mut item.children),
            Element::TableCell(cell) => normalize_runs(&mut cell.children),
            Element::Footnote(note) => normalize_runs(&mut note.body),
            Element::TableRow(row) => {
                for cell in &mut row.cells {
                    normalize_runs(&mut cell.children);
                }
            }
            Element::Table(table) => {
                for row in &mut table.rows {
                    for cell in &mut row.cells {
                        normalize_runs(&mut cell.children);
                    }
                }
            }
            _ => {}
        }
    }
}
