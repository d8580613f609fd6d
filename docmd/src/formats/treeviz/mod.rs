//! Treeviz formatter for document trees
//!
//! Treeviz is a visual representation of the tree as it reaches the
//! converter, meant for checking what a host adapter exported before
//! blaming the Markdown output.
//!
//! Each node is one line:
//! <prefix><connector> <icon> <label> (labels truncated to 30 characters)
//!
//! Example:
//!
//! ⧉ Document (3 items)
//! ├─ ¶ HEADING1
//! │ └─ ◦ Quarterly report
//! ├─ • BULLET level 0 (list kix.1)
//! │ └─ ◦ Revenue grew by a third in…
//! └─ ▦ 2 rows × 3 columns
//!   ├─ ☰ 3 cells
//!   ...
//!
//! With the `show-styles` parameter, text runs list their style changes
//! as children (`@offset bold italic link=…`).

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{Document, Element, StyleChange, TextRun};
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

/// Options for tree rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreevizOptions {
    pub show_styles: bool,
}

fn truncate(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= LABEL_WIDTH {
        flat
    } else {
        let cut: String = flat.chars().take(LABEL_WIDTH - 1).collect();
        format!("{cut}…")
    }
}

fn label(element: &Element) -> String {
    match element {
        Element::Paragraph(p) => upper_snake(&format!("{:?}", p.heading)),
        Element::ListItem(item) => format!(
            "{} level {} (list {})",
            upper_snake(&format!("{:?}", item.glyph)),
            item.nesting_level,
            item.list_id
        ),
        Element::Table(table) => format!(
            "{} rows × {} columns",
            table.rows.len(),
            table.column_count()
        ),
        Element::TableRow(row) => format!("{} cells", row.cells.len()),
        Element::TableCell(cell) => format!("{} items", cell.children.len()),
        Element::Text(run) => truncate(&run.text),
        Element::InlineImage(image) => match &image.alt_title {
            Some(title) => truncate(title),
            None => "(untitled image)".to_string(),
        },
        Element::Footnote(note) => format!("{} items", note.body.len()),
        other => other.kind_name().to_string(),
    }
}

/// `Heading1` → `HEADING1`, `LatinUpper` → `LATIN_UPPER`, matching the JSON names
fn upper_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(ch.to_ascii_uppercase());
    }
    out
}

fn style_label(change: &StyleChange) -> String {
    let style = &change.style;
    let mut parts = vec![format!("@{}", change.offset)];
    for (on, name) in [
        (style.bold, "bold"),
        (style.italic, "italic"),
        (style.underline, "underline"),
        (style.strikethrough, "strikethrough"),
    ] {
        if on {
            parts.push(name.to_string());
        }
    }
    if let Some(font) = &style.font_family {
        parts.push(format!("font={font}"));
    }
    if let Some(url) = style.link_url() {
        parts.push(format!("link={url}"));
    }
    if parts.len() == 1 {
        parts.push("plain".to_string());
    }
    parts.join(" ")
}

/// Child nodes of an element for display purposes. Table rows and cells
/// are not `Element`s inside a table, so they are wrapped here.
fn display_children(element: &Element) -> Vec<Element> {
    match element {
        Element::Table(table) => table.rows.iter().cloned().map(Element::TableRow).collect(),
        Element::TableRow(row) => row.cells.iter().cloned().map(Element::TableCell).collect(),
        other => other.children().map(<[Element]>::to_vec).unwrap_or_default(),
    }
}

fn format_style_changes(run: &TextRun, prefix: &str) -> String {
    let mut output = String::new();
    for (i, change) in run.styles.iter().enumerate() {
        let connector = if i == run.styles.len() - 1 { "└─" } else { "├─" };
        output.push_str(&format!("{prefix}{connector} ✦ {}\n", style_label(change)));
    }
    output
}

fn format_element(
    element: &Element,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    options: TreevizOptions,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let mut output = format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(element.kind_name()),
        label(element)
    );

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    if let Element::Text(run) = element {
        if options.show_styles {
            output.push_str(&format_style_changes(run, &child_prefix));
        }
        return output;
    }

    output + &format_children(&display_children(element), &child_prefix, options)
}

fn format_children(children: &[Element], prefix: &str, options: TreevizOptions) -> String {
    let mut output = String::new();
    for (i, child) in children.iter().enumerate() {
        output.push_str(&format_element(child, prefix, i, children.len(), options));
    }
    output
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_options(doc, TreevizOptions::default())
}

pub fn to_treeviz_str_with_options(doc: &Document, options: TreevizOptions) -> String {
    let title = match &doc.title {
        Some(title) => format!(" \"{}\"", truncate(title)),
        None => String::new(),
    };
    let output = format!(
        "{} Document{} ({} items)\n",
        get_icon("DOCUMENT"),
        title,
        doc.body.children.len()
    );
    output + &format_children(&doc.body.children, "", options)
}

/// Convert a document to a treeviz string with optional parameters
///
/// # Parameters
///
/// - `"show-styles"`: when `"true"`, text runs list their style changes.
pub fn to_treeviz_str_with_params(
    doc: &Document,
    params: &HashMap<String, String>,
) -> Result<String, FormatError> {
    let mut options = TreevizOptions::default();
    for (key, value) in params {
        match key.as_str() {
            "show-styles" => options.show_styles = value.to_lowercase() == "true",
            other => {
                return Err(FormatError::NotSupported(format!(
                    "Treeviz does not support the parameter '{other}'"
                )))
            }
        }
    }
    Ok(to_treeviz_str_with_options(doc, options))
}

/// Format implementation for treeviz format
#[derive(Debug, Clone, Default)]
pub struct TreevizFormat {
    options: TreevizOptions,
}

impl TreevizFormat {
    pub fn new(options: TreevizOptions) -> Self {
        TreevizFormat { options }
    }
}

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_options(doc, self.options))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            return self.serialize(doc);
        }
        to_treeviz_str_with_params(doc, options)
    }
}
