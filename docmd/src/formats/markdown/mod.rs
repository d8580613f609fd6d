//! Markdown format implementation
//!
//! This module converts the host editor's document tree into GitHub
//! Flavored Markdown. The output is assembled as text in a single walk
//! (see [`serializer`]); there is no intermediate Markdown AST, because
//! the tree already carries the structure we need and the interesting
//! work lies in whitespace handling and inline style spans.
//!
//! # Element Mapping Table
//!
//! | Tree Element      | Markdown Equivalent        | Notes                                         |
//! |-------------------|----------------------------|-----------------------------------------------|
//! | Paragraph         | Paragraph or `#` heading   | Title/Subtitle/Heading1 → `#`, HeadingN → N×`#` |
//! | ListItem          | `* item` or `N. item`      | Padding per nesting level, ordinals per list  |
//! | Table             | GFM pipe table             | First row is the header                       |
//! | TableCell         | Cell text                  | Flattened to one line, `\|` escaped           |
//! | Text              | Inline text                | Bold, italic, strike, underline, links, code  |
//! | InlineImage       | `![alt]()`                 | Alt from title, then description; warning     |
//! | Footnote          | `[^n]` + definition        | Definitions appended after the body           |
//! | HorizontalRule    | `---`                      | Own block                                     |
//! | TableOfContents   | nothing or `[[TOC]]`       | See [`TocMode`]                               |
//! | PageBreak         | nothing                    | Silent                                        |
//! | InlineDrawing     | nothing                    | Silent                                        |
//! | Unsupported       | nothing                    | Silent                                        |
//! | unknown kinds     | `(WARN_UNRECOGNIZED_ELEMENT: KIND)` | Plus warning                         |
//!
//! # Lossy Conversions
//!
//! - Underline becomes `__x__`, which most renderers show as bold.
//! - Font families other than the configured monospace ones are dropped.
//! - Images are not exported, only marked for manual replacement.
//! - Multi-paragraph table cells are joined on one line.
//!
//! # Warnings
//!
//! Every placeholder written into the output has exactly one warning,
//! carrying the 1-based output line it was written on. Placeholders inside
//! a footnote body report the line of the footnote's `[^n]` reference.

pub mod context;
pub mod footnotes;
pub mod inline;
pub mod lists;
pub mod options;
pub mod serializer;
pub mod table;

pub use context::{ConversionResult, Warning};
pub use options::{ConvertOptions, TocMode};
pub use serializer::{convert_document, convert_elements};

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// Format implementation for Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    options: ConvertOptions,
}

impl MarkdownFormat {
    pub fn new(options: ConvertOptions) -> Self {
        MarkdownFormat { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    fn render(&self, doc: &Document, options: &ConvertOptions) -> String {
        let result = convert_document(doc, options);
        for warning in &result.warnings {
            log::warn!("line {}: {}", warning.line, warning.message);
        }
        result.markdown
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "GitHub Flavored Markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(self.render(doc, &self.options))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = self.options.clone().apply_params(options)?;
        Ok(self.render(doc, &options))
    }
}
