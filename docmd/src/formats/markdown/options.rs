//! Conversion knobs for the Markdown renderer.

use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a table-of-contents element is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocMode {
    /// Dropped without output or warning.
    #[default]
    Omit,
    /// Rendered as a `[[TOC]]` block.
    Placeholder,
}

impl std::str::FromStr for TocMode {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "omit" => Ok(TocMode::Omit),
            "placeholder" => Ok(TocMode::Placeholder),
            other => Err(FormatError::NotSupported(format!(
                "Unknown table of contents mode '{other}' (expected 'omit' or 'placeholder')"
            ))),
        }
    }
}

/// Configuration options for Markdown conversion.
///
/// ```ignore
/// let options = ConvertOptions::new()
///     .with_list_indent("  ")
///     .with_table_of_contents(TocMode::Placeholder);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Padding emitted once per list nesting level
    pub list_indent: String,

    /// Table of contents handling
    pub table_of_contents: TocMode,

    /// Font families rendered as inline code
    pub monospace_fonts: Vec<String>,

    /// Alt text for image placeholders that carry no title
    pub image_alt_sentinel: String,

    /// URL written into image placeholders
    pub image_url: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            list_indent: " ".to_string(),
            table_of_contents: TocMode::Omit,
            monospace_fonts: vec!["Courier New".to_string()],
            image_alt_sentinel: "WARN_REPLACE_IMG".to_string(),
            image_url: String::new(),
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list_indent(mut self, indent: impl Into<String>) -> Self {
        self.list_indent = indent.into();
        self
    }

    pub fn with_table_of_contents(mut self, mode: TocMode) -> Self {
        self.table_of_contents = mode;
        self
    }

    pub fn with_monospace_fonts<I, S>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.monospace_fonts = fonts.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_monospace(&self, family: &str) -> bool {
        self.monospace_fonts
            .iter()
            .any(|font| font.eq_ignore_ascii_case(family))
    }

    /// Apply `--extra-*` style parameters on top of these options.
    ///
    /// Recognized keys: `list-indent` (a number of spaces or a literal
    /// string), `toc` (`omit` or `placeholder`), `monospace-fonts`
    /// (comma separated).
    pub fn apply_params(mut self, params: &HashMap<String, String>) -> Result<Self, FormatError> {
        for (key, value) in params {
            match key.as_str() {
                "list-indent" => {
                    self.list_indent = match value.parse::<usize>() {
                        Ok(width) => " ".repeat(width),
                        Err(_) => value.clone(),
                    };
                }
                "toc" => self.table_of_contents = value.parse()?,
                "monospace-fonts" => {
                    self.monospace_fonts = value
                        .split(',')
                        .map(str::trim)
                        .filter(|font| !font.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Markdown does not support the parameter '{other}'"
                    )))
                }
            }
        }
        Ok(self)
    }
}
