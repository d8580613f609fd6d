//! Text run formatting.
//!
//! A run arrives as one string plus the offsets where its style changes.
//! Spans are processed right to left so each one can be wrapped without
//! shifting the offsets still to be processed. Links and monospace spans
//! absorb preceding spans carrying the identical URL or font: editors
//! routinely split a single link into several runs, and rendering each
//! fragment as its own link would produce `[a](u)[b](u)`. Boolean styles
//! are never merged.

use super::options::ConvertOptions;
use crate::ir::nodes::{TextRun, TextStyle};

/// Render a text run as inline Markdown.
pub fn format_text_run(run: &TextRun, options: &ConvertOptions) -> String {
    let chars: Vec<char> = run.text.chars().collect();
    let indices = run.attribute_indices();
    let mut pieces: Vec<String> = Vec::with_capacity(indices.len());
    let mut last_offset = chars.len();

    let mut i = indices.len();
    while i > 0 {
        i -= 1;
        let mut offset = indices[i];
        let start_style = run.style_at(offset);

        let mut is_link = false;
        let mut value = if let Some(url) = start_style.link_url() {
            while i > 0 && run.style_at(indices[i - 1]).link_url() == Some(url) {
                i -= 1;
                offset = indices[i];
            }
            is_link = true;
            format!("[{}]({})", slice(&chars, offset, last_offset), url)
        } else if let Some(font) = monospace_font(start_style, options) {
            while i > 0 && same_monospace_span(run.style_at(indices[i - 1]), font) {
                i -= 1;
                offset = indices[i];
            }
            format!("`{}`", slice(&chars, offset, last_offset))
        } else {
            slice(&chars, offset, last_offset)
        };

        let span = slice(&chars, offset, last_offset);
        if !span.trim().is_empty() {
            value = apply_emphasis(value, run.style_at(offset), is_link);
        }

        pieces.push(value);
        last_offset = offset;
    }

    pieces.reverse();
    pieces.concat()
}

fn slice(chars: &[char], start: usize, end: usize) -> String {
    chars[start..end].iter().collect()
}

fn monospace_font<'s>(style: &'s TextStyle, options: &ConvertOptions) -> Option<&'s str> {
    style
        .font_family
        .as_deref()
        .filter(|family| options.is_monospace(family))
}

fn same_monospace_span(style: &TextStyle, font: &str) -> bool {
    style.link_url().is_none() && style.font_family.as_deref() == Some(font)
}

/// Wrap in strikethrough, underline, italic, bold order so bold ends up
/// outermost.
fn apply_emphasis(value: String, style: &TextStyle, is_link: bool) -> String {
    let mut value = value;
    if style.strikethrough {
        value = wrap(&value, "~~");
    }
    if style.underline && !is_link {
        value = wrap(&value, "__");
    }
    if style.italic {
        value = wrap(&value, "*");
    }
    if style.bold {
        value = wrap(&value, "**");
    }
    value
}

/// Markers hug the text; surrounding whitespace stays outside, since
/// `** bold **` is not emphasis in CommonMark.
fn wrap(value: &str, marker: &str) -> String {
    let core = value.trim();
    if core.is_empty() {
        return value.to_string();
    }
    let lead = &value[..value.len() - value.trim_start().len()];
    let trail = &value[value.trim_end().len()..];
    format!("{lead}{marker}{core}{marker}{trail}")
}
