//! Markdown serialization (document tree → Markdown)
//!
//! A single recursive walk over the borrowed tree, dispatching on element
//! kind and appending to one [`Context`]. Block composites (the body, a
//! selection, table cells, footnote bodies) start every inline child on
//! its own line; paragraphs and list items render their children inline.
//!
//! Nothing in here fails. Elements without a Markdown counterpart either
//! disappear silently (drawings, page breaks, unsupported markers) or
//! leave a visible sentinel plus a warning (images, unknown kinds).

use super::context::{ConversionResult, Context};
use super::inline::format_text_run;
use super::lists::prefix_for;
use super::options::{ConvertOptions, TocMode};
use super::table::{render_row, render_table};
use crate::ir::nodes::{
    Document, Element, Footnote, InlineImage, ListItem, Paragraph, ParagraphHeading,
};

/// Convert a whole document.
pub fn convert_document(doc: &Document, options: &ConvertOptions) -> ConversionResult {
    let mut ctx = Context::new(options);
    walk_blocks(&doc.body.children, &mut ctx);
    ctx.finish()
}

/// Convert a selection, walked as the children of an implicit root.
pub fn convert_elements<'a, I>(elements: I, options: &ConvertOptions) -> ConversionResult
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut ctx = Context::new(options);
    for element in elements {
        visit_block(element, &mut ctx);
    }
    ctx.finish()
}

/// Walk the children of a block composite.
pub(crate) fn walk_blocks(children: &[Element], ctx: &mut Context) {
    for child in children {
        visit_block(child, ctx);
    }
}

fn visit_block(element: &Element, ctx: &mut Context) {
    if element.is_inline() {
        ctx.ensure_newline();
        let mark = ctx.mark();
        visit(element, ctx);
        ctx.trim_since(mark);
    } else {
        let mark = ctx.mark();
        visit(element, ctx);
        if !matches!(element, Element::ListItem(_)) && ctx.mark() != mark {
            ctx.set_list_run(false);
        }
        return;
    }
    if ctx.mark() > 0 {
        ctx.set_list_run(false);
    }
}

fn visit(element: &Element, ctx: &mut Context) {
    log::trace!("visiting {}", element.kind_name());
    match element {
        Element::Paragraph(paragraph) => render_paragraph(paragraph, ctx),
        Element::ListItem(item) => render_list_item(item, ctx),
        Element::Table(table) => render_table(table, ctx),
        Element::TableRow(row) => {
            ctx.ensure_newline();
            render_row(row, ctx);
        }
        Element::TableCell(cell) => walk_blocks(&cell.children, ctx),
        Element::Text(run) => ctx.push(&format_text_run(run, ctx.options())),
        Element::InlineImage(image) => render_image(image, ctx),
        Element::Footnote(note) => render_footnote(note, ctx),
        Element::HorizontalRule => ctx.push("\n\n---\n\n"),
        Element::TableOfContents => match ctx.options().table_of_contents {
            TocMode::Omit => log::debug!("omitting table of contents"),
            TocMode::Placeholder => ctx.push("\n\n[[TOC]]\n\n"),
        },
        Element::PageBreak | Element::InlineDrawing | Element::Unsupported => {
            log::debug!("skipping {}", element.kind_name());
        }
        Element::Unknown { kind } => render_unrecognized(kind, ctx),
    }
}

/// Render inline children after `ctx.mark()`, trimming the result.
/// Returns whether anything visible was produced.
fn render_inline(children: &[Element], ctx: &mut Context) -> bool {
    let mark = ctx.mark();
    for child in children {
        visit(child, ctx);
    }
    ctx.trim_since(mark)
}

fn heading_prefix(heading: ParagraphHeading) -> String {
    match heading.level() {
        Some(level) => format!("{} ", "#".repeat(level)),
        None => String::new(),
    }
}

fn render_paragraph(paragraph: &Paragraph, ctx: &mut Context) {
    let before = ctx.mark();
    ctx.push(&format!("\n\n{}", heading_prefix(paragraph.heading)));
    if !render_inline(&paragraph.children, ctx) {
        ctx.truncate(before);
        ctx.push("\n");
    }
}

fn render_list_item(item: &ListItem, ctx: &mut Context) {
    if item.is_blank() {
        log::debug!("skipping blank list item in list '{}'", item.list_id);
        return;
    }
    let separator = if ctx.in_list_run() { "\n" } else { "\n\n" };
    let prefix = prefix_for(item, ctx);
    ctx.push(&format!("{separator}{prefix}"));
    render_inline(&item.children, ctx);
    ctx.set_list_run(true);
}

fn render_image(image: &InlineImage, ctx: &mut Context) {
    ctx.warn("Image to replace");
    let options = ctx.options();
    let alt = [&image.alt_title, &image.alt_description]
        .into_iter()
        .filter_map(|text| text.as_deref())
        .find(|text| !text.trim().is_empty())
        .unwrap_or(&options.image_alt_sentinel);
    let markup = format!("![{}]({})", alt, options.image_url);
    match image.link_url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => ctx.push(&format!("[{markup}]({url})")),
        None => ctx.push(&markup),
    }
}

fn render_footnote(note: &Footnote, ctx: &mut Context) {
    let index = ctx.footnotes_mut().reserve();
    let mark = ctx.mark();
    let reference_line = ctx.line();
    let first_warning = ctx.warnings().len();
    ctx.skip_next_leading_newline();
    walk_blocks(&note.body, ctx);
    ctx.clear_skip_leading_newline();

    // the body moves to the end of the document
    ctx.relocate_warnings(first_warning, reference_line);
    let body = ctx.take_since(mark);
    ctx.footnotes_mut().fill(index, &body);
    ctx.push(&super::footnotes::FootnoteStore::reference(index));
}

fn render_unrecognized(kind: &str, ctx: &mut Context) {
    ctx.warn(format!("Unrecognized element: {kind}"));
    ctx.push(&format!("(WARN_UNRECOGNIZED_ELEMENT: {kind})"));
}
