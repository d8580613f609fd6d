//! Pipe table rendering.
//!
//! The first row is the header, followed by a `| --- |` separator sized
//! to the header's cell count. Later rows are written as they come, so a
//! ragged table produces ragged Markdown rather than an error. Each cell
//! is a full recursive walk, flattened onto the row's single line.

use super::context::Context;
use super::serializer::walk_blocks;
use crate::ir::nodes::{Table, TableCell, TableRow};

/// Append a table as a standalone block.
pub fn render_table(table: &Table, ctx: &mut Context) {
    let columns = table.column_count();
    if columns == 0 {
        log::debug!("skipping table without header cells");
        return;
    }

    let mut rows = table.rows.iter();
    ctx.push("\n\n");
    if let Some(header) = rows.next() {
        render_row(header, ctx);
    }
    ctx.push("\n");
    ctx.push(&separator_row(columns));
    for row in rows {
        ctx.push("\n");
        render_row(row, ctx);
    }
    ctx.push("\n\n");
}

/// Append one `| a | b |` row at the current position.
pub fn render_row(row: &TableRow, ctx: &mut Context) {
    ctx.push("| ");
    for (i, cell) in row.cells.iter().enumerate() {
        if i > 0 {
            ctx.push(" | ");
        }
        render_cell(cell, ctx);
    }
    ctx.push(" |");
}

fn render_cell(cell: &TableCell, ctx: &mut Context) {
    let mark = ctx.mark();
    ctx.skip_next_leading_newline();
    walk_blocks(&cell.children, ctx);
    ctx.clear_skip_leading_newline();

    let rendered = ctx.take_since(mark);
    let flattened = flatten_cell(&rendered);
    ctx.push(&flattened);
}

fn separator_row(columns: usize) -> String {
    format!("| {} |", vec!["---"; columns].join(" | "))
}

/// Collapse a cell's rendering onto one line and escape pipes.
fn flatten_cell(rendered: &str) -> String {
    rendered
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}
