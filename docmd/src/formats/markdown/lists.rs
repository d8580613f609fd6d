//! List numbering state.
//!
//! Items are not grouped into list nodes by the host, so ordinals are
//! tracked per `(list identity, nesting level)` for the whole conversion.
//! Counters only ever advance: two lists the host considers distinct
//! number independently even when they are visually adjacent, and a list
//! interrupted by other content resumes where it left off.

use super::context::Context;
use crate::ir::nodes::ListItem;
use std::collections::HashMap;

/// Last ordinal handed out per list identity and level.
#[derive(Debug, Default)]
pub struct ListCounters {
    counters: HashMap<(String, usize), usize>,
}

impl ListCounters {
    /// Advance the counter for a key and return the new ordinal.
    pub fn next(&mut self, list_id: &str, level: usize) -> usize {
        let counter = self
            .counters
            .entry((list_id.to_string(), level))
            .or_insert(0);
        *counter += 1;
        *counter
    }

    /// Last ordinal assigned for a key, 0 if none.
    pub fn current(&self, list_id: &str, level: usize) -> usize {
        self.counters
            .get(&(list_id.to_string(), level))
            .copied()
            .unwrap_or(0)
    }
}

/// Marker for a list item, including its nesting padding. Ordered items
/// advance their counter.
pub fn prefix_for(item: &ListItem, ctx: &mut Context) -> String {
    let padding = ctx.options().list_indent.repeat(item.nesting_level);
    if item.glyph.is_bullet() {
        format!("{padding}* ")
    } else {
        let ordinal = ctx
            .list_counters_mut()
            .next(&item.list_id, item.nesting_level);
        format!("{padding}{ordinal}. ")
    }
}
