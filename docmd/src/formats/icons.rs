//! Icon mapping for the tree visualization.

/// Get the Unicode icon for an element kind name (as returned by
/// `Element::kind_name`). Unknown kinds share a fallback icon.
pub fn get_icon(kind: &str) -> &'static str {
    match kind {
        "DOCUMENT" => "⧉",
        "PARAGRAPH" => "¶",
        "LIST_ITEM" => "•",
        "TABLE" => "▦",
        "TABLE_ROW" => "☰",
        "TABLE_CELL" => "▢",
        "TEXT" => "◦",
        "INLINE_IMAGE" => "▣",
        "FOOTNOTE" => "³",
        "HORIZONTAL_RULE" => "⎯",
        "TABLE_OF_CONTENTS" => "≡",
        "PAGE_BREAK" => "↡",
        "INLINE_DRAWING" => "✎",
        "UNSUPPORTED" => "∅",
        _ => "○",
    }
}
