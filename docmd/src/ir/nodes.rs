//! Core data structures for the document tree.
//!
//! The tree mirrors what a rich-text editor hands over: a body of block
//! elements, paragraphs holding text runs, list items that carry their
//! own nesting level and list identity, and tables of composite cells.
//! Inline styling is kept as a flat list of style changes per text run.

use serde::{Deserialize, Serialize};

/// A document as handed over by the host editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Body,
}

impl Document {
    pub fn new(children: Vec<Element>) -> Self {
        Document {
            title: None,
            body: Body { children },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// The top-level composite of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub children: Vec<Element>,
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Paragraph(Paragraph),
    ListItem(ListItem),
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
    Text(TextRun),
    InlineImage(InlineImage),
    Footnote(Footnote),
    HorizontalRule,
    TableOfContents,
    PageBreak,
    InlineDrawing,
    Unsupported,
    /// A kind the converter has no rule for, carrying the host's kind name.
    Unknown { kind: String },
}

impl Element {
    /// Shorthand for an unstyled text run.
    pub fn text(text: impl Into<String>) -> Self {
        Element::Text(TextRun::plain(text))
    }

    /// The host-style kind name (`PARAGRAPH`, `LIST_ITEM`, ...).
    pub fn kind_name(&self) -> &str {
        match self {
            Element::Paragraph(_) => "PARAGRAPH",
            Element::ListItem(_) => "LIST_ITEM",
            Element::Table(_) => "TABLE",
            Element::TableRow(_) => "TABLE_ROW",
            Element::TableCell(_) => "TABLE_CELL",
            Element::Text(_) => "TEXT",
            Element::InlineImage(_) => "INLINE_IMAGE",
            Element::Footnote(_) => "FOOTNOTE",
            Element::HorizontalRule => "HORIZONTAL_RULE",
            Element::TableOfContents => "TABLE_OF_CONTENTS",
            Element::PageBreak => "PAGE_BREAK",
            Element::InlineDrawing => "INLINE_DRAWING",
            Element::Unsupported => "UNSUPPORTED",
            Element::Unknown { kind } => kind,
        }
    }

    /// Children of composite elements; `None` for leaves and tables.
    pub fn children(&self) -> Option<&[Element]> {
        match self {
            Element::Paragraph(p) => Some(&p.children),
            Element::ListItem(item) => Some(&item.children),
            Element::TableCell(cell) => Some(&cell.children),
            Element::Footnote(note) => Some(&note.body),
            _ => None,
        }
    }

    /// Inline elements live inside paragraphs and list items.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Element::Text(_)
                | Element::InlineImage(_)
                | Element::Footnote(_)
                | Element::InlineDrawing
                | Element::Unknown { .. }
        )
    }
}

/// Heading style of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParagraphHeading {
    #[default]
    Normal,
    Title,
    Subtitle,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
}

impl ParagraphHeading {
    /// Markdown heading level, `None` for body text.
    pub fn level(self) -> Option<usize> {
        match self {
            ParagraphHeading::Normal => None,
            ParagraphHeading::Title | ParagraphHeading::Subtitle | ParagraphHeading::Heading1 => {
                Some(1)
            }
            ParagraphHeading::Heading2 => Some(2),
            ParagraphHeading::Heading3 => Some(3),
            ParagraphHeading::Heading4 => Some(4),
            ParagraphHeading::Heading5 => Some(5),
            ParagraphHeading::Heading6 => Some(6),
        }
    }
}

/// Represents a paragraph, optionally styled as a heading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub heading: ParagraphHeading,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Paragraph {
    pub fn new(children: Vec<Element>) -> Self {
        Paragraph {
            heading: ParagraphHeading::Normal,
            children,
        }
    }

    pub fn heading(heading: ParagraphHeading, children: Vec<Element>) -> Self {
        Paragraph { heading, children }
    }
}

/// Glyph drawn in front of a list item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlyphType {
    #[default]
    Bullet,
    HollowBullet,
    SquareBullet,
    Number,
    LatinUpper,
    LatinLower,
    RomanUpper,
    RomanLower,
}

impl GlyphType {
    pub fn is_bullet(self) -> bool {
        matches!(
            self,
            GlyphType::Bullet | GlyphType::HollowBullet | GlyphType::SquareBullet
        )
    }
}

/// A list item. Items are not grouped into list nodes; consecutive items
/// sharing a `list_id` form one visual list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub nesting_level: usize,
    #[serde(default)]
    pub glyph: GlyphType,
    #[serde(default)]
    pub list_id: String,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl ListItem {
    pub fn new(list_id: impl Into<String>, glyph: GlyphType, children: Vec<Element>) -> Self {
        ListItem {
            nesting_level: 0,
            glyph,
            list_id: list_id.into(),
            children,
        }
    }

    pub fn nested(mut self, level: usize) -> Self {
        self.nesting_level = level;
        self
    }

    /// True when the item has nothing visible to render.
    pub fn is_blank(&self) -> bool {
        self.children.iter().all(|child| match child {
            Element::Text(run) => run.text.trim().is_empty(),
            Element::PageBreak | Element::InlineDrawing | Element::Unsupported => true,
            _ => false,
        })
    }
}

/// Represents a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Column count as declared by the header row.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|row| row.cells.len()).unwrap_or(0)
    }
}

/// Represents a table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

/// Represents a table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub children: Vec<Element>,
}

impl TableCell {
    pub fn new(children: Vec<Element>) -> Self {
        TableCell { children }
    }
}

/// An image embedded in the text flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

/// A footnote anchored in the text flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Footnote {
    #[serde(default)]
    pub body: Vec<Element>,
}

/// Style attributes active from a given offset onwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

static PLAIN_STYLE: TextStyle = TextStyle {
    bold: false,
    italic: false,
    underline: false,
    strikethrough: false,
    font_family: None,
    link_url: None,
};

impl TextStyle {
    pub fn bold() -> Self {
        TextStyle {
            bold: true,
            ..Default::default()
        }
    }

    pub fn italic() -> Self {
        TextStyle {
            italic: true,
            ..Default::default()
        }
    }

    pub fn link(url: impl Into<String>) -> Self {
        TextStyle {
            link_url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn font(family: impl Into<String>) -> Self {
        TextStyle {
            font_family: Some(family.into()),
            ..Default::default()
        }
    }

    /// Link target, ignoring empty URLs.
    pub fn link_url(&self) -> Option<&str> {
        self.link_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// A point in a text run where the style changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleChange {
    /// Character index (not byte index) into the run's text.
    pub offset: usize,
    #[serde(flatten)]
    pub style: TextStyle,
}

/// A contiguous string with flat attribute-change offsets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<StyleChange>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        TextRun {
            text: text.into(),
            styles: Vec::new(),
        }
    }

    /// Builds a run from `(offset, style)` pairs, normalizing them.
    pub fn styled(text: impl Into<String>, styles: Vec<(usize, TextStyle)>) -> Self {
        let mut run = TextRun {
            text: text.into(),
            styles: styles
                .into_iter()
                .map(|(offset, style)| StyleChange { offset, style })
                .collect(),
        };
        run.normalize();
        run
    }

    /// Builds a run from consecutive `(text, style)` fragments.
    pub fn from_fragments<S: AsRef<str>>(fragments: Vec<(S, TextStyle)>) -> Self {
        let mut text = String::new();
        let mut styles = Vec::with_capacity(fragments.len());
        let mut offset = 0;
        for (fragment, style) in fragments {
            let fragment = fragment.as_ref();
            styles.push(StyleChange { offset, style });
            offset += fragment.chars().count();
            text.push_str(fragment);
        }
        let mut run = TextRun { text, styles };
        run.normalize();
        run
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Sorts style changes, keeps the last entry per offset and drops
    /// offsets past the end of the text.
    pub fn normalize(&mut self) {
        let len = self.char_len();
        self.styles.sort_by_key(|change| change.offset);
        let mut normalized: Vec<StyleChange> = Vec::with_capacity(self.styles.len());
        for change in self.styles.drain(..) {
            if change.offset >= len && len > 0 {
                continue;
            }
            match normalized.last_mut() {
                Some(last) if last.offset == change.offset => *last = change,
                _ => normalized.push(change),
            }
        }
        self.styles = normalized;
    }

    /// Offsets at which attributes may change, ascending, always
    /// starting at 0 for non-empty text. Does not rely on `styles` being
    /// sorted.
    pub fn attribute_indices(&self) -> Vec<usize> {
        let len = self.char_len();
        if len == 0 {
            return Vec::new();
        }
        let mut indices: Vec<usize> = self
            .styles
            .iter()
            .map(|change| change.offset)
            .filter(|&offset| offset < len)
            .collect();
        indices.push(0);
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// The style in effect at the given character offset: the change with
    /// the greatest offset not past it, the later entry winning a tie.
    pub fn style_at(&self, offset: usize) -> &TextStyle {
        self.styles
            .iter()
            .filter(|change| change.offset <= offset)
            .fold(None, |best: Option<&StyleChange>, change| match best {
                Some(best) if best.offset > change.offset => Some(best),
                _ => Some(change),
            })
            .map(|change| &change.style)
            .unwrap_or(&PLAIN_STYLE)
    }
}
