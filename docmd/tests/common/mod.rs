//! Tree builders shared by the integration tests.

#![allow(dead_code)]

use docmd::ir::nodes::*;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn doc(children: Vec<Element>) -> Document {
    Document::new(children)
}

pub fn para(text: &str) -> Element {
    Element::Paragraph(Paragraph::new(vec![Element::text(text)]))
}

pub fn para_of(children: Vec<Element>) -> Element {
    Element::Paragraph(Paragraph::new(children))
}

pub fn heading(level: ParagraphHeading, text: &str) -> Element {
    Element::Paragraph(Paragraph::heading(level, vec![Element::text(text)]))
}

pub fn styled(fragments: Vec<(&str, TextStyle)>) -> Element {
    Element::Text(TextRun::from_fragments(fragments))
}

pub fn bullet(list_id: &str, level: usize, text: &str) -> Element {
    Element::ListItem(
        ListItem::new(list_id, GlyphType::Bullet, vec![Element::text(text)]).nested(level),
    )
}

pub fn numbered(list_id: &str, level: usize, text: &str) -> Element {
    Element::ListItem(
        ListItem::new(list_id, GlyphType::Number, vec![Element::text(text)]).nested(level),
    )
}

pub fn table(rows: &[&[&str]]) -> Element {
    Element::Table(Table {
        rows: rows
            .iter()
            .map(|cells| TableRow {
                cells: cells
                    .iter()
                    .map(|text| TableCell::new(vec![para(text)]))
                    .collect(),
            })
            .collect(),
    })
}

pub fn image() -> Element {
    Element::InlineImage(InlineImage::default())
}

pub fn unknown(kind: &str) -> Element {
    Element::Unknown {
        kind: kind.to_string(),
    }
}

pub fn footnote(body: Vec<Element>) -> Element {
    Element::Footnote(Footnote { body })
}
