//! Format implementations
//!
//! `json` reads and writes the document tree, `markdown` is the converter
//! proper and `treeviz` draws the tree for inspection.

pub mod icons;
pub mod json;
pub mod markdown;
pub mod treeviz;

pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use treeviz::TreevizFormat;
