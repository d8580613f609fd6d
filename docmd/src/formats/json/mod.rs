//! JSON format implementation
//!
//! The JSON export of the document tree is the crate's only input format.
//! Serializing writes the same shape back, which is handy for inspecting
//! what a host adapter produced after normalization.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::from_json::{from_json_str, to_json_string};
use crate::ir::nodes::Document;

/// Format implementation for the JSON document tree
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Document tree as exported by host adapters"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        from_json_str(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_json_string(doc)
    }
}
