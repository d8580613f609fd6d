//! Document tree handed over by the host editor.
//!
//! `nodes` defines the read-only tree the converter walks; `from_json`
//! loads it from the JSON export used by the host adapters and the CLI.

pub mod from_json;
pub mod nodes;
