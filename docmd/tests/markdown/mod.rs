//! Markdown format tests
//!
//! Tests for document tree → Markdown conversion.

mod blocks;
mod export;
