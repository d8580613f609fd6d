//! Rich-text document trees to GitHub Flavored Markdown
//!
//!     This crate converts the document tree exported by a rich-text editor (paragraphs with
//!     heading styles, list items carrying their own nesting level, tables, styled text runs,
//!     footnotes, images) into Markdown text plus a list of warnings.
//!
//!     This is a pure lib: it powers docmd-cli but is shell agnostic, so no code here prints,
//!     reads environment variables or touches the filesystem. Logging goes through the `log`
//!     facade and is up to the binary to install.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── icons.rs            # Icons for the tree visualization
//!     │   ├── json                # Tree loading and writing
//!     │   ├── markdown            # The converter
//!     │   │   ├── serializer.rs   # Document tree walker
//!     │   │   ├── context.rs      # Accumulated text, warnings, per-conversion state
//!     │   │   ├── inline.rs       # Text run formatter
//!     │   │   ├── lists.rs        # List numbering
//!     │   │   ├── footnotes.rs    # Footnote collection
//!     │   │   ├── table.rs        # Pipe tables
//!     │   │   └── options.rs      # ConvertOptions
//!     │   └── treeviz             # Tree visualization
//!     ├── lib.rs
//!     └── ir                      # The document tree
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common                  # Tree builders
//!     └── <format>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Conversion Model
//!
//!     The converter never fails. Everything it cannot express in Markdown either disappears
//!     (page breaks, drawings, unsupported markers) or is left in the output as a visible
//!     placeholder together with a warning that carries the output line. Callers decide what
//!     to do with the warnings; the Markdown format logs them.
//!
//!     Conversion is a pure function of the tree and the [`ConvertOptions`]: every call builds its
//!     own context, so concurrent conversions share nothing.

pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use formats::markdown::{
    convert_document, convert_elements, ConversionResult, ConvertOptions, TocMode, Warning,
};
pub use ir::nodes::Document;
pub use registry::FormatRegistry;
