//! Shared configuration loader for the docmd toolchain.
//!
//! `defaults/docmd.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`DocmdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use docmd::formats::treeviz::TreevizOptions;
use docmd::{ConvertOptions, TocMode};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/docmd.default.toml");

/// Top-level configuration consumed by docmd applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DocmdConfig {
    pub convert: ConvertConfig,
    pub inspect: InspectConfig,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub markdown: MarkdownConfig,
}

/// Mirrors the knobs exposed by the Markdown converter.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub list_indent: String,
    pub table_of_contents: TocMode,
    pub monospace_fonts: Vec<String>,
    pub image_alt_sentinel: String,
    pub image_url: String,
}

impl From<MarkdownConfig> for ConvertOptions {
    fn from(config: MarkdownConfig) -> Self {
        ConvertOptions {
            list_indent: config.list_indent,
            table_of_contents: config.table_of_contents,
            monospace_fonts: config.monospace_fonts,
            image_alt_sentinel: config.image_alt_sentinel,
            image_url: config.image_url,
        }
    }
}

impl From<&MarkdownConfig> for ConvertOptions {
    fn from(config: &MarkdownConfig) -> Self {
        config.clone().into()
    }
}

/// Controls inspect output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub treeviz: TreevizConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreevizConfig {
    pub show_styles: bool,
}

impl From<&TreevizConfig> for TreevizOptions {
    fn from(config: &TreevizConfig) -> Self {
        TreevizOptions {
            show_styles: config.show_styles,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DocmdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DocmdConfig, ConfigError> {
    Loader::new().build()
}
