//! Configuration loading
//!
//! `defaults/pdlex.default.toml` is embedded into the binary so that the documented
//! defaults and runtime behavior stay in sync. User files and single-key overrides
//! are layered on top with [`Loader`] before deserializing into [`PdlexConfig`].
//!
//! Grammars themselves are not configurable; only presentation is.

use crate::formats::{HtmlOptions, OutputFormat, RenderOptions};
use crate::grammars::GrammarName;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/pdlex.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PdlexConfig {
    pub highlight: HighlightConfig,
    pub html: HtmlConfig,
    pub ansi: AnsiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    pub grammar: GrammarName,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub class_prefix: String,
    pub wrap: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnsiConfig {
    pub enabled: bool,
}

impl PdlexConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            html: HtmlOptions {
                class_prefix: self.html.class_prefix.clone(),
                wrap: self.html.wrap,
            },
            color: self.ansi.enabled,
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

    /// Apply a single key/value override. The binary routes `--format` through here.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<PdlexConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<PdlexConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.highlight.grammar, GrammarName::PdFile);
        assert_eq!(config.highlight.format, OutputFormat::Ansi);
        assert!(config.html.wrap);
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("highlight.grammar", "parallels-file")
            .and_then(|l| l.set_override("highlight.format", "html"))
            .and_then(|l| l.set_override("html.class_prefix", "pd-"))
            .and_then(|l| l.set_override("ansi.enabled", false))
            .expect("overrides to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.highlight.grammar, GrammarName::PdFile);
        assert_eq!(config.highlight.format, OutputFormat::Html);
        assert_eq!(config.render_options().html.class_prefix, "pd-");
        assert!(!config.render_options().color);
    }

    #[test]
    fn rejects_unknown_grammar() {
        let result = Loader::new()
            .set_override("highlight.grammar", "docker")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/pdlex.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.highlight.grammar, GrammarName::PdFile);
    }
}
