//! Output formats for token streams
//!
//! Rendering is deliberately thin: every formatter walks the tokens in order and
//! writes each token's text once, styled by its category. No formatter reorders,
//! drops or rewrites token text, so stripping the styling always gives back the
//! original source.

pub mod ansi;
pub mod detokenizer;
pub mod dump;
pub mod html;

use crate::lexing::Token;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use detokenizer::detokenize;
pub use html::HtmlOptions;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to serialize tokens as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize tokens as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<span>` markup with CSS classes
    Html,
    /// Terminal colors
    Ansi,
    /// Token dump as JSON
    Json,
    /// Token dump as YAML
    Yaml,
    /// The source text, unstyled
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format '{0}' (expected one of: html, ansi, json, yaml, text)")]
pub struct UnknownFormat(pub String);

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Html,
        OutputFormat::Ansi,
        OutputFormat::Json,
        OutputFormat::Yaml,
        OutputFormat::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Ansi => "ansi",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Settings shared by the formatters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub html: HtmlOptions,
    /// When false, `ansi` output falls back to plain text
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            html: HtmlOptions::default(),
            color: true,
        }
    }
}

/// Render `tokens` in the requested format
pub fn render(
    tokens: &[Token<'_>],
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Html => Ok(html::render(tokens, &options.html)),
        OutputFormat::Ansi if options.color => Ok(ansi::render(tokens)),
        OutputFormat::Ansi | OutputFormat::Text => Ok(detokenize(tokens)),
        OutputFormat::Json => dump::to_json(tokens),
        OutputFormat::Yaml => dump::to_yaml(tokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammars::GrammarName;

    #[test]
    fn test_format_names() {
        for format in OutputFormat::ALL {
            assert_eq!(format.to_string().parse(), Ok(format));
        }
        assert_eq!("HTML".parse(), Ok(OutputFormat::Html));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_ansi_without_color_is_plain_text() {
        let source = "FORCE true\n";
        let tokens = GrammarName::PdFile.tokenize(source);
        let options = RenderOptions {
            color: false,
            ..RenderOptions::default()
        };
        let output = render(&tokens, OutputFormat::Ansi, &options).unwrap();
        assert_eq!(output, source);
    }
}
