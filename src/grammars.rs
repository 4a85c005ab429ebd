//! The concrete grammars shipped with pdlex
//!
//! Grammars are plain values; callers that want to build their own can call
//! [`pdfile::build`] or [`prldevops::build`] directly. For everyone else,
//! [`GrammarName::grammar`] hands out a process-wide instance that is built on
//! first use and shared read-only afterwards.

pub mod pdfile;
pub mod prldevops;

use crate::lexing::{tokenize, Grammar, Token};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

// The rule tables are constants; a failure here is a defect in this crate.
static PDFILE: Lazy<Grammar> =
    Lazy::new(|| pdfile::build().unwrap_or_else(|e| panic!("pdfile grammar: {}", e)));
static PRLDEVOPS: Lazy<Grammar> =
    Lazy::new(|| prldevops::build().unwrap_or_else(|e| panic!("prldevops grammar: {}", e)));

/// Selector for one of the built-in grammars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrammarName {
    /// pdfile build descriptions
    #[serde(rename = "pdfile", alias = "parallels-file")]
    PdFile,
    /// `prldevops` command lines
    #[serde(rename = "prldevops")]
    PrlDevops,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grammar '{0}' (expected one of: pdfile, parallels-file, prldevops)")]
pub struct UnknownGrammar(pub String);

impl GrammarName {
    pub const ALL: [GrammarName; 2] = [GrammarName::PdFile, GrammarName::PrlDevops];

    pub fn as_str(self) -> &'static str {
        match self {
            GrammarName::PdFile => pdfile::NAME,
            GrammarName::PrlDevops => prldevops::NAME,
        }
    }

    /// Every name this grammar answers to, canonical name first
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            GrammarName::PdFile => &["pdfile", "parallels-file"],
            GrammarName::PrlDevops => &["prldevops"],
        }
    }

    pub fn grammar(self) -> &'static Grammar {
        match self {
            GrammarName::PdFile => &*PDFILE,
            GrammarName::PrlDevops => &*PRLDEVOPS,
        }
    }

    pub fn tokenize(self, source: &str) -> Vec<Token<'_>> {
        tokenize(self.grammar(), source)
    }

    /// Guess the grammar for a file from its name, then its content
    pub fn guess(path: &Path, content: &str) -> Option<Self> {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        if file_name.eq_ignore_ascii_case("pdfile") || extension.eq_ignore_ascii_case("pdfile") {
            return Some(GrammarName::PdFile);
        }
        if extension == "sh" {
            return Some(GrammarName::PrlDevops);
        }

        let first_line = content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))?;
        let first_word = first_line.split_whitespace().next().unwrap_or("");

        if first_word.eq_ignore_ascii_case(prldevops::PROGRAM) {
            Some(GrammarName::PrlDevops)
        } else if pdfile::KEYWORDS
            .iter()
            .any(|keyword| keyword.eq_ignore_ascii_case(first_word))
        {
            Some(GrammarName::PdFile)
        } else {
            None
        }
    }
}

impl fmt::Display for GrammarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrammarName {
    type Err = UnknownGrammar;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GrammarName::ALL
            .into_iter()
            .find(|name| name.aliases().iter().any(|a| a.eq_ignore_ascii_case(s)))
            .ok_or_else(|| UnknownGrammar(s.to_string()))
    }
}
