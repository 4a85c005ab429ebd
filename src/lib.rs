//! # pdlex
//!
//! Syntax highlighting lexers for pdfiles (the declarative VM build format) and for
//! `prldevops` command lines.
//!
//! The crate is split in three layers:
//!
//! - [`lexing`]: a generic, table-driven lexing engine. States hold ordered regex
//!   rules; rules emit classified tokens and push or pop states.
//! - [`grammars`]: the pdfile and prldevops rule tables, and [`GrammarName`] to pick
//!   one of them.
//! - [`formats`]: renderers that turn token streams into HTML, terminal colors or
//!   token dumps. [`config`] loads the presentation settings used by the CLI.
//!
//! ```ignore
//! use pdlex::{GrammarName, TokenCategory};
//!
//! let tokens = GrammarName::PdFile.tokenize("FORCE maybe\n");
//! assert_eq!(tokens[2].category, TokenCategory::Error);
//! ```

pub mod config;
pub mod formats;
pub mod grammars;
pub mod lexing;

pub use grammars::GrammarName;
pub use lexing::{tokenize, Grammar, Token, TokenCategory};
