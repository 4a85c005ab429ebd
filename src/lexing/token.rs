//! Token definitions shared by every grammar
//!
//! A token is a classified slice of the source. Tokens borrow their text from the
//! input and carry the byte range they were cut from, so a token stream can always
//! be mapped back onto the original source.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// The closed set of lexical classes a token can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenCategory {
    Keyword,
    /// Identifiers: sub-command names, attribute keys, list items
    Variable,
    StringLiteral,
    Constant,
    Operator,
    Punctuation,
    Comment,
    Whitespace,
    /// Input that looks like a known directive but has the wrong shape
    Error,
    PlainText,
}

impl TokenCategory {
    /// Every category, in declaration order.
    pub const ALL: [TokenCategory; 10] = [
        TokenCategory::Keyword,
        TokenCategory::Variable,
        TokenCategory::StringLiteral,
        TokenCategory::Constant,
        TokenCategory::Operator,
        TokenCategory::Punctuation,
        TokenCategory::Comment,
        TokenCategory::Whitespace,
        TokenCategory::Error,
        TokenCategory::PlainText,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenCategory::Keyword => "keyword",
            TokenCategory::Variable => "variable",
            TokenCategory::StringLiteral => "string",
            TokenCategory::Constant => "constant",
            TokenCategory::Operator => "operator",
            TokenCategory::Punctuation => "punctuation",
            TokenCategory::Comment => "comment",
            TokenCategory::Whitespace => "whitespace",
            TokenCategory::Error => "error",
            TokenCategory::PlainText => "text",
        }
    }

    /// Short presentation class used by the markup renderers.
    ///
    /// The names follow the classic Pygments/Rouge stylesheet convention so that
    /// existing themes apply unchanged.
    pub fn css_class(self) -> &'static str {
        match self {
            TokenCategory::Keyword => "k",
            TokenCategory::Variable => "nv",
            TokenCategory::StringLiteral => "s",
            TokenCategory::Constant => "no",
            TokenCategory::Operator => "o",
            TokenCategory::Punctuation => "p",
            TokenCategory::Comment => "c",
            TokenCategory::Whitespace => "w",
            TokenCategory::Error => "err",
            TokenCategory::PlainText => "x",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified slice of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub category: TokenCategory,
    pub text: &'a str,
    /// Byte range of `text` in the scanned source
    pub span: Range<usize>,
}

impl<'a> Token<'a> {
    pub fn new(category: TokenCategory, text: &'a str, span: Range<usize>) -> Self {
        debug_assert_eq!(text.len(), span.len());
        Self {
            category,
            text,
            span,
        }
    }
}
