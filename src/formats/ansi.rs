//! Terminal output with ANSI colors

use crate::lexing::{Token, TokenCategory};
use crossterm::style::{Attribute, Color, ContentStyle};
use std::fmt::Write;

/// Terminal style for each category
pub fn style(category: TokenCategory) -> ContentStyle {
    let (color, attribute) = match category {
        TokenCategory::Keyword => (Some(Color::Magenta), Some(Attribute::Bold)),
        TokenCategory::Variable => (Some(Color::Cyan), None),
        TokenCategory::StringLiteral => (Some(Color::Green), None),
        TokenCategory::Constant => (Some(Color::Yellow), None),
        TokenCategory::Operator => (Some(Color::White), Some(Attribute::Bold)),
        TokenCategory::Punctuation => (Some(Color::DarkGrey), None),
        TokenCategory::Comment => (Some(Color::DarkGrey), Some(Attribute::Italic)),
        TokenCategory::Whitespace => (None, None),
        TokenCategory::Error => (Some(Color::Red), Some(Attribute::Underlined)),
        TokenCategory::PlainText => (None, None),
    };

    let mut style = ContentStyle::new();
    style.foreground_color = color;
    if let Some(attribute) = attribute {
        style.attributes.set(attribute);
    }
    style
}

pub fn render(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token.category {
            // keep escape codes off line breaks
            TokenCategory::Whitespace | TokenCategory::PlainText => out.push_str(token.text),
            category => {
                let _ = write!(out, "{}", style(category).apply(token.text));
            }
        }
    }
    out
}
