//! Token dumps for tooling and debugging

use super::FormatError;
use crate::lexing::Token;

pub fn to_json(tokens: &[Token<'_>]) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(tokens)?)
}

pub fn to_yaml(tokens: &[Token<'_>]) -> Result<String, FormatError> {
    Ok(serde_yaml::to_string(tokens)?)
}

/// One line per token: `category start..end "text"`
pub fn to_lines(tokens: &[Token<'_>]) -> String {
    tokens
        .iter()
        .map(|token| {
            format!(
                "{:<12} {}..{} {:?}\n",
                token.category.as_str(),
                token.span.start,
                token.span.end,
                token.text
            )
        })
        .collect()
}
