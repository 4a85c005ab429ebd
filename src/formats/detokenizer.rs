//! Detokenizer
//!
//! Converts a token stream back into source text. Since tokens always cover the
//! scanned input exactly, this is the identity on `tokenize` output, which makes it
//! the reference check for coverage:
//!
//! ```ignore
//! assert_eq!(detokenize(&tokenize(grammar, source)), source);
//! ```

use crate::lexing::Token;

pub fn detokenize(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|token| token.text).collect()
}

/// Check that `tokens` tile `source` without gaps or overlaps
pub fn covers(tokens: &[Token<'_>], source: &str) -> bool {
    let mut position = 0;
    for token in tokens {
        if token.span.start != position || source.get(token.span.clone()) != Some(token.text) {
            return false;
        }
        position = token.span.end;
    }
    position == source.len()
}
