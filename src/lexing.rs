//! Table-driven lexing engine
//!
//! The engine knows nothing about any particular language. A language is described
//! as a [`Grammar`]: named states, each an ordered list of [`Rule`]s. Scanning keeps
//! a stack of states, so a rule can enter a nested sub-grammar (push) and another
//! rule can leave it (pop).
//!
//!     Rule tables ──build()──> Grammar ──tokenize(source)──> Vec<Token>
//!
//! Construction validates the tables once. After that, [`tokenize`] is total: any
//! input, however malformed, produces a gap-free token sequence.

pub mod engine;
pub mod grammar;
pub mod rule;
pub mod token;

pub use engine::{tokenize, Lexer};
pub use grammar::{Grammar, GrammarBuilder, GrammarError, State, StateId};
pub use rule::{words, Rule};
pub use token::{Token, TokenCategory};
