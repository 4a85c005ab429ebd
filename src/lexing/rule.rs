//! Lexer rules
//!
//! A rule pairs a regex pattern with an action. Rules are declared as plain data
//! (pattern text, capture-to-category mapping, state transition) and compiled once
//! when the owning grammar is built. The engine never sees the declaration form.
//!
//! ## Anchoring
//!
//! Every pattern is anchored at the cursor: it must match a prefix of the remaining
//! input. Rules marked with [`Rule::line_start`] additionally only apply when the
//! cursor sits at the beginning of a line.
//!
//! The `regex` crate has no look-around, so a rule that needs to peek past its own
//! match declares that requirement with [`Rule::followed_by`]. The check runs
//! against the input directly after the match and never consumes anything.

use super::grammar::{GrammarError, StateId};
use super::token::TokenCategory;
use regex::{Regex, RegexBuilder};

/// What a rule emits for the text it matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    /// The whole match becomes one token
    Token(TokenCategory),
    /// One token per capture group, in group order. Empty groups emit nothing.
    Groups(Vec<TokenCategory>),
}

/// State change requested by a rule, with states referenced by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Transition {
    Stay,
    Push(String),
    Pop,
}

/// Declarative form of a lexer rule.
///
/// ```ignore
/// Rule::new(r"(TAG)([ \t]+)")
///     .line_start()
///     .ignore_case()
///     .groups([TokenCategory::Keyword, TokenCategory::Whitespace])
///     .push("comma-list");
/// ```
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    line_start: bool,
    ignore_case: bool,
    followed_by: Option<String>,
    action: Action,
    transition: Transition,
}

impl Rule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            line_start: false,
            ignore_case: false,
            followed_by: None,
            action: Action::Token(TokenCategory::PlainText),
            transition: Transition::Stay,
        }
    }

    /// Only try this rule when the cursor is at the start of a line
    pub fn line_start(mut self) -> Self {
        self.line_start = true;
        self
    }

    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Require `pattern` to match right after this rule's match, without consuming it
    pub fn followed_by(mut self, pattern: impl Into<String>) -> Self {
        self.followed_by = Some(pattern.into());
        self
    }

    pub fn token(mut self, category: TokenCategory) -> Self {
        self.action = Action::Token(category);
        self
    }

    pub fn groups(mut self, categories: impl IntoIterator<Item = TokenCategory>) -> Self {
        self.action = Action::Groups(categories.into_iter().collect());
        self
    }

    pub fn push(mut self, state: impl Into<String>) -> Self {
        self.transition = Transition::Push(state.into());
        self
    }

    pub fn pop(mut self) -> Self {
        self.transition = Transition::Pop;
        self
    }

    /// Compile the declaration. `resolve` maps a pushed state name to its id.
    pub(crate) fn compile(
        &self,
        state: &str,
        resolve: impl Fn(&str) -> Option<StateId>,
    ) -> Result<CompiledRule, GrammarError> {
        let pattern = self.anchored(&self.pattern, state)?;
        check_progress(&pattern, &self.pattern, state)?;

        if let Action::Groups(categories) = &self.action {
            let available = pattern.captures_len() - 1;
            if available != categories.len() {
                return Err(GrammarError::GroupMismatch {
                    state: state.to_string(),
                    pattern: self.pattern.clone(),
                    groups: available,
                    categories: categories.len(),
                });
            }
        }

        let followed_by = match &self.followed_by {
            Some(lookahead) => Some(self.anchored(lookahead, state)?),
            None => None,
        };

        let transition = match &self.transition {
            Transition::Stay => CompiledTransition::Stay,
            Transition::Pop => CompiledTransition::Pop,
            Transition::Push(target) => match resolve(target) {
                Some(id) => CompiledTransition::Push(id),
                None => {
                    return Err(GrammarError::UndefinedState {
                        state: state.to_string(),
                        target: target.clone(),
                    })
                }
            },
        };

        Ok(CompiledRule {
            pattern,
            line_start: self.line_start,
            followed_by,
            action: self.action.clone(),
            transition,
        })
    }

    fn anchored(&self, pattern: &str, state: &str) -> Result<Regex, GrammarError> {
        RegexBuilder::new(&format!(r"\A(?:{})", pattern))
            .multi_line(true)
            .case_insensitive(self.ignore_case)
            .build()
            .map_err(|e| GrammarError::InvalidPattern {
                state: state.to_string(),
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }
}

/// Inputs a pattern must not be able to match without consuming anything.
const PROGRESS_PROBES: &[&str] = &["", "\n", " ", "a", "0", "#", "=", "\\"];

/// Reject patterns that can succeed on an empty prefix, which would stall the
/// engine. The probes cover the empty input plus one character of each class the
/// grammars distinguish.
fn check_progress(regex: &Regex, pattern: &str, state: &str) -> Result<(), GrammarError> {
    for probe in PROGRESS_PROBES {
        if regex.find(probe).is_some_and(|m| m.is_empty()) {
            return Err(GrammarError::ZeroWidth {
                state: state.to_string(),
                pattern: pattern.to_string(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompiledTransition {
    Stay,
    Push(StateId),
    Pop,
}

/// A rule ready for scanning
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) pattern: Regex,
    pub(crate) line_start: bool,
    pub(crate) followed_by: Option<Regex>,
    pub(crate) action: Action,
    pub(crate) transition: CompiledTransition,
}

/// Build a regex alternation out of a word list.
///
/// Words are escaped and sorted longest first, so a word never loses to one of
/// its own prefixes (`import-vm` before `import`).
pub fn words(list: &[&str]) -> String {
    let mut sorted: Vec<&str> = list.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    sorted.dedup();
    let escaped: Vec<String> = sorted.iter().map(|w| regex::escape(w)).collect();
    format!("(?:{})", escaped.join("|"))
}
