//! Grammars: named sets of lexer states
//!
//! A grammar is assembled with [`GrammarBuilder`] from declarative [`Rule`]s and
//! validated as a whole when [`GrammarBuilder::build`] runs. Every defect in the
//! rule tables (bad pattern, zero-width pattern, push to a state that does not
//! exist) is reported there, so a built [`Grammar`] can be scanned without any
//! failure path.

use super::rule::{CompiledRule, CompiledTransition, Rule};
use log::debug;
use std::collections::HashMap;
use thiserror::Error;

/// Index of a state inside its grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(pub(crate) usize);

/// Defects found in a grammar's rule tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("state '{state}': invalid pattern `{pattern}`: {message}")]
    InvalidPattern {
        state: String,
        pattern: String,
        message: String,
    },

    #[error("state '{state}': pattern `{pattern}` can match without consuming input")]
    ZeroWidth { state: String, pattern: String },

    #[error("state '{state}': pattern `{pattern}` has {groups} capture groups but maps {categories} categories")]
    GroupMismatch {
        state: String,
        pattern: String,
        groups: usize,
        categories: usize,
    },

    #[error("state '{state}': push to undefined state '{target}'")]
    UndefinedState { state: String, target: String },

    #[error("state '{0}' is declared more than once")]
    DuplicateState(String),

    #[error("entry state '{0}' is not declared")]
    MissingEntry(String),

    #[error("entry state '{0}' cannot pop")]
    PopFromEntry(String),
}

/// A named, ordered list of compiled rules
#[derive(Debug, Clone)]
pub struct State {
    name: String,
    pub(crate) rules: Vec<CompiledRule>,
}

impl State {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

/// An immutable, validated grammar.
///
/// Grammars hold no per-scan data and can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: String,
    entry: StateId,
    states: Vec<State>,
}

impl Grammar {
    pub fn builder(name: impl Into<String>, entry: impl Into<String>) -> GrammarBuilder {
        GrammarBuilder::new(name, entry)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry(&self) -> StateId {
        self.entry
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }
}

/// Collects state declarations and validates them into a [`Grammar`]
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    name: String,
    entry: String,
    states: Vec<(String, Vec<Rule>)>,
}

impl GrammarBuilder {
    pub fn new(name: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry: entry.into(),
            states: Vec::new(),
        }
    }

    /// Declare a state. Rules are tried in the order given.
    pub fn state(mut self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.states.push((name.into(), rules.into_iter().collect()));
        self
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        let mut ids: HashMap<&str, StateId> = HashMap::new();
        for (index, (name, _)) in self.states.iter().enumerate() {
            if ids.insert(name.as_str(), StateId(index)).is_some() {
                return Err(GrammarError::DuplicateState(name.clone()));
            }
        }

        let entry = *ids
            .get(self.entry.as_str())
            .ok_or_else(|| GrammarError::MissingEntry(self.entry.clone()))?;

        let mut states = Vec::with_capacity(self.states.len());
        for (name, rules) in &self.states {
            let compiled = rules
                .iter()
                .map(|rule| rule.compile(name, |target| ids.get(target).copied()))
                .collect::<Result<Vec<_>, _>>()?;

            if ids[name.as_str()] == entry
                && compiled
                    .iter()
                    .any(|rule| rule.transition == CompiledTransition::Pop)
            {
                return Err(GrammarError::PopFromEntry(name.clone()));
            }

            states.push(State {
                name: name.clone(),
                rules: compiled,
            });
        }

        debug!(
            "built grammar '{}': {} states, {} rules",
            self.name,
            states.len(),
            states.iter().map(State::rule_count).sum::<usize>()
        );

        Ok(Grammar {
            name: self.name,
            entry,
            states,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::TokenCategory;

    fn word() -> Rule {
        Rule::new(r"\w+").token(TokenCategory::PlainText)
    }

    #[test]
    fn test_build_resolves_states() {
        let grammar = Grammar::builder("demo", "root")
            .state("root", [Rule::new(r"\[").push("inner"), word()])
            .state("inner", [Rule::new(r"\]").pop(), word()])
            .build()
            .unwrap();

        assert_eq!(grammar.name(), "demo");
        assert_eq!(grammar.state(grammar.entry()).name(), "root");
        let names: Vec<_> = grammar.states().map(State::name).collect();
        assert_eq!(names, ["root", "inner"]);
    }

    #[test]
    fn test_build_rejects_missing_entry() {
        let err = Grammar::builder("demo", "start")
            .state("root", [word()])
            .build()
            .unwrap_err();
        assert_eq!(err, GrammarError::MissingEntry("start".to_string()));
    }

    #[test]
    fn test_build_rejects_duplicate_state() {
        let err = Grammar::builder("demo", "root")
            .state("root", [word()])
            .state("root", [word()])
            .build()
            .unwrap_err();
        assert_eq!(err, GrammarError::DuplicateState("root".to_string()));
    }

    #[test]
    fn test_build_rejects_pop_from_entry() {
        let err = Grammar::builder("demo", "root")
            .state("root", [Rule::new("\n").pop()])
            .build()
            .unwrap_err();
        assert_eq!(err, GrammarError::PopFromEntry("root".to_string()));
    }

    #[test]
    fn test_build_reports_rule_errors() {
        let err = Grammar::builder("demo", "root")
            .state("root", [Rule::new("x").push("missing")])
            .build()
            .unwrap_err();
        assert!(matches!(err, GrammarError::UndefinedState { .. }));
        assert_eq!(
            err.to_string(),
            "state 'root': push to undefined state 'missing'"
        );
    }

    #[test]
    fn test_grammar_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Grammar>();
    }
}
