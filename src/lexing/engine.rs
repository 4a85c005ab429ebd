//! The scanning loop
//!
//! [`Lexer`] walks the input once, asking the state on top of its stack for the
//! first rule that matches at the cursor, emitting that rule's tokens and applying
//! its transition. When nothing matches, one character is emitted as plain text.
//! Each step therefore consumes at least one character and the scan always ends,
//! whatever the input looks like.
//!
//! Sub-states left open at end of input are dropped silently: a highlighter must
//! produce output for half-written files too.

use super::grammar::{Grammar, StateId};
use super::rule::{Action, CompiledRule, CompiledTransition};
use super::token::{Token, TokenCategory};
use log::{trace, warn};
use std::collections::VecDeque;

/// Tokenize `source` with `grammar`.
///
/// The result covers the input exactly: concatenating the token texts gives back
/// `source`, and spans are contiguous and increasing.
pub fn tokenize<'a>(grammar: &Grammar, source: &'a str) -> Vec<Token<'a>> {
    Lexer::new(grammar, source).collect()
}

/// Streaming tokenizer over one source text.
///
/// Owns the cursor and state stack of a single scan; the grammar is only borrowed.
pub struct Lexer<'g, 'a> {
    grammar: &'g Grammar,
    source: &'a str,
    cursor: usize,
    stack: Vec<StateId>,
    pending: VecDeque<Token<'a>>,
}

impl<'g, 'a> Lexer<'g, 'a> {
    pub fn new(grammar: &'g Grammar, source: &'a str) -> Self {
        Self {
            grammar,
            source,
            cursor: 0,
            stack: vec![grammar.entry()],
            pending: VecDeque::new(),
        }
    }

    /// Name of the state currently on top of the stack
    pub fn current_state(&self) -> &'g str {
        self.grammar.state(self.top()).name()
    }

    /// Number of open states, the entry state included
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn top(&self) -> StateId {
        // the entry state is never popped
        self.stack[self.stack.len() - 1]
    }

    fn at_line_start(&self) -> bool {
        self.cursor == 0 || self.source.as_bytes()[self.cursor - 1] == b'\n'
    }

    /// Run one match-emit-advance step
    fn step(&mut self) {
        let (grammar, source) = (self.grammar, self.source);
        let rest = &source[self.cursor..];
        let line_start = self.at_line_start();

        for rule in &grammar.state(self.top()).rules {
            if rule.line_start && !line_start {
                continue;
            }
            let Some(captures) = rule.pattern.captures(rest) else {
                continue;
            };
            let Some(whole) = captures.get(0) else {
                continue;
            };
            if whole.is_empty() {
                warn!(
                    "skipping zero-width match of `{}` in state '{}'",
                    rule.pattern.as_str(),
                    self.current_state()
                );
                continue;
            }
            if let Some(lookahead) = &rule.followed_by {
                if !lookahead.is_match(&rest[whole.end()..]) {
                    continue;
                }
            }

            let start = self.cursor;
            let end = start + whole.end();
            self.emit_match(rule, &captures, start, end);
            self.cursor = end;
            self.apply(rule.transition);
            return;
        }

        let width = rest.chars().next().map_or(1, char::len_utf8);
        self.emit(TokenCategory::PlainText, self.cursor, self.cursor + width);
        self.cursor += width;
    }

    fn emit_match(
        &mut self,
        rule: &CompiledRule,
        captures: &regex::Captures<'_>,
        start: usize,
        end: usize,
    ) {
        match &rule.action {
            Action::Token(category) => self.emit(*category, start, end),
            Action::Groups(categories) => {
                let mut position = start;
                for (index, category) in categories.iter().enumerate() {
                    let Some(group) = captures.get(index + 1) else {
                        continue;
                    };
                    let (group_start, group_end) = (start + group.start(), start + group.end());
                    // empty and nested groups
                    if group_start == group_end || group_start < position {
                        continue;
                    }
                    if group_start > position {
                        self.emit(TokenCategory::PlainText, position, group_start);
                    }
                    self.emit(*category, group_start, group_end);
                    position = group_end;
                }
                if position < end {
                    self.emit(TokenCategory::PlainText, position, end);
                }
            }
        }
    }

    fn apply(&mut self, transition: CompiledTransition) {
        match transition {
            CompiledTransition::Stay => {}
            CompiledTransition::Push(state) => {
                self.stack.push(state);
                trace!("push '{}' at {}", self.current_state(), self.cursor);
            }
            CompiledTransition::Pop => {
                if self.stack.len() > 1 {
                    trace!("pop '{}' at {}", self.current_state(), self.cursor);
                    self.stack.pop();
                }
            }
        }
    }

    fn emit(&mut self, category: TokenCategory, start: usize, end: usize) {
        self.pending
            .push_back(Token::new(category, &self.source[start..end], start..end));
    }
}

impl<'g, 'a> Iterator for Lexer<'g, 'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() && self.cursor < self.source.len() {
            self.step();
        }
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::{Grammar, Rule};
    use TokenCategory::*;

    /// `[a, b]` style lists, with a state for the bracketed part
    fn bracket_grammar() -> Grammar {
        Grammar::builder("brackets", "root")
            .state(
                "root",
                [
                    Rule::new(r"\s+").token(Whitespace),
                    Rule::new(r"(let)(\s+)")
                        .line_start()
                        .groups([Keyword, Whitespace]),
                    Rule::new(r"\[").token(Punctuation).push("list"),
                    Rule::new(r"\w+").token(Variable),
                ],
            )
            .state(
                "list",
                [
                    Rule::new(r"\]").token(Punctuation).pop(),
                    Rule::new(r"(\w+)(,)?").groups([StringLiteral, Punctuation]),
                    Rule::new(r"[ ]+").token(Whitespace),
                ],
            )
            .build()
            .unwrap()
    }

    fn kinds(tokens: &[Token<'_>]) -> Vec<(TokenCategory, String)> {
        tokens
            .iter()
            .map(|t| (t.category, t.text.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize(&bracket_grammar(), "").is_empty());
    }

    #[test]
    fn test_push_and_pop() {
        let tokens = tokenize(&bracket_grammar(), "x [a, b] y");
        assert_eq!(
            kinds(&tokens),
            vec![
                (Variable, "x".into()),
                (Whitespace, " ".into()),
                (Punctuation, "[".into()),
                (StringLiteral, "a".into()),
                (Punctuation, ",".into()),
                (Whitespace, " ".into()),
                (StringLiteral, "b".into()),
                (Punctuation, "]".into()),
                (Whitespace, " ".into()),
                (Variable, "y".into()),
            ]
        );
    }

    #[test]
    fn test_line_start_rules() {
        let tokens = tokenize(&bracket_grammar(), "let x\nlet y let");
        assert_eq!(tokens[0].category, Keyword);
        assert_eq!(tokens[4].text, "let");
        assert_eq!(tokens[4].category, Keyword);
        // not at the start of a line
        assert_eq!(tokens.last().map(|t| t.category), Some(Variable));
    }

    #[test]
    fn test_unmatched_input_falls_back_to_plain_text() {
        let tokens = tokenize(&bracket_grammar(), "x?é");
        assert_eq!(
            kinds(&tokens),
            vec![
                (Variable, "x".into()),
                (PlainText, "?".into()),
                (Variable, "é".into()),
            ]
        );

        let tokens = tokenize(&bracket_grammar(), "[!]");
        assert_eq!(tokens[1], Token::new(PlainText, "!", 1..2));
    }

    #[test]
    fn test_unterminated_state_is_discarded() {
        let grammar = bracket_grammar();
        let mut lexer = Lexer::new(&grammar, "[a, b");
        let tokens: Vec<_> = lexer.by_ref().collect();
        assert_eq!(tokens.len(), 5);
        assert_eq!(lexer.current_state(), "list");
        assert_eq!(lexer.depth(), 2);
    }

    #[test]
    fn test_spans_are_contiguous() {
        let source = "let a [b, c]\n  d ?? [e";
        let tokens = tokenize(&bracket_grammar(), source);
        let mut position = 0;
        for token in &tokens {
            assert_eq!(token.span.start, position);
            assert_eq!(&source[token.span.clone()], token.text);
            position = token.span.end;
        }
        assert_eq!(position, source.len());
    }

    #[test]
    fn test_uncaptured_text_inside_a_match_is_kept() {
        let grammar = Grammar::builder("gaps", "root")
            .state("root", [Rule::new(r"(a)-(b)").groups([Keyword, Keyword])])
            .build()
            .unwrap();
        let tokens = tokenize(&grammar, "a-b");
        assert_eq!(
            kinds(&tokens),
            vec![
                (Keyword, "a".into()),
                (PlainText, "-".into()),
                (Keyword, "b".into()),
            ]
        );
    }

    #[test]
    fn test_followed_by_does_not_consume() {
        let grammar = Grammar::builder("peek", "root")
            .state(
                "root",
                [
                    Rule::new("on").followed_by("[ ]*$").token(Constant),
                    Rule::new(r"\w+").token(Error),
                    Rule::new(" +").token(Whitespace),
                ],
            )
            .build()
            .unwrap();

        let tokens = tokenize(&grammar, "on  ");
        assert_eq!(tokens[0], Token::new(Constant, "on", 0..2));
        assert_eq!(tokens[1], Token::new(Whitespace, "  ", 2..4));

        let tokens = tokenize(&grammar, "onward");
        assert_eq!(tokens, vec![Token::new(Error, "onward", 0..6)]);
    }
}
