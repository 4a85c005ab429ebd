//! Grammar for `prldevops` command-line examples
//!
//! ```text
//! prldevops catalog push --file ./pdfile \
//!     --verbose
//! ```
//!
//! The program name and sub-command are highlighted; everything after the
//! sub-command is one verbatim argument run, with backslash escapes (and line
//! continuations) picked out.

use crate::lexing::{words, Grammar, GrammarError, Rule, TokenCategory::*};

pub const NAME: &str = "prldevops";

pub const ROOT: &str = "root";
pub const COMMAND_BODY: &str = "command-body";

pub const PROGRAM: &str = "prldevops";

pub const SUBCOMMANDS: &[&str] = &[
    "catalog",
    "push",
    "pull",
    "run",
    "list",
    "import",
    "import-vm",
    "api",
    "update-root-password",
    "gen-rsa",
];

pub fn build() -> Result<Grammar, GrammarError> {
    let program = regex::escape(PROGRAM);
    let subcommands = words(SUBCOMMANDS);

    Grammar::builder(NAME, ROOT)
        .state(
            ROOT,
            [
                Rule::new(r"\s+").token(Whitespace),
                Rule::new(format!(r"({})([ \t]+)({})([ \t]+)", program, subcommands))
                    .line_start()
                    .ignore_case()
                    .groups([Keyword, Whitespace, Variable, Whitespace])
                    .push(COMMAND_BODY),
                // `\b` would also stop before `-`, accepting `run-all` as `run`
                Rule::new(format!(r"({})([ \t]+)({})", program, subcommands))
                    .line_start()
                    .ignore_case()
                    .followed_by(r"[ \t\r]*(?:#|$)")
                    .groups([Keyword, Whitespace, Variable]),
                Rule::new(format!(r"{}\b", program))
                    .line_start()
                    .ignore_case()
                    .token(Keyword),
                Rule::new(r"#[^\n]*").token(Comment),
                Rule::new(r"\w+").token(PlainText),
                Rule::new(r"[^\w\s]+").token(PlainText),
            ],
        )
        .state(
            COMMAND_BODY,
            [
                Rule::new(r"\r?\n").token(Whitespace).pop(),
                Rule::new(r"\\(?:\r?\n|.)").token(Constant),
                Rule::new(r"[^\n\\]+").token(StringLiteral),
            ],
        )
        .build()
}
