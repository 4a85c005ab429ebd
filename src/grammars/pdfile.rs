//! Grammar for pdfiles, the declarative VM build/description format
//!
//! A pdfile is line oriented: each line starts with a directive keyword followed by
//! its arguments.
//!
//! ```text
//! FROM catalog.example.com AS golden
//! AUTHENTICATE USERNAME admin
//! PROVIDER NAME=aws-s3; BUCKET=images; REGION=eu-west-1
//! TAG ubuntu,lts,arm64
//! FORCE true
//! RUN echo "provisioning" \
//!     && ./setup.sh
//! ```
//!
//! States:
//!
//! - `root`: directives. Closed-value directives get a pair of rules, the accepted
//!   values first and a catch-all error rule second.
//! - `provider-attributes`: `KEY=VALUE;` pairs after `PROVIDER`.
//! - `comma-list`: `a,b,c` after `TAG`, `ROLE` and `CLAIM`.
//! - `shell-command-body`: the command after `RUN`, `DO` and `EXECUTE`, including
//!   backslash continuations.
//!
//! Every sub-state ends at the end of its line or at a `#` comment.

use crate::lexing::{words, Grammar, GrammarError, Rule, TokenCategory::*};

pub const NAME: &str = "pdfile";

pub const ROOT: &str = "root";
pub const PROVIDER_ATTRIBUTES: &str = "provider-attributes";
pub const COMMA_LIST: &str = "comma-list";
pub const SHELL_COMMAND_BODY: &str = "shell-command-body";

/// Every directive keyword
pub const KEYWORDS: &[&str] = &[
    "TO",
    "FROM",
    "INSECURE",
    "AUTHENTICATE",
    "PROVIDER",
    "LOCAL_PATH",
    "DESCRIPTION",
    "TAG",
    "ROLE",
    "CLAIM",
    "CATALOG_ID",
    "VERSION",
    "ARCHITECTURE",
    "MACHINE_NAME",
    "OWNER",
    "DESTINATION",
    "START_AFTER_PULL",
    "DO",
    "MINIMUM_REQUIREMENT",
    "COMPRESS_PACK",
    "COMPRESS_PACK_LEVEL",
    "VM_REMOTE_PATH",
    "FORCE",
    "VM_SIZE",
    "VM_TYPE",
    "IS_COMPRESSED",
    "EXECUTE",
    "CLONE",
    "RUN",
];

pub const CREDENTIAL_FIELDS: &[&str] = &[
    "USERNAME",
    "PASSWORD",
    "NAME",
    "BUCKET",
    "REGION",
    "ACCESS_KEY",
    "SECRET_KEY",
];

pub const RESOURCES: &[&str] = &["CPU", "RAM", "DISK", "MEMORY"];

pub const BOOLEANS: &[&str] = &["true", "false"];

pub const COMPRESSION_LEVELS: &[&str] = &[
    "default",
    "balanced",
    "best_speed",
    "best_compression",
    "no_compression",
];

pub const VM_TYPES: &[&str] = &["pvm", "macvm"];

/// Directives of the form `DIRECTIVE FIELD value`, with a closed set of fields
pub const FIELD_DIRECTIVES: &[(&str, &[&str])] = &[
    ("AUTHENTICATE", CREDENTIAL_FIELDS),
    ("PROVIDER", CREDENTIAL_FIELDS),
    ("MINIMUM_REQUIREMENT", RESOURCES),
];

/// Directives whose single argument comes from a closed set
pub const VALUE_DIRECTIVES: &[(&str, &[&str])] = &[
    ("FORCE", BOOLEANS),
    ("COMPRESS_PACK_LEVEL", COMPRESSION_LEVELS),
    ("COMPRESS_PACK", BOOLEANS),
    ("IS_COMPRESSED", BOOLEANS),
    ("VM_TYPE", VM_TYPES),
];

/// Directives taking a comma-separated list
pub const LIST_DIRECTIVES: &[&str] = &["TAG", "ROLE", "CLAIM"];

/// Directives whose argument is a shell command
pub const SHELL_DIRECTIVES: &[&str] = &["RUN", "DO", "EXECUTE"];

/// The only shell directive that may be deferred with `ONBUILD`
pub const ONBUILD_DIRECTIVE: &str = "RUN";

/// Directive that switches to `KEY=VALUE` attributes when its line contains `=`
pub const ATTRIBUTE_DIRECTIVE: &str = "PROVIDER";

/// End of the line, possibly after trailing blanks or before a comment
const LINE_END: &str = r"[ \t\r]*(?:#|$)";

/// A directive argument: the rest of the line up to a comment, without the
/// trailing blanks
const ARGUMENT: &str = r"[^#\s](?:[^#\n]*[^#\s])?";

pub fn build() -> Result<Grammar, GrammarError> {
    Grammar::builder(NAME, ROOT)
        .state(ROOT, root_rules())
        .state(PROVIDER_ATTRIBUTES, provider_attribute_rules())
        .state(COMMA_LIST, comma_list_rules())
        .state(SHELL_COMMAND_BODY, shell_command_rules())
        .build()
}

/// Directive rule: line anchored and case insensitive
fn directive(pattern: String) -> Rule {
    Rule::new(pattern).line_start().ignore_case()
}

fn root_rules() -> Vec<Rule> {
    let other_shell_directives: Vec<&str> = SHELL_DIRECTIVES
        .iter()
        .copied()
        .filter(|directive| *directive != ONBUILD_DIRECTIVE)
        .collect();

    let mut rules = vec![
        Rule::new(r"\s+").token(Whitespace),
        Rule::new(r"#[^\n]*").token(Comment),
        directive(format!(
            r"((?:ONBUILD[ \t]+)?{}|{})([ \t]+)",
            ONBUILD_DIRECTIVE,
            words(&other_shell_directives)
        ))
        .groups([Keyword, Whitespace])
        .push(SHELL_COMMAND_BODY),
        directive(format!(
            r"(FROM)([ \t]+)({arg})([ \t]+)(AS)([ \t]+)({arg})",
            arg = ARGUMENT
        ))
        .groups([
            Keyword,
            Whitespace,
            StringLiteral,
            Whitespace,
            Keyword,
            Whitespace,
            StringLiteral,
        ]),
        directive(format!(r"({})([ \t]+)", ATTRIBUTE_DIRECTIVE))
            .followed_by(r"[^#\n]*=")
            .groups([Keyword, Whitespace])
            .push(PROVIDER_ATTRIBUTES),
    ];

    for (keyword, fields) in FIELD_DIRECTIVES {
        let fields = words(fields);
        rules.extend([
            directive(format!(
                r"({})([ \t]+)({})([ \t]+)({})",
                keyword, fields, ARGUMENT
            ))
            .groups([
                Keyword,
                Whitespace,
                Variable,
                Whitespace,
                StringLiteral,
            ]),
            // known field glued to something, or missing its value
            directive(format!(r"({})([ \t]+)({})([^#\n]*[^#\s])?", keyword, fields))
                .groups([Keyword, Whitespace, Error, Error]),
            directive(format!(r"({})([ \t]+)({})", keyword, ARGUMENT)).groups([
                Keyword,
                Whitespace,
                Error,
            ]),
        ]);
    }

    for (keyword, values) in VALUE_DIRECTIVES {
        rules.extend([
            directive(format!(r"({})([ \t]+)({})", keyword, words(values)))
                .followed_by(LINE_END)
                .groups([Keyword, Whitespace, Constant]),
            directive(format!(r"({})([ \t]+)({})", keyword, ARGUMENT)).groups([
                Keyword,
                Whitespace,
                Error,
            ]),
        ]);
    }

    rules.extend([
        directive(format!(r"({})([ \t]+)", words(LIST_DIRECTIVES)))
            .groups([Keyword, Whitespace])
            .push(COMMA_LIST),
        directive(format!(r"({})\b([ \t]*)({})?", words(KEYWORDS), ARGUMENT)).groups([
            Keyword,
            Whitespace,
            StringLiteral,
        ]),
        Rule::new(r"\w+").token(PlainText),
        Rule::new(r"[^\w\s]+").token(PlainText),
    ]);

    rules
}

fn provider_attribute_rules() -> Vec<Rule> {
    vec![
        Rule::new(r"#[^\n]*").token(Comment).pop(),
        Rule::new(r"\r?\n").token(Whitespace).pop(),
        Rule::new(r"[^\S\n]+").token(Whitespace),
        Rule::new(r"([A-Z0-9_-]+)(=)([^;#\s]+)(;)")
            .ignore_case()
            .groups([Variable, Operator, StringLiteral, Punctuation]),
        Rule::new(r"([A-Z0-9_-]+)(=)([^;#\s]+)")
            .ignore_case()
            .groups([Variable, Operator, StringLiteral]),
        Rule::new(r".").token(PlainText),
    ]
}

fn comma_list_rules() -> Vec<Rule> {
    vec![
        Rule::new(r"#[^\n]*").token(Comment).pop(),
        Rule::new(r"\r?\n").token(Whitespace).pop(),
        Rule::new(r"[^\S\n]+").token(Whitespace),
        Rule::new(r"([^,#\s]+)(,)").groups([Variable, Punctuation]),
        Rule::new(r"[^,#\s]+").token(Variable),
        Rule::new(r".").token(PlainText),
    ]
}

fn shell_command_rules() -> Vec<Rule> {
    vec![
        Rule::new(r"\r?\n").token(Whitespace).pop(),
        Rule::new(r"#[^\n]*").token(Comment).pop(),
        Rule::new(r"\\(?:\r?\n|.)").token(Constant),
        Rule::new(r"[^\S\n]+").token(Whitespace),
        Rule::new(r"[^\s\\#]+(?:[^\S\n]+[^\s\\#]+)*").token(StringLiteral),
    ]
}
