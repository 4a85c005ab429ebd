//! HTML markup
//!
//! Each token becomes `<span class="{prefix}{class}">text</span>`, using the short
//! class names from [`TokenCategory::css_class`]. Whitespace is written bare so
//! line structure stays readable inside `<pre>`.

use crate::lexing::{Token, TokenCategory};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Prepended to every class name
    pub class_prefix: String,
    /// Wrap the output in `<pre class="highlight"><code>`
    pub wrap: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            class_prefix: String::new(),
            wrap: true,
        }
    }
}

pub fn render(tokens: &[Token<'_>], options: &HtmlOptions) -> String {
    let prefix = escape(&options.class_prefix);
    let mut out = String::new();
    if options.wrap {
        let _ = write!(out, r#"<pre class="{}highlight"><code>"#, prefix);
    }

    for token in tokens {
        if token.category == TokenCategory::Whitespace {
            out.push_str(&escape(token.text));
            continue;
        }
        let _ = write!(
            out,
            r#"<span class="{}{}">{}</span>"#,
            prefix,
            token.category.css_class(),
            escape(token.text)
        );
    }

    if options.wrap {
        out.push_str("</code></pre>");
    }
    out
}

/// Escape text for use in element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
