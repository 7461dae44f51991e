//! Interpolation rewriter.
//!
//! Turns a fragment of template text into a format template with `%s`
//! placeholders plus the ordered list of embedded expressions:
//!
//! ```text
//! Hello #{name}! Welcome to #{place}.
//!   => template: "Hello %s! Welcome to %s."
//!      args:     ["name", "place"]
//! ```
//!
//! The template is the msgid looked up at render time and the arguments are
//! substituted back positionally.

use std::iter;

use super::error::Result;
use super::host::{HostSyntax, RubyHost};
use super::scanner::{ESCAPE_CHAR, MARKER_SIGIL, next_escape};

/// Placeholder standing for one embedded expression.
pub const PLACEHOLDER: &str = "%s";

const OPEN: char = '{';
const CLOSE: char = '}';

/// Rewritten fragment.
///
/// `args[i]` is the source of the expression filling the i-th placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpolationResult {
    pub template: String,
    pub args: Vec<String>,
}

impl InterpolationResult {
    /// True when the fragment had no translatable content at all.
    pub fn is_empty(&self) -> bool {
        self.template.is_empty() && self.args.is_empty()
    }
}

/// Rewrite `text`, wrapping every expression in an HTML-escaping call when
/// `escape_html` is set. The wrapper only changes `args`, never `template`.
///
/// # Examples
///
/// ```
/// use haml_i18n::core::interpolation::rewrite;
///
/// let result = rewrite("Hello #{name}!", false).unwrap();
/// assert_eq!(result.template, "Hello %s!");
/// assert_eq!(result.args, vec!["name".to_string()]);
/// ```
pub fn rewrite(text: &str, escape_html: bool) -> Result<InterpolationResult> {
    rewrite_with(&RubyHost, text, escape_html)
}

/// Same as [`rewrite`], with the escaping call rendered by `host`.
pub fn rewrite_with<H>(host: &H, text: &str, escape_html: bool) -> Result<InterpolationResult>
where
    H: HostSyntax + ?Sized,
{
    let mut template = String::with_capacity(text.len());
    let mut args = Vec::new();
    let mut pos = 0;

    while let Some(scan) = next_escape(text, OPEN, CLOSE, pos)? {
        template.push_str(scan.prefix);
        // each escaped pair of backslashes stands for one literal backslash
        template.extend(iter::repeat_n(ESCAPE_CHAR, scan.escapes / 2));

        match scan.content {
            None => {
                template.push(MARKER_SIGIL);
                template.push(OPEN);
            }
            Some(code) => {
                let expr = if escape_html {
                    host.escape_call(code)
                } else {
                    code.to_string()
                };
                args.push(expr);
                template.push_str(PLACEHOLDER);
            }
        }
        pos = scan.end;
    }
    template.push_str(&text[pos..]);
    chomp(&mut template);

    Ok(InterpolationResult { template, args })
}

/// Strip exactly one trailing line terminator.
fn chomp(text: &mut String) {
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    } else if text.ends_with('\n') || text.ends_with('\r') {
        text.pop();
    }
}
