//! Explicit translation calls written by template authors.
//!
//! Code embedded in a template may already call the lookup function
//! directly, as in `_('Hello!')`. Those string literals are msgids even
//! though the surrounding code is never rewritten.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::error::{Error, Result};

/// `_('...')` with `\'` allowed inside the literal.
static SINGLE_QUOTED_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"_\('((?:[^']|\\')+)'\)"#).unwrap());

/// `_('...')` or `_("...")`, as found in script blocks.
static SCRIPT_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"_\((?:'((?:[^']|\\')+)'|"((?:[^"]|\\")+)")\)"#).unwrap()
});

/// Quote character delimiting a call literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

/// One `_(<literal>)` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallLiteral<'a> {
    /// Literal body as written, without the quotes.
    pub raw: &'a str,
    pub quote: Quote,
    /// Byte range of the whole call inside the scanned text.
    pub call: Range<usize>,
}

impl CallLiteral<'_> {
    /// Decode with single-quoted Ruby rules: only `\\` and `\'` are escapes.
    pub fn decode_ruby(&self) -> String {
        let mut decoded = String::with_capacity(self.raw.len());
        let mut chars = self.raw.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\'
                && let Some(&next) = chars.peek()
                && matches!(next, '\\' | '\'')
            {
                decoded.push(next);
                chars.next();
                continue;
            }
            decoded.push(c);
        }
        decoded
    }

    /// Decode with script string rules (JSON escapes plus `\'`).
    ///
    /// Fails with [`Error::MalformedLiteral`] on an escape sequence that
    /// JSON does not define, such as `\x41`.
    pub fn decode_script(&self) -> Result<String> {
        let mut json = String::with_capacity(self.raw.len() + 2);
        json.push('"');
        let mut chars = self.raw.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('\'') => json.push('\''),
                    Some(next) => {
                        json.push('\\');
                        json.push(next);
                    }
                    None => json.push_str("\\\\"),
                },
                '"' => json.push_str("\\\""),
                '\t' => json.push_str("\\t"),
                c => json.push(c),
            }
        }
        json.push('"');

        serde_json::from_str::<String>(&json).map_err(|e| Error::MalformedLiteral {
            literal: self.raw.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Single-quoted `_('...')` calls in Ruby code (tag values, attribute hashes).
pub fn single_quoted_calls(code: &str) -> impl Iterator<Item = CallLiteral<'_>> {
    SINGLE_QUOTED_CALL_REGEX.captures_iter(code).filter_map(|caps| {
        let call = caps.get(0)?;
        let body = caps.get(1)?;
        Some(CallLiteral {
            raw: body.as_str(),
            quote: Quote::Single,
            call: call.range(),
        })
    })
}

/// Single- and double-quoted calls in script code.
pub fn script_calls(code: &str) -> impl Iterator<Item = CallLiteral<'_>> {
    SCRIPT_CALL_REGEX.captures_iter(code).filter_map(|caps| {
        let call = caps.get(0)?;
        let (body, quote) = match (caps.get(1), caps.get(2)) {
            (Some(body), _) => (body, Quote::Single),
            (None, Some(body)) => (body, Quote::Double),
            (None, None) => return None,
        };
        Some(CallLiteral {
            raw: body.as_str(),
            quote,
            call: call.range(),
        })
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ruby_msgids(code: &str) -> Vec<String> {
        single_quoted_calls(code).map(|l| l.decode_ruby()).collect()
    }

    fn script_msgids(code: &str) -> Vec<Result<String>> {
        script_calls(code).map(|l| l.decode_script()).collect()
    }

    #[test]
    fn test_single_quoted_call() {
        assert_eq!(ruby_msgids("_('Hello!')"), vec!["Hello!"]);
        assert_eq!(
            ruby_msgids("link_to _('Home'), root_path, title: _('Go home')"),
            vec!["Home", "Go home"]
        );
    }

    #[test]
    fn test_single_quoted_call_ignores_double_quotes_and_empty() {
        assert!(ruby_msgids(r#"_("Hello!")"#).is_empty());
        assert!(ruby_msgids("_('')").is_empty());
        assert!(ruby_msgids("t('Hello')").is_empty());
    }

    #[test]
    fn test_single_quoted_escapes() {
        assert_eq!(ruby_msgids(r"_('L\'article')"), vec!["L'article"]);
        assert_eq!(ruby_msgids(r"_('a\\b\nc')"), vec![r"a\b\nc"]);
    }

    #[test]
    fn test_call_range() {
        let code = "= link_to _('Home'), '/'";
        let lit = single_quoted_calls(code).next().unwrap();
        assert_eq!(&code[lit.call.clone()], "_('Home')");
        assert_eq!(lit.quote, Quote::Single);
    }

    #[test]
    fn test_script_calls_both_quotes() {
        let code = r#"var a = _('First'), b = _("Second");"#;
        let found: Vec<_> = script_calls(code).map(|l| (l.raw, l.quote)).collect();
        assert_eq!(
            found,
            vec![("First", Quote::Single), ("Second", Quote::Double)]
        );
    }

    #[test]
    fn test_script_decode_quotes() {
        assert_eq!(
            script_msgids(r#"_("Don't you think?")"#),
            vec![Ok("Don't you think?".to_string())]
        );
        assert_eq!(
            script_msgids(r#"_('One "quote" here')"#),
            vec![Ok(r#"One "quote" here"#.to_string())]
        );
        assert_eq!(
            script_msgids(r"_('L\'article')"),
            vec![Ok("L'article".to_string())]
        );
        assert_eq!(
            script_msgids(r#"_("Say \"hi\"")"#),
            vec![Ok(r#"Say "hi""#.to_string())]
        );
    }

    #[test]
    fn test_script_decode_json_escapes() {
        assert_eq!(
            script_msgids(r"_('café\n')"),
            vec![Ok("café\n".to_string())]
        );
    }

    #[test]
    fn test_script_malformed_literal() {
        let results = script_msgids(r"_('bad \x41 escape') + _('good')");
        assert_eq!(results.len(), 2);
        assert!(matches!(
            &results[0],
            Err(Error::MalformedLiteral { literal, .. }) if literal == r"bad \x41 escape"
        ));
        assert_eq!(results[1], Ok("good".to_string()));
    }
}
