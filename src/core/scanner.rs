//! Balanced-delimiter scanner shared by the rewriter and the Haml parser.
//!
//! An interpolation marker is the sigil `#` followed by an open delimiter
//! (`#{` for Haml). A marker preceded by an odd number of backslashes is
//! escaped and stands for itself; an even number (including zero) starts an
//! embedded expression whose extent is found by balancing delimiters.

use super::error::{Error, Result};

/// Sigil introducing an interpolation marker.
pub const MARKER_SIGIL: char = '#';

/// Character that escapes a marker.
pub const ESCAPE_CHAR: char = '\\';

/// One step of [`next_escape`].
///
/// Borrowed from the scanned text; only lives for a single scan step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch<'a> {
    /// Literal text between the scan start and the escape run before the marker.
    pub prefix: &'a str,
    /// Number of escape characters immediately before the marker.
    pub escapes: usize,
    /// Text between the outer delimiters, `None` when the marker is escaped.
    pub content: Option<&'a str>,
    /// Byte offset of the marker sigil.
    pub marker_offset: usize,
    /// Byte offset where the next scan step starts.
    pub end: usize,
}

impl ScanMatch<'_> {
    /// Odd escape count: the marker is literal text.
    pub fn is_escaped(&self) -> bool {
        self.escapes % 2 == 1
    }
}

/// Find the next interpolation marker in `text` at or after `start`.
///
/// Returns `Ok(None)` when no marker is left. An unescaped marker whose
/// delimiters never balance is an [`Error::UnbalancedDelimiter`].
///
/// # Examples
///
/// ```
/// use haml_i18n::core::scanner::next_escape;
///
/// let m = next_escape("Hi #{user.name}!", '{', '}', 0).unwrap().unwrap();
/// assert_eq!(m.prefix, "Hi ");
/// assert_eq!(m.content, Some("user.name"));
/// assert_eq!(&"Hi #{user.name}!"[m.end..], "!");
/// ```
pub fn next_escape(
    text: &str,
    open: char,
    close: char,
    start: usize,
) -> Result<Option<ScanMatch<'_>>> {
    let Some(rest) = text.get(start..) else {
        return Ok(None);
    };

    let mut search_from = 0;
    while let Some(found) = rest[search_from..].find(MARKER_SIGIL) {
        let sigil = start + search_from + found;
        let after_sigil = sigil + MARKER_SIGIL.len_utf8();

        if !text[after_sigil..].starts_with(open) {
            search_from = after_sigil - start;
            continue;
        }

        let escapes = text[start..sigil]
            .chars()
            .rev()
            .take_while(|c| *c == ESCAPE_CHAR)
            .count();
        let prefix = &text[start..sigil - escapes * ESCAPE_CHAR.len_utf8()];
        let inner_start = after_sigil + open.len_utf8();

        if escapes % 2 == 1 {
            return Ok(Some(ScanMatch {
                prefix,
                escapes,
                content: None,
                marker_offset: sigil,
                end: inner_start,
            }));
        }

        let close_at = balance(text, open, close, inner_start)
            .ok_or(Error::UnbalancedDelimiter { offset: sigil })?;

        return Ok(Some(ScanMatch {
            prefix,
            escapes,
            content: Some(&text[inner_start..close_at]),
            marker_offset: sigil,
            end: close_at + close.len_utf8(),
        }));
    }

    Ok(None)
}

/// Find the closing delimiter matching an already consumed `open`.
///
/// Scanning starts at byte `from` with a nesting depth of one. Returns the
/// byte offset of the matching `close`, or `None` if the text ends first.
pub fn balance(text: &str, open: char, close: char, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (idx, c) in text.get(from..)?.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(from + idx);
            }
        }
    }
    None
}
