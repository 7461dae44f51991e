//! Directive comments excluding template lines from translation.
//!
//! Directives are Haml silent comments:
//! - `-# i18n-disable-next-line` - skip the following line
//! - `-# i18n-disable` / `-# i18n-enable` - range-based disabling
//!
//! A skipped line is neither extracted nor rewritten.

use std::collections::HashSet;

/// Parsed i18n directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Disable,
    Enable,
    DisableNextLine,
}

impl Directive {
    /// Parse directive from comment text.
    /// Returns None if not an i18n directive.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let word = text.split_whitespace().next()?;

        match word {
            "i18n-disable-next-line" => Some(Self::DisableNextLine),
            "i18n-disable" => Some(Self::Disable),
            "i18n-enable" => Some(Self::Enable),
            _ => None,
        }
    }
}

/// Range representing disabled lines [start, end] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DisabledRange {
    start: usize,
    end: usize, // usize::MAX for open-ended
}

/// Disabled lines of a single template.
///
/// Built incrementally while the template is parsed: feed every silent
/// comment to [`DisableContext::record`], then call
/// [`DisableContext::finish`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisableContext {
    disabled_lines: HashSet<usize>,
    disabled_ranges: Vec<DisabledRange>,
    open_range: Option<usize>,
}

impl DisableContext {
    /// Check if a line is excluded from translation.
    pub fn is_disabled(&self, line: usize) -> bool {
        if self.disabled_lines.contains(&line) {
            return true;
        }
        if let Some(start) = self.open_range
            && line >= start
        {
            return true;
        }
        self.disabled_ranges
            .iter()
            .any(|r| line >= r.start && line <= r.end)
    }

    /// Record the comment `text` found on `line`.
    pub fn record(&mut self, line: usize, text: &str) {
        match Directive::parse(text) {
            Some(Directive::DisableNextLine) => {
                self.disabled_lines.insert(line + 1);
            }
            Some(Directive::Disable) => {
                // Only start a new range if not already open
                self.open_range.get_or_insert(line);
            }
            Some(Directive::Enable) => {
                if let Some(start) = self.open_range.take() {
                    self.disabled_ranges.push(DisabledRange {
                        start,
                        end: line.saturating_sub(1),
                    });
                }
            }
            None => {}
        }
    }

    /// Close a range left open (extends to end of file).
    pub fn finish(&mut self) {
        if let Some(start) = self.open_range.take() {
            self.disabled_ranges.push(DisabledRange {
                start,
                end: usize::MAX,
            });
        }
    }
}
