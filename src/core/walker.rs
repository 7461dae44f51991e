//! Extraction walker.
//!
//! Visits every translatable location of a [`Document`], normalizes it with
//! the interpolation rewriter and records the resulting msgid in a
//! [`TargetTable`]:
//!
//! | Node              | Extracted                                        |
//! |-------------------|--------------------------------------------------|
//! | plain text        | rewritten text                                   |
//! | literal tag value | rewritten value                                  |
//! | evaluated tag     | `_('...')` literals inside the code only         |
//! | attribute hashes  | `_('...')` literals                              |
//! | script lines      | nothing                                          |
//! | `:markdown`       | whole block, newlines as literal `\n`            |
//! | `:javascript`     | `_('...')` / `_("...")` literals, per line       |

use thiserror::Error;

use super::document::{Document, FilterKind, FilterNode, Node, NodeKind, TagNode};
use super::error::Error;
use super::interpolation::rewrite;
use super::literal::{script_calls, single_quoted_calls};
use super::targets::{Location, TargetTable};

/// A fragment of the document could not be rewritten; the document yields
/// no targets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}:{column}: {source}")]
pub struct WalkError {
    pub file: String,
    pub line: usize,
    /// 1-based character column.
    pub column: usize,
    pub source: Error,
}

impl WalkError {
    /// Error of the fragment `text` starting at `column` of `line`.
    pub fn in_fragment(file: &str, line: usize, column: usize, text: &str, source: Error) -> Self {
        let offset = match source {
            Error::UnbalancedDelimiter { offset } => offset,
            _ => 0,
        };
        WalkError {
            file: file.to_string(),
            line,
            column: column + text.get(..offset).map_or(0, |s| s.chars().count()),
            source,
        }
    }
}

/// Explicit translation literal skipped because it could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralWarning {
    pub line: usize,
    /// 1-based character column of the call.
    pub column: usize,
    pub error: Error,
}

/// Targets of one document.
#[derive(Debug, Default)]
pub struct Extraction {
    pub targets: TargetTable,
    pub warnings: Vec<LiteralWarning>,
}

/// Walk `doc` into a fresh table.
pub fn walk(doc: &Document) -> Result<Extraction, WalkError> {
    let mut walker = Walker {
        doc,
        extraction: Extraction::default(),
    };
    for node in &doc.nodes {
        if doc.directives.is_disabled(node.line) {
            continue;
        }
        walker.visit(node)?;
    }
    Ok(walker.extraction)
}

/// Walk `doc` and merge its targets into `table`.
///
/// `table` is left untouched when the walk fails.
pub fn walk_into(doc: &Document, table: &mut TargetTable) -> Result<Vec<LiteralWarning>, WalkError> {
    let Extraction { targets, warnings } = walk(doc)?;
    table.merge(targets);
    Ok(warnings)
}

struct Walker<'a> {
    doc: &'a Document,
    extraction: Extraction,
}

impl Walker<'_> {
    fn visit(&mut self, node: &Node) -> Result<(), WalkError> {
        match &node.kind {
            NodeKind::Plain(plain) => self.add_rewritten(&plain.text, node.line, plain.column),
            NodeKind::Tag(tag) => self.visit_tag(tag, node.line),
            NodeKind::Attributes(attributes) => {
                for hash in &attributes.hashes {
                    self.add_ruby_literals(hash, node.line);
                }
                Ok(())
            }
            // explicit calls in script lines are not scanned
            NodeKind::Script(_) => Ok(()),
            NodeKind::Filter(filter) => {
                self.visit_filter(filter, node.line);
                Ok(())
            }
        }
    }

    fn visit_tag(&mut self, tag: &TagNode, line: usize) -> Result<(), WalkError> {
        if tag.is_evaluated() {
            self.add_ruby_literals(&tag.value, line);
            Ok(())
        } else {
            self.add_rewritten(&tag.value, line, tag.column)
        }
    }

    fn visit_filter(&mut self, filter: &FilterNode, line: usize) {
        match filter.kind {
            FilterKind::Markdown => {
                let text = filter.collapsed_text();
                self.add(&text, line);
            }
            FilterKind::Javascript => {
                let indent = filter.indent.chars().count();
                for (offset, code) in filter.text.split('\n').enumerate() {
                    let lineno = line + offset + 1;
                    for literal in script_calls(code) {
                        match literal.decode_script() {
                            Ok(msgid) => self.add(&msgid, lineno),
                            Err(error) => self.extraction.warnings.push(LiteralWarning {
                                line: lineno,
                                column: indent + code[..literal.call.start].chars().count() + 1,
                                error,
                            }),
                        }
                    }
                }
            }
            FilterKind::Other(_) => {}
        }
    }

    fn add_rewritten(&mut self, text: &str, line: usize, column: usize) -> Result<(), WalkError> {
        let result = rewrite(text, false)
            .map_err(|source| WalkError::in_fragment(&self.doc.name, line, column, text, source))?;
        self.add(&result.template, line);
        Ok(())
    }

    fn add_ruby_literals(&mut self, code: &str, line: usize) {
        for literal in single_quoted_calls(code) {
            self.add(&literal.decode_ruby(), line);
        }
    }

    fn add(&mut self, text: &str, line: usize) {
        self.extraction
            .targets
            .add_target(text, Location::new(self.doc.name.as_str(), line));
    }
}
