//! Parsed template representation consumed by the walker and the translator.

use crate::directives::DisableContext;

/// Name given to templates read from a stream rather than a file.
pub const STREAM_SOURCE_NAME: &str = "(haml)";

/// A template split into the nodes relevant to translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// File path, or [`STREAM_SOURCE_NAME`].
    pub name: String,
    pub nodes: Vec<Node>,
    /// Lines excluded by `-# i18n-disable*` comments.
    pub directives: DisableContext,
}

/// A node and the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub line: usize,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A line of literal text.
    Plain(PlainNode),
    /// The inline value of a tag line.
    Tag(TagNode),
    /// Ruby attribute hashes of a tag line.
    Attributes(AttributesNode),
    /// `=`, `~`, `&=`, `!=` and `-` lines.
    Script(ScriptNode),
    /// A `:name` block.
    Filter(FilterNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainNode {
    pub text: String,
    /// Escaping forced by a `& ` (true) or `! ` (false) prefix.
    pub escape: Option<bool>,
    /// Byte offset of `text` in its source line.
    pub offset: usize,
    /// 1-based character column of `text`.
    pub column: usize,
}

/// What a tag does with its inline value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    /// `%p= code`
    Evaluate,
    /// `%p&= code`
    EvaluateEscaped,
    /// `%p!= code`
    EvaluateUnescaped,
    /// `%p~ value`
    Preserve,
    /// `%p& text`
    Escaped,
    /// `%p! text`
    Unescaped,
    /// `%br/`
    SelfClose,
}

impl TagAction {
    /// The value is code to evaluate rather than literal text.
    pub fn is_evaluated(self) -> bool {
        matches!(
            self,
            TagAction::Evaluate | TagAction::EvaluateEscaped | TagAction::EvaluateUnescaped
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    pub name: String,
    pub action: Option<TagAction>,
    pub value: String,
    /// Byte offset of `value` in its source line.
    pub offset: usize,
    /// 1-based character column of `value`.
    pub column: usize,
}

impl TagNode {
    /// The value is code to evaluate rather than literal text.
    pub fn is_evaluated(&self) -> bool {
        self.action.is_some_and(TagAction::is_evaluated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributesNode {
    /// Source of each `{...}` group, without the braces.
    pub hashes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptNode {
    pub code: String,
    /// `-` lines produce no output.
    pub silent: bool,
}

/// Named sub-processor of a filter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    Markdown,
    Javascript,
    Other(String),
}

impl FilterKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "markdown" => FilterKind::Markdown,
            "javascript" => FilterKind::Javascript,
            other => FilterKind::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterNode {
    pub kind: FilterKind,
    /// Body with the block indentation removed, lines joined by `\n`.
    pub text: String,
    /// Indentation removed from each body line.
    pub indent: String,
    /// Last body line (inclusive); equals the node line for an empty body.
    pub end_line: usize,
}

impl FilterNode {
    /// Body as a single msgid: surrounding blank lines dropped, newlines
    /// written as a literal `\n`.
    pub fn collapsed_text(&self) -> String {
        let leading: usize = self
            .text
            .split_inclusive('\n')
            .take_while(|l| l.trim().is_empty())
            .map(str::len)
            .sum();
        self.text[leading..].trim_end().replace('\n', "\\n")
    }
}
