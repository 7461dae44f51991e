//! Haml line classifier.
//!
//! Only the structure translation cares about is recognized: plain text,
//! tag lines (name, class/id shortcuts, attribute groups, action and
//! inline value), script lines, filter blocks and silent comments.
//! Attribute groups may continue on following lines; `|` multiline blocks
//! are not supported.

use crate::core::document::{
    AttributesNode, Document, FilterKind, FilterNode, Node, NodeKind, PlainNode, ScriptNode,
    TagAction, TagNode,
};
use crate::core::scanner::balance;

/// Parse Haml `source` named `name` (a file path or `(haml)`).
pub fn parse_haml_source(source: &str, name: &str) -> Document {
    let lines: Vec<&str> = source.lines().collect();
    let mut doc = Document {
        name: name.to_string(),
        ..Default::default()
    };

    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx];
        let lineno = idx + 1;
        let (indent, body) = split_indent(line);

        if body.trim().is_empty() {
            idx += 1;
            continue;
        }

        if let Some(comment) = body.strip_prefix("-#") {
            doc.directives.record(lineno, comment);
            // nested lines are part of the comment
            idx = block_end(&lines, idx, indent) + 1;
            continue;
        }

        if let Some(filter_name) = parse_filter_name(body) {
            let end = block_end(&lines, idx, indent);
            let filter = filter_node(filter_name, &lines[idx + 1..=end], lineno, end + 1);
            doc.nodes.push(Node {
                line: lineno,
                kind: NodeKind::Filter(filter),
            });
            idx = end + 1;
            continue;
        }

        let mut end = idx;
        while !parse_line(&lines[idx..=end].join("\n"), indent, lineno, &mut doc.nodes) {
            match lines.get(end + 1) {
                Some(next) if continues_group(next, indent) => end += 1,
                // never closed: the lines are left out
                _ => break,
            }
        }
        idx = end + 1;
    }

    doc.directives.finish();
    doc
}

/// Leading whitespace length and the rest of the line.
fn split_indent(line: &str) -> (usize, &str) {
    let body = line.trim_start_matches([' ', '\t']);
    (line.len() - body.len(), body)
}

/// Index of the last non-blank line nested deeper than `indent` under `start`.
fn block_end(lines: &[&str], start: usize, indent: usize) -> usize {
    let mut end = start;
    for (i, line) in lines.iter().enumerate().skip(start + 1) {
        let (line_indent, body) = split_indent(line);
        if body.trim().is_empty() {
            continue;
        }
        if line_indent <= indent {
            break;
        }
        end = i;
    }
    end
}

fn parse_filter_name(body: &str) -> Option<&str> {
    let rest = body.strip_prefix(':')?;
    let len = name_len(rest);
    if len == 0 || !rest[len..].trim().is_empty() {
        return None;
    }
    Some(&rest[..len])
}

fn filter_node(name: &str, body_lines: &[&str], line: usize, last_line: usize) -> FilterNode {
    let indent = body_lines
        .iter()
        .find(|l| !l.trim().is_empty())
        .map(|l| {
            let (indent, _) = split_indent(l);
            l[..indent].to_string()
        })
        .unwrap_or_default();

    let text = body_lines
        .iter()
        .map(|l| {
            let (line_indent, _) = split_indent(l);
            &l[line_indent.min(indent.len())..]
        })
        .collect::<Vec<_>>()
        .join("\n");

    FilterNode {
        kind: FilterKind::from_name(name),
        text,
        indent,
        end_line: if body_lines.is_empty() { line } else { last_line },
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':')
}

/// Byte length of the leading name (`[\w:-]*`) of `text`.
fn name_len(text: &str) -> usize {
    text.char_indices()
        .find(|(_, c)| !is_name_char(*c))
        .map_or(text.len(), |(i, _)| i)
}

fn column_of(line: &str, offset: usize) -> usize {
    line[..offset].chars().count() + 1
}

fn push_plain(
    line: &str,
    offset: usize,
    escape: Option<bool>,
    lineno: usize,
    nodes: &mut Vec<Node>,
) {
    let (lead, text) = split_indent(&line[offset..]);
    let text = text.trim_end();
    if text.is_empty() {
        return;
    }
    let offset = offset + lead;
    nodes.push(Node {
        line: lineno,
        kind: NodeKind::Plain(PlainNode {
            text: text.to_string(),
            escape,
            offset,
            column: column_of(line, offset),
        }),
    });
}

fn push_script(code: &str, silent: bool, lineno: usize, nodes: &mut Vec<Node>) {
    nodes.push(Node {
        line: lineno,
        kind: NodeKind::Script(ScriptNode {
            code: code.trim().to_string(),
            silent,
        }),
    });
}

fn starts_tag(body: &str) -> bool {
    let mut chars = body.chars();
    match chars.next() {
        Some('%') => true,
        Some('.' | '#') => chars.next().is_some_and(|c| is_name_char(c) && c != ':'),
        _ => false,
    }
}

/// Classify the line(s) in `text`, which starts at line `lineno`.
///
/// Returns false, pushing nothing, when a tag attribute group is still
/// open at the end of `text`.
fn parse_line(text: &str, indent: usize, lineno: usize, nodes: &mut Vec<Node>) -> bool {
    let body = &text[indent..];
    if starts_tag(body) {
        return parse_tag(text, indent, lineno, nodes);
    }

    let mut chars = body.chars();
    let first = chars.next();
    let second = chars.next();

    match first {
        // doctype
        Some('!') if body.starts_with("!!!") => {}
        // html comment
        Some('/') => {}
        Some('\\') => push_plain(text, indent + 1, None, lineno, nodes),
        Some('=' | '~') => push_script(&body[1..], false, lineno, nodes),
        Some('&' | '!') if second == Some('=') => push_script(&body[2..], false, lineno, nodes),
        Some('&') => push_plain(text, indent + 1, Some(true), lineno, nodes),
        Some('!') => push_plain(text, indent + 1, Some(false), lineno, nodes),
        Some('-') => push_script(&body[1..], true, lineno, nodes),
        _ => push_plain(text, indent, None, lineno, nodes),
    }
    true
}

/// Whether `line` can continue an attribute group opened at `indent`.
fn continues_group(line: &str, indent: usize) -> bool {
    let (line_indent, body) = split_indent(line);
    line_indent > indent || body.trim().is_empty() || body.starts_with(['}', ')', ']'])
}

fn parse_tag(text: &str, start: usize, lineno: usize, nodes: &mut Vec<Node>) -> bool {
    let s = &text[start..];
    let mut pos = 0;

    let name = match s.strip_prefix('%') {
        Some(rest) => {
            let len = name_len(rest);
            pos = 1 + len;
            rest[..len].to_string()
        }
        None => "div".to_string(),
    };

    // .class and #id shortcuts
    while s[pos..].starts_with(['.', '#']) {
        let len = s[pos + 1..]
            .char_indices()
            .find(|(_, c)| !is_name_char(*c) || *c == ':')
            .map_or(s.len() - pos - 1, |(i, _)| i);
        if len == 0 {
            break;
        }
        pos += 1 + len;
    }

    let mut hashes = Vec::new();
    loop {
        let (open, close) = match s[pos..].chars().next() {
            Some('{') => ('{', '}'),
            Some('(') => ('(', ')'),
            Some('[') => ('[', ']'),
            _ => break,
        };
        let Some(close_at) = balance(s, open, close, pos + 1) else {
            return false;
        };
        if open == '{' {
            hashes.push(s[pos + 1..close_at].to_string());
        }
        pos = close_at + 1;
    }

    // whitespace removal modifiers
    while s[pos..].starts_with(['<', '>']) {
        pos += 1;
    }

    let rest = &s[pos..];
    let (action, len) = if rest.starts_with("&=") {
        (Some(TagAction::EvaluateEscaped), 2)
    } else if rest.starts_with("!=") {
        (Some(TagAction::EvaluateUnescaped), 2)
    } else {
        match rest.chars().next() {
            Some('=') => (Some(TagAction::Evaluate), 1),
            Some('~') => (Some(TagAction::Preserve), 1),
            Some('&') => (Some(TagAction::Escaped), 1),
            Some('!') => (Some(TagAction::Unescaped), 1),
            Some('/') => (Some(TagAction::SelfClose), 1),
            _ => (None, 0),
        }
    };
    pos += len;

    let (lead, value) = split_indent(&s[pos..]);
    // the value sits on the last line of a multi-line tag
    let value_at = start + pos + lead;
    let line_start = text[..value_at].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[line_start..];
    let offset = value_at - line_start;

    if !hashes.is_empty() {
        nodes.push(Node {
            line: lineno,
            kind: NodeKind::Attributes(AttributesNode { hashes }),
        });
    }
    nodes.push(Node {
        line: lineno + text[..line_start].matches('\n').count(),
        kind: NodeKind::Tag(TagNode {
            name,
            action,
            value: value.trim_end().to_string(),
            offset,
            column: column_of(line, offset),
        }),
    });
    true
}
