//! Rewrite mode: inject lookup calls into a template.
//!
//! Every piece of literal text is replaced by a lookup of its msgid, so the
//! template renders in the active locale:
//!
//! ```text
//! %p Hello #{name}!          =>  %p #{_('Hello %s!') % [name]}
//! Welcome back               =>  != _('Welcome back') % []
//! ```
//!
//! Evaluated tags and script lines are left alone; the author is expected to
//! call the lookup function there explicitly.

use std::fmt;
use std::str::FromStr;

use super::document::{FilterKind, FilterNode, NodeKind, PlainNode, TagNode};
use super::error::{Error, Result};
use super::host::{HostSyntax, RubyHost};
use super::interpolation::rewrite_with;
use super::literal::script_calls;
use super::parsers::haml::parse_haml_source;
use super::walker::WalkError;

/// Translation library the rendered template calls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    I18n,
    Gettext,
    FastGettext,
    /// Helpers are provided by the application.
    Custom,
}

impl Backend {
    pub fn all() -> [Backend; 4] {
        [
            Backend::I18n,
            Backend::Gettext,
            Backend::FastGettext,
            Backend::Custom,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::I18n => "i18n",
            Backend::Gettext => "gettext",
            Backend::FastGettext => "fast_gettext",
            Backend::Custom => "custom",
        }
    }

    /// Module providing `_()` to the compiled template.
    pub fn helpers_module(&self) -> Option<&'static str> {
        match self {
            Backend::I18n => Some("I18n::Gettext::Helpers"),
            Backend::Gettext => Some("GetText"),
            Backend::FastGettext => Some("FastGettext::Translation"),
            Backend::Custom => None,
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Backend::all()
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| Error::UnknownBackend(s.to_string()))
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Global translation switch and backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicConfig {
    pub enabled: bool,
    pub backend: Backend,
}

impl Default for MagicConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

impl MagicConfig {
    /// Enable translations with the backend named `backend`.
    pub fn enable(backend: &str) -> Result<Self> {
        Ok(Self {
            enabled: true,
            backend: backend.parse()?,
        })
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            backend: Backend::I18n,
        }
    }
}

/// Options of a single render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Overrides [`MagicConfig::enabled`] when set.
    pub magic_translations: Option<bool>,
    /// HTML-escape expressions interpolated into plain text.
    pub escape_html: bool,
}

/// Rewrites templates according to a [`MagicConfig`].
#[derive(Debug, Clone)]
pub struct Translator<H = RubyHost> {
    config: MagicConfig,
    options: RenderOptions,
    host: H,
}

impl Translator<RubyHost> {
    pub fn new(config: MagicConfig, options: RenderOptions) -> Self {
        Self::with_host(config, options, RubyHost)
    }
}

impl<H: HostSyntax> Translator<H> {
    pub fn with_host(config: MagicConfig, options: RenderOptions, host: H) -> Self {
        Self {
            config,
            options,
            host,
        }
    }

    /// Whether this render translates at all.
    pub fn is_active(&self) -> bool {
        self.options
            .magic_translations
            .unwrap_or(self.config.enabled)
    }

    /// Line mixing the backend helpers into the template, if any.
    pub fn preamble(&self) -> Option<String> {
        if !(self.is_active() && self.config.enabled) {
            return None;
        }
        self.config
            .backend
            .helpers_module()
            .map(|module| self.host.helpers_preamble(module))
    }

    /// New inline value for a tag, `None` when the value stays as written.
    pub fn translate_tag_value(&self, tag: &TagNode) -> Result<Option<String>> {
        if !self.is_active() || tag.value.is_empty() || tag.is_evaluated() {
            return Ok(None);
        }
        let result = rewrite_with(&self.host, &tag.value, false)?;
        let call = self.host.render_lookup_call(&result.template, &result.args);
        Ok(Some(format!("#{{{}}}", call)))
    }

    /// Lookup expression replacing a plain text line.
    ///
    /// A `& ` or `! ` prefix on the line overrides the render's escaping.
    pub fn translate_plain(&self, plain: &PlainNode) -> Result<String> {
        let escape_html = plain.escape.unwrap_or(self.options.escape_html);
        let result = rewrite_with(&self.host, &plain.text, escape_html)?;
        Ok(self.host.render_lookup_call(&result.template, &result.args))
    }

    /// Single interpolated lookup replacing a markdown body.
    pub fn translate_markdown(&self, filter: &FilterNode) -> Option<String> {
        let msgid = filter.collapsed_text();
        if msgid.is_empty() {
            return None;
        }
        Some(format!("#{{{}}}", self.host.render_lookup_call(&msgid, &[])))
    }

    /// Replace `_('...')` calls of one script line by interpolated lookups.
    ///
    /// Literals that cannot be decoded are kept as written.
    pub fn translate_script_line(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut last = 0;
        for literal in script_calls(line) {
            let Ok(msgid) = literal.decode_script() else {
                continue;
            };
            out.push_str(&line[last..literal.call.start]);
            out.push_str(&format!("#{{{}}}", self.host.json_lookup_call(&msgid)));
            last = literal.call.end;
        }
        out.push_str(&line[last..]);
        out
    }

    /// Rewrite a whole Haml template named `name`.
    ///
    /// Returns `source` unchanged when translation is inactive. Lines
    /// excluded by `-# i18n-disable*` directives are kept as written.
    pub fn rewrite_document(
        &self,
        source: &str,
        name: &str,
    ) -> std::result::Result<String, WalkError> {
        if !self.is_active() {
            return Ok(source.to_string());
        }

        let doc = parse_haml_source(source, name);
        let source_lines: Vec<&str> = source.lines().collect();
        let mut lines: Vec<Option<String>> =
            source_lines.iter().map(|l| Some(l.to_string())).collect();

        for node in &doc.nodes {
            if doc.directives.is_disabled(node.line) {
                continue;
            }
            let idx = node.line - 1;
            let line = source_lines[idx];

            match &node.kind {
                NodeKind::Plain(plain) => {
                    let call = self.translate_plain(plain).map_err(|e| {
                        WalkError::in_fragment(name, node.line, plain.column, &plain.text, e)
                    })?;
                    lines[idx] = Some(format!("{}!= {}", indentation(line), call));
                }
                NodeKind::Tag(tag) => {
                    let value = self.translate_tag_value(tag).map_err(|e| {
                        WalkError::in_fragment(name, node.line, tag.column, &tag.value, e)
                    })?;
                    if let Some(value) = value {
                        lines[idx] = Some(format!("{}{}", &line[..tag.offset], value));
                    }
                }
                NodeKind::Filter(filter) => match filter.kind {
                    FilterKind::Markdown => {
                        if let Some(call) = self.translate_markdown(filter) {
                            // body lines are node.line ..= end_line (1-based)
                            lines[node.line] = Some(format!("{}{}", filter.indent, call));
                            for body in lines.iter_mut().take(filter.end_line).skip(node.line + 1) {
                                *body = None;
                            }
                        }
                    }
                    FilterKind::Javascript => {
                        for body_idx in node.line..filter.end_line {
                            lines[body_idx] = Some(self.translate_script_line(source_lines[body_idx]));
                        }
                    }
                    FilterKind::Other(_) => {}
                },
                NodeKind::Attributes(_) | NodeKind::Script(_) => {}
            }
        }

        let mut out: Vec<String> = Vec::with_capacity(lines.len() + 1);
        if let Some(preamble) = self.preamble() {
            out.push(preamble);
        }
        out.extend(lines.into_iter().flatten());

        let mut rewritten = out.join("\n");
        if source.ends_with('\n') {
            rewritten.push('\n');
        }
        Ok(rewritten)
    }
}

fn indentation(line: &str) -> &str {
    let body = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - body.len()]
}
