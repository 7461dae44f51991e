//! Host-language source snippets spliced into rewritten templates.
//!
//! Everything that depends on the syntax of the language the template is
//! compiled to lives behind [`HostSyntax`]. The scanner, rewriter and walker
//! never build host source text themselves.

/// Source-syntax of the language a rewritten template is compiled to.
pub trait HostSyntax {
    /// Lookup of `template` applied positionally to `args`.
    fn render_lookup_call(&self, template: &str, args: &[String]) -> String;

    /// Wrap an embedded expression so its value is HTML-escaped.
    fn escape_call(&self, expr: &str) -> String;

    /// Lookup of `msgid` serialized as a script string literal.
    fn json_lookup_call(&self, msgid: &str) -> String;

    /// Template line mixing the translation helpers into the view.
    fn helpers_preamble(&self, module: &str) -> String;
}

/// Ruby, as compiled by Haml.
#[derive(Debug, Clone, Copy, Default)]
pub struct RubyHost;

impl HostSyntax for RubyHost {
    fn render_lookup_call(&self, template: &str, args: &[String]) -> String {
        format!("_('{}') % [{}]", quote_single(template), args.join(", "))
    }

    fn escape_call(&self, expr: &str) -> String {
        format!("Haml::Helpers.html_escape({})", expr)
    }

    fn json_lookup_call(&self, msgid: &str) -> String {
        format!("_('{}').to_json", quote_single(msgid))
    }

    fn helpers_preamble(&self, module: &str) -> String {
        format!("- extend {}", module)
    }
}

/// Escape text for a single-quoted Ruby string literal.
fn quote_single(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '\'') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted
}
