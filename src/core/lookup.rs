//! Render-time translation of rewritten templates.
//!
//! Catalog storage is left to the application: anything able to map a msgid
//! to localized text implements [`Lookup`].

use std::collections::HashMap;
use std::hash::BuildHasher;

use super::interpolation::PLACEHOLDER;

/// Translation backend seen from the template.
pub trait Lookup {
    /// Localized text for `msgid`, `None` when untranslated.
    fn lookup(&self, msgid: &str) -> Option<String>;
}

impl<S: BuildHasher> Lookup for HashMap<String, String, S> {
    fn lookup(&self, msgid: &str) -> Option<String> {
        self.get(msgid).cloned()
    }
}

/// Look `template` up and fill its placeholders with `values`.
///
/// Untranslated templates fall back to the msgid itself.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use haml_i18n::core::lookup::translate;
///
/// let catalog = HashMap::from([(
///     "Hello %s!".to_string(),
///     "Witaj %s!".to_string(),
/// )]);
/// assert_eq!(translate(&catalog, "Hello %s!", &["Ola"]), "Witaj Ola!");
/// assert_eq!(translate(&catalog, "Bye %s", &["Ola"]), "Bye Ola");
/// ```
pub fn translate<L>(lookup: &L, template: &str, values: &[&str]) -> String
where
    L: Lookup + ?Sized,
{
    let localized = lookup.lookup(template);
    substitute(localized.as_deref().unwrap_or(template), values)
}

/// Replace each `%s` with the next value; `%%` stands for a literal `%`.
///
/// Placeholders without a value are kept as written.
pub fn substitute(template: &str, values: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut values = values.iter();
    let mut rest = template;

    while let Some(idx) = rest.find('%') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        if let Some(after) = tail.strip_prefix("%%") {
            out.push('%');
            rest = after;
        } else if let Some(after) = tail.strip_prefix(PLACEHOLDER) {
            match values.next() {
                Some(value) => out.push_str(value),
                None => out.push_str(PLACEHOLDER),
            }
            rest = after;
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
