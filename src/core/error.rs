//! Errors raised by the scanning, rewriting and extraction engines.

use thiserror::Error;

/// Failure of a single fragment or literal.
///
/// None of these errors corrupt a `TargetTable`: the walker only records a
/// target after the fragment it came from was rewritten successfully.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An interpolation marker was opened but its delimiters never balance.
    ///
    /// `offset` is the byte offset of the marker inside the fragment.
    #[error("unterminated interpolation starting at byte {offset}")]
    UnbalancedDelimiter { offset: usize },

    /// An explicit translation-call literal could not be decoded.
    #[error("malformed translation literal {literal:?}: {reason}")]
    MalformedLiteral { literal: String, reason: String },

    /// A translation backend outside the supported set was requested.
    #[error(
        "translation backend '{0}' is not available (expected one of: i18n, gettext, fast_gettext, custom)"
    )]
    UnknownBackend(String),
}

pub type Result<T> = std::result::Result<T, Error>;
