//! Translation engine.
//!
//! ## Module Structure
//!
//! - `scanner`: balanced `#{...}` delimiter scanning shared by everything below
//! - `interpolation`: turns text into a `%s` template plus its expressions
//! - `literal`: explicit `_('...')` calls written by template authors
//! - `parsers`: Haml source to [`Document`]
//! - `walker`: extraction of msgids from a [`Document`] into a [`TargetTable`]
//! - `translate`: rewrite mode, injecting lookup calls into a template
//! - `lookup`: render-time translation of rewritten templates
//! - `host`: host-language snippets used by the rewriter
//! - `file_scanner` / `context`: batch extraction over a project

pub mod context;
pub mod document;
pub mod error;
pub mod file_scanner;
pub mod host;
pub mod interpolation;
pub mod literal;
pub mod lookup;
pub mod parsers;
pub mod scanner;
pub mod targets;
pub mod translate;
pub mod walker;

pub use context::{ExtractContext, ExtractionRun};
pub use document::{Document, STREAM_SOURCE_NAME};
pub use error::{Error, Result};
pub use file_scanner::is_target;
pub use host::{HostSyntax, RubyHost};
pub use interpolation::{InterpolationResult, rewrite};
pub use lookup::{Lookup, translate};
pub use parsers::haml::parse_haml_source;
pub use targets::{Location, TargetRow, TargetTable};
pub use translate::{Backend, MagicConfig, RenderOptions, Translator};
pub use walker::{Extraction, LiteralWarning, WalkError, walk, walk_into};
