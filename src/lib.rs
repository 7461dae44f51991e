//! haml-i18n - magic translations for Haml templates
//!
//! Every piece of literal text in a Haml template is treated as a msgid:
//! the extractor collects them (with interpolations normalized to `%s`)
//! for catalog tools, and the rewriter injects lookup calls so templates
//! render in the active locale without explicit `_()` wrapping.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanner, rewriter, extraction walker and translator
//! - `directives`: `-# i18n-disable*` comments
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod directives;
pub mod issues;
