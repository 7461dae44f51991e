//! Template parsers.
//!
//! - `haml`: line classifier turning Haml source into a [`Document`](crate::core::Document)

pub mod haml;
