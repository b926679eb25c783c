//! Markup parser for the Lemur rendering engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Parser** - a forgiving, cursor-based recursive-descent parser that
//!   turns markup text into a [`lemur_dom::DomTree`]. Tag and attribute
//!   names are lowercased; attribute values may be single-quoted,
//!   double-quoted, or unquoted; bare attribute names yield empty values.
//! - **Serializer** - a canonical serializer used by tests and debug
//!   tooling (lowercase names, double-quoted values, sorted attributes).
//! - **Tree printer** - an indented textual dump of a document tree.
//!
//! # Error handling
//!
//! The parser never fails. Malformed input yields whatever tree was
//! assembled up to that point: an unmatched closing tag is consumed, a
//! stray `<` that opens no tag is skipped, and end-of-input mid-token
//! simply ends parsing.
//!
//! # Not Implemented
//!
//! Comments, DOCTYPE, character references, and the WHATWG tree-builder
//! insertion modes. The grammar here is the small recursive one the engine
//! is specified against, not the HTML Standard's.

/// Recursive-descent markup parser.
pub mod parser;
/// Canonical serializer and debug tree printer.
pub mod serializer;

pub use parser::parse;
pub use serializer::{print_tree, serialize};
