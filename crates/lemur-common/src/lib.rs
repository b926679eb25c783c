//! Shared utilities for the Lemur rendering engine.
//!
//! # Scope
//!
//! This crate provides:
//! - **Warnings** - deduplicated, colored terminal warnings used by the
//!   markup, style, and sandbox components to report skipped constructs
//! - **Network fetch** - a small blocking HTTP wrapper used by the
//!   document loader

/// HTTP fetch helpers for the document loader.
pub mod net;
/// Deduplicated engine warnings.
pub mod warning;
