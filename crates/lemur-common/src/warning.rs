//! Deduplicated engine warnings.
//!
//! The parsers in this engine never fail; when they skip a construct
//! they do not model, they report it here instead. Each unique
//! (component, message) pair prints once per load, so a sheet full of
//! the same unsupported selector does not flood stderr.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

use owo_colors::OwoColorize;

/// The engine subsystem reporting a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Component {
    /// The markup parser.
    Markup,
    /// The style-sheet parser and resolver.
    Style,
    /// The document loader and content blocker.
    Loader,
}

/// Warnings already printed since the last [`clear_warnings`].
fn seen() -> &'static Mutex<HashSet<(Component, String)>> {
    static SEEN: OnceLock<Mutex<HashSet<(Component, String)>>> = OnceLock::new();
    SEEN.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Report a construct the engine recognized but skipped.
///
/// Prints to stderr the first time a (component, message) pair is seen
/// and returns whether it printed.
///
/// # Example
/// ```ignore
/// let _ = warn_once(Component::Style, "skipping declaration without ':'");
/// ```
///
/// # Panics
/// Panics if the warning set mutex is poisoned.
pub fn warn_once(component: Component, message: &str) -> bool {
    let is_new = seen()
        .lock()
        .unwrap()
        .insert((component, message.to_string()));

    if is_new {
        let tag = format!("[lemur:{component}]");
        eprintln!("{} {message}", tag.yellow().bold());
    }
    is_new
}

/// Forget every recorded warning. Called at the start of each load, so
/// every page reports its own problems afresh.
///
/// # Panics
/// Panics if the warning set mutex is poisoned.
pub fn clear_warnings() {
    seen().lock().unwrap().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test covers the whole sequence: test functions run on separate
    // threads and the dedup set is global.
    #[test]
    fn dedup_is_per_component_and_resets() {
        clear_warnings();
        assert!(warn_once(Component::Style, "unit: repeated message"));
        assert!(!warn_once(Component::Style, "unit: repeated message"));
        // Same text from another component is a different warning.
        assert!(warn_once(Component::Markup, "unit: repeated message"));
        clear_warnings();
        assert!(warn_once(Component::Style, "unit: repeated message"));
    }
}
