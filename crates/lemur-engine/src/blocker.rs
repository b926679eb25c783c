//! Content blocker.
//!
//! A load-time predicate over URLs: a URL is blocked when any configured
//! rule string occurs in it as a substring. The loader treats a blocked
//! resource exactly like a failed fetch — a real blocker would use more
//! structured rules, but the contract to the rest of the engine is just
//! `should_block`.

use std::collections::HashSet;

/// Substring-based URL blocker.
#[derive(Debug, Clone, Default)]
pub struct ContentBlocker {
    rules: HashSet<String>,
}

impl ContentBlocker {
    /// An empty blocker that allows everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add blocking rules. Each rule is a plain substring to match
    /// against URLs.
    pub fn load_rules<I, S>(&mut self, rules: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for rule in rules {
            let _ = self.rules.insert(rule.into());
        }
    }

    /// Check whether a URL should be blocked.
    #[must_use]
    pub fn should_block(&self, url: &str) -> bool {
        self.rules.iter().any(|rule| url.contains(rule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_blocker_allows_everything() {
        let blocker = ContentBlocker::new();
        assert!(!blocker.should_block("http://example.com/anything"));
    }

    #[test]
    fn test_substring_match_blocks() {
        let mut blocker = ContentBlocker::new();
        blocker.load_rules(["ads.", "tracker"]);
        assert!(blocker.should_block("http://ads.example.com/banner.png"));
        assert!(blocker.should_block("http://cdn.example.com/tracker.js"));
        assert!(!blocker.should_block("http://example.com/page.html"));
    }

    #[test]
    fn test_rules_accumulate() {
        let mut blocker = ContentBlocker::new();
        blocker.load_rules(["ads."]);
        blocker.load_rules(["beacons"]);
        assert!(blocker.should_block("http://x/beacons/ping"));
        assert!(blocker.should_block("http://ads.x/"));
    }
}
