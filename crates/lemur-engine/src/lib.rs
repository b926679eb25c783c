//! Document loading and rendering pipeline for the Lemur engine.
//!
//! # Scope
//!
//! This crate ties the subsystems into one load pipeline:
//!
//! 1. **Parse** the markup into a document tree
//! 2. **Script** - run every inline `<script>` in document order, then an
//!    optional external script, against the live document
//! 3. **Style** - resolve the user-agent rules, the provided sheet, and
//!    inline `<style>` text into a styled tree (the document is frozen
//!    from here on)
//! 4. **Layout** - computed per viewport from the styled tree
//!
//! It also owns the load boundary: [`ContentBlocker`] and
//! [`load_page`], which substitutes a minimal error document for blocked
//! or failed fetches so the rest of the pipeline never sees the
//! difference.
//!
//! One pipeline instance processes one load; a new load supersedes all
//! derived trees of the previous one.

/// Substring-based URL blocking.
pub mod blocker;

use std::cell::{Ref, RefCell};
use std::fs;
use std::rc::Rc;

use thiserror::Error;

use lemur_common::net::{self, FetchError};
use lemur_common::warning::{clear_warnings, warn_once, Component};
use lemur_css::{
    extract_style_content, style_tree, ua_stylesheet, Dimensions, LayoutBox, StyledNode,
    Stylesheet,
};
use lemur_dom::{DomTree, NodeType};
use lemur_js::{DocumentHandle, Sandbox};

pub use blocker::ContentBlocker;

/// Error type for document loading.
///
/// These never escape [`load_page`] — the loader substitutes an error
/// document instead — but [`fetch_document`] exposes them for callers
/// that want to distinguish.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The URL matched a content-blocking rule.
    #[error("blocked by content rules")]
    Blocked,
    /// Reading a local file failed.
    #[error("file error: {0}")]
    File(#[from] std::io::Error),
    /// Fetching over HTTP failed.
    #[error("network error: {0}")]
    Network(#[from] FetchError),
}

/// A fully loaded page: parsed, scripted, and styled.
///
/// Layout is not stored — it depends on the viewport and is recomputed
/// from the styled tree on demand.
pub struct Page {
    /// The document, shared with the (already dropped) sandbox. Frozen
    /// by convention once `load` returns.
    dom: DocumentHandle,
    /// The combined stylesheet: user-agent rules, then the provided
    /// sheet, then inline `<style>` text.
    stylesheet: Stylesheet,
    /// Styled tree rooted at the document element; `None` when the
    /// markup had no element at all.
    styled: Option<StyledNode>,
    /// Sandbox log, in append order (`console.log` output and
    /// `JS Error:` entries).
    logs: Vec<String>,
}

impl Page {
    /// Run the load pipeline over markup, a stylesheet, and an optional
    /// script.
    ///
    /// Script failures are captured in the log and do not abort the
    /// load; malformed markup and CSS yield whatever the forgiving
    /// parsers assembled.
    #[must_use]
    pub fn load(markup: &str, css: &str, script: Option<&str>) -> Self {
        clear_warnings();

        // STEP 1: Parse markup.
        let dom: DocumentHandle = Rc::new(RefCell::new(lemur_html::parse(markup)));

        // STEP 2: Scripts mutate the live document. The sandbox lives
        // exactly as long as this step; dropping it freezes the document.
        let mut sandbox = Sandbox::new(Rc::clone(&dom));
        let inline_scripts = collect_scripts(&dom.borrow());
        for source in &inline_scripts {
            let _ = sandbox.execute(source);
        }
        if let Some(source) = script {
            let _ = sandbox.execute(source);
        }
        let logs = sandbox.logs();
        drop(sandbox);

        // STEP 3: Styles. Page rules follow the UA rules, inline
        // `<style>` text follows the provided sheet, so later sources
        // win the source-order cascade.
        let mut css_text = String::from(css);
        css_text.push('\n');
        css_text.push_str(&extract_style_content(&dom.borrow()));

        let mut rules = ua_stylesheet().rules.clone();
        rules.extend(lemur_css::parse(&css_text).rules);
        let stylesheet = Stylesheet { rules };

        let styled = {
            let tree = dom.borrow();
            tree.document_element()
                .map(|root| style_tree(&tree, root, &stylesheet))
        };

        Self {
            dom,
            stylesheet,
            styled,
            logs,
        }
    }

    /// Compute the layout tree for a viewport.
    ///
    /// Returns `None` when the page has no document element or the root
    /// is `display: none`.
    #[must_use]
    pub fn layout(&self, viewport: Dimensions) -> Option<LayoutBox<'_>> {
        let styled = self.styled.as_ref()?;
        let tree = self.dom.borrow();
        lemur_css::layout_tree(&tree, styled, viewport)
    }

    /// Borrow the document tree.
    ///
    /// # Panics
    ///
    /// Panics if called while a sandbox still holds a mutable borrow,
    /// which cannot happen through this API — the sandbox is dropped
    /// before `load` returns.
    #[must_use]
    pub fn document(&self) -> Ref<'_, DomTree> {
        self.dom.borrow()
    }

    /// The combined stylesheet the page was resolved against.
    #[must_use]
    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// The styled tree, when the document has a root element.
    #[must_use]
    pub fn styled(&self) -> Option<&StyledNode> {
        self.styled.as_ref()
    }

    /// The sandbox log, in append order.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}

/// Collect the text of every `<script>` element in document order.
///
/// Gathered up front so script-driven mutation cannot change which
/// scripts run during this load.
fn collect_scripts(tree: &DomTree) -> Vec<String> {
    let mut scripts = Vec::new();
    for id in tree.descendants(tree.root()) {
        let is_script = matches!(
            tree.get(id).map(|n| &n.node_type),
            Some(NodeType::Element(data)) if data.tag_name == "script"
        );
        if is_script {
            let source: String = tree
                .children(id)
                .iter()
                .filter_map(|&child| tree.as_text(child))
                .collect();
            if !source.trim().is_empty() {
                scripts.push(source);
            }
        }
    }
    scripts
}

/// Fetch a document's markup from a file path or URL, consulting the
/// content blocker first.
///
/// # Errors
///
/// Returns [`LoadError::Blocked`] for URLs matching a blocking rule,
/// [`LoadError::Network`] for failed fetches, and [`LoadError::File`]
/// for unreadable local paths.
pub fn fetch_document(location: &str, blocker: &ContentBlocker) -> Result<String, LoadError> {
    if blocker.should_block(location) {
        return Err(LoadError::Blocked);
    }
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(net::fetch_text(location)?)
    } else {
        Ok(fs::read_to_string(location)?)
    }
}

/// Load a page from a file path or URL.
///
/// A blocked or failed fetch substitutes a minimal error document, which
/// flows through the pipeline as ordinary markup — the core never
/// distinguishes the two.
#[must_use]
pub fn load_page(
    location: &str,
    blocker: &ContentBlocker,
    css: &str,
    script: Option<&str>,
) -> Page {
    match fetch_document(location, blocker) {
        Ok(markup) => Page::load(&markup, css, script),
        Err(err) => {
            let reason = err.to_string();
            let _ = warn_once(
                Component::Loader,
                &format!("substituting error document for {location}: {reason}"),
            );
            Page::load(&error_document(location, &reason), css, script)
        }
    }
}

/// The minimal error document substituted for blocked or failed loads.
fn error_document(location: &str, reason: &str) -> String {
    format!(
        "<html><body><h1>Unable to load page</h1>\
         <p>{location}</p><p>{reason}</p></body></html>"
    )
}
