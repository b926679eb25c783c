//! Style-sheet parsing, cascade, and layout for the Lemur rendering
//! engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Typed values** - a tagged [`Value`] union (keyword, px length,
//!   RGBA color, display mode, flex direction, justification); values are
//!   typed once at parse time and dispatched exhaustively after that
//! - **Parser** - a forgiving cursor parser for the small rule grammar
//!   (`selectors { property: value; ... }`, `/* */` comments)
//! - **Cascade** - source-order last-writer-wins matching of simple
//!   selectors (tag / `#id` / `.class`), and the styled tree with `color`
//!   inheritance into text children
//! - **Layout** - block layout, anonymous text boxes with monospace
//!   metrics, and single-axis flex with the five justification modes
//!
//! # Not Implemented
//!
//! Specificity and `!important`, combinators, media queries, units other
//! than `px`, named colors, inline formatting contexts, flex wrapping and
//! grow/shrink factors.

/// Cascade and styled-tree computation.
pub mod cascade;
/// Layout tree and algorithms.
pub mod layout;
/// Style-sheet parser.
pub mod parser;
/// User-agent default rules.
pub mod ua_stylesheet;
/// Typed CSS values.
pub mod values;

// Re-exports for convenience
pub use cascade::{selector_matches, specified_values, style_tree, PropertyMap, StyledNode};
pub use layout::{layout_tree, BoxType, Dimensions, Edges, LayoutBox};
pub use parser::{parse, Declaration, Rule, Selector, Stylesheet};
pub use ua_stylesheet::ua_stylesheet;
pub use values::{Color, Display, FlexDirection, Justify, Value};

use lemur_dom::{DomTree, NodeId, NodeType};

/// [HTML Standard § 4.2.6 The style element](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element)
///
/// Extract CSS text from all `<style>` elements in a document tree, in
/// document order.
#[must_use]
pub fn extract_style_content(tree: &DomTree) -> String {
    let mut css = String::new();
    collect_style_content(tree, tree.root(), &mut css);
    css
}

/// Recursively collect CSS text from style elements.
fn collect_style_content(tree: &DomTree, id: NodeId, css: &mut String) {
    let Some(node) = tree.get(id) else { return };

    match &node.node_type {
        NodeType::Element(data) if data.tag_name == "style" => {
            for &child_id in tree.children(id) {
                if let Some(text) = tree.as_text(child_id) {
                    css.push_str(text);
                    css.push('\n');
                }
            }
        }
        _ => {
            for &child_id in tree.children(id) {
                collect_style_content(tree, child_id, css);
            }
        }
    }
}
