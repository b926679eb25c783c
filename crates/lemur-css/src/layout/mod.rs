//! Layout engine: turns a styled tree plus a viewport into a tree of
//! positioned boxes.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! Box generation is a filter over the styled tree: every element child
//! generates a box unless its `display` is `none` (the subtree is pruned
//! here, not in the styled tree); a text child generates an anonymous box
//! only when it contains a non-whitespace character.
//!
//! Layout itself is a pure function of (styled tree, viewport) — running
//! it twice yields bit-identical geometry.

/// Block layout algorithm.
mod block;
/// Geometry records.
pub mod box_model;
/// Single-axis flex layout algorithm.
mod flex;
/// Anonymous text box metrics.
mod text;

use serde::Serialize;

use lemur_dom::{DomTree, NodeType};

use crate::cascade::StyledNode;
use crate::values::Display;

pub use box_model::{Dimensions, Edges};

/// The kind of box a styled node generates.
///
/// [§ 2 Box Layout Modes](https://www.w3.org/TR/css-display-3/#the-display-properties)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoxType {
    /// Block-level box; lays out children vertically.
    Block,
    /// Inline box. This engine has no inline formatting context, so
    /// inline boxes lay out by the block rule.
    Inline,
    /// Anonymous box standing in for a text node. Carries no margin or
    /// padding; its height comes from the text metric approximation.
    Anonymous,
    /// Flex container; distributes children along one axis.
    Flex,
}

/// A node in the layout tree.
///
/// Borrows the styled node it was generated from; the layout tree is a
/// derived artifact, recomputed per viewport and never mutated after
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutBox<'a> {
    /// The kind of box.
    pub box_type: BoxType,
    /// Computed geometry (filled in by layout).
    pub dimensions: Dimensions,
    /// The styled node this box was generated from. `None` never occurs
    /// for boxes built by [`layout_tree`]; layout helpers still treat a
    /// missing reference as "all properties default" rather than panic.
    #[serde(skip)]
    pub styled_node: Option<&'a StyledNode>,
    /// Child boxes in document order.
    pub children: Vec<LayoutBox<'a>>,
}

impl<'a> LayoutBox<'a> {
    fn new(box_type: BoxType, styled_node: &'a StyledNode) -> Self {
        Self {
            box_type,
            dimensions: Dimensions::default(),
            styled_node: Some(styled_node),
            children: Vec::new(),
        }
    }

    /// A property length off this box's styled node, 0 when the box has
    /// no styled reference or the property is absent.
    pub(crate) fn length(&self, name: &str) -> f32 {
        self.styled_node.map_or(0.0, |s| s.length(name))
    }
}

/// Lay out a styled tree against a viewport.
///
/// The root box occupies the viewport rectangle. Returns `None` when the
/// root itself generates no box (`display: none`).
#[must_use]
pub fn layout_tree<'a>(
    dom: &DomTree,
    root: &'a StyledNode,
    viewport: Dimensions,
) -> Option<LayoutBox<'a>> {
    let mut root_box = build_layout_box(dom, root)?;
    layout_dispatch(dom, &mut root_box, viewport, None);
    Some(root_box)
}

/// Generate the box (sub)tree for a styled node.
///
/// Returns `None` for `display: none` elements and for nodes that
/// generate no box.
fn build_layout_box<'a>(dom: &DomTree, styled: &'a StyledNode) -> Option<LayoutBox<'a>> {
    match dom.get(styled.node).map(|n| &n.node_type) {
        Some(NodeType::Text(_)) => Some(LayoutBox::new(BoxType::Anonymous, styled)),
        Some(NodeType::Element(_)) => {
            let box_type = match styled.display() {
                Display::None => return None,
                Display::Flex => BoxType::Flex,
                Display::Block => BoxType::Block,
                Display::Inline => BoxType::Inline,
            };

            let mut layout_box = LayoutBox::new(box_type, styled);
            for child in &styled.children {
                match dom.get(child.node).map(|n| &n.node_type) {
                    // Whitespace-only text contributes neither a box nor
                    // height.
                    Some(NodeType::Text(text)) => {
                        if !text.trim().is_empty() {
                            layout_box
                                .children
                                .push(LayoutBox::new(BoxType::Anonymous, child));
                        }
                    }
                    _ => {
                        if let Some(child_box) = build_layout_box(dom, child) {
                            layout_box.children.push(child_box);
                        }
                    }
                }
            }
            Some(layout_box)
        }
        // The Document node and dangling ids generate nothing.
        _ => None,
    }
}

/// Route a box to its layout algorithm.
///
/// `parent` is the styled node of the containing box; anonymous text
/// boxes resolve their effective font size through it.
pub(crate) fn layout_dispatch<'a>(
    dom: &DomTree,
    layout_box: &mut LayoutBox<'a>,
    containing: Dimensions,
    parent: Option<&'a StyledNode>,
) {
    match layout_box.box_type {
        BoxType::Flex => flex::layout_flex(dom, layout_box, containing),
        BoxType::Anonymous => text::layout_text(dom, layout_box, containing, parent),
        BoxType::Block | BoxType::Inline => block::layout_block(dom, layout_box, containing),
    }
}
