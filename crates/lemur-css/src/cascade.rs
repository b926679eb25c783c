//! Selector matching and style computation.
//!
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/)
//!
//! The cascade here is deliberately flat: rules apply in source order and
//! later declarations for the same property overwrite earlier ones. There
//! is no specificity, no `!important`, and no hook for either.
//!
//! Inheritance is equally narrow: a text node inherits `color` from its
//! parent element when it has no explicit `color` of its own. No other
//! property inherits.

use std::collections::HashMap;

use lemur_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::parser::{Selector, Stylesheet};
use crate::values::{Color, Display, FlexDirection, Justify, Value};

/// Map from property name to typed value.
pub type PropertyMap = HashMap<String, Value>;

/// A document node annotated with its computed property map.
///
/// The styled tree mirrors the document tree child-for-child (layout, not
/// styling, decides which children generate boxes). It references the
/// document by [`NodeId`] and owns nothing of it.
#[derive(Debug, Clone)]
pub struct StyledNode {
    /// The document node this style belongs to.
    pub node: NodeId,
    /// Computed properties, source-order cascaded.
    pub specified: PropertyMap,
    /// Styled children, in document order.
    pub children: Vec<StyledNode>,
}

impl StyledNode {
    /// The specified value of a property, if any.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.specified.get(name)
    }

    /// The specified value of a property as a pixel length, defaulting
    /// to 0 for absent or non-length values.
    #[must_use]
    pub fn length(&self, name: &str) -> f32 {
        self.value(name).and_then(Value::as_length).unwrap_or(0.0)
    }

    /// The specified value of a property as a color, if it is one.
    #[must_use]
    pub fn color(&self, name: &str) -> Option<Color> {
        self.value(name).and_then(Value::as_color)
    }

    /// The display mode of this node. Elements with no `display`
    /// declaration generate inline boxes.
    #[must_use]
    pub fn display(&self) -> Display {
        match self.value("display") {
            Some(Value::Display(d)) => *d,
            _ => Display::Inline,
        }
    }

    /// The flex main-axis direction (row when unset).
    #[must_use]
    pub fn flex_direction(&self) -> FlexDirection {
        match self.value("flex-direction") {
            Some(Value::FlexDirection(d)) => *d,
            _ => FlexDirection::Row,
        }
    }

    /// The flex justification mode (flex-start when unset).
    #[must_use]
    pub fn justify(&self) -> Justify {
        match self.value("justify-content") {
            Some(Value::Justify(j)) => *j,
            _ => Justify::FlexStart,
        }
    }
}

/// Does a selector match an element?
///
/// Every present constraint must hold:
/// - tag name equals the element's (both already lowercase)
/// - id equals the element's `id` attribute
/// - every selector class appears in the element's whitespace-split
///   `class` attribute (the element may have more)
#[must_use]
pub fn selector_matches(elem: &ElementData, selector: &Selector) -> bool {
    if let Some(tag) = &selector.tag_name {
        if *tag != elem.tag_name {
            return false;
        }
    }

    if let Some(id) = &selector.id {
        if elem.id() != Some(id.as_str()) {
            return false;
        }
    }

    if !selector.classes.is_empty() {
        let elem_classes = elem.classes();
        for class in &selector.classes {
            if !elem_classes.contains(&class.as_str()) {
                return false;
            }
        }
    }

    true
}

/// Compute the property map for one element.
///
/// Rules apply in source order; a rule applies when any of its selectors
/// matches. Later writes for the same property overwrite earlier ones —
/// that is the entire cascade.
#[must_use]
pub fn specified_values(elem: &ElementData, stylesheet: &Stylesheet) -> PropertyMap {
    let mut values = PropertyMap::new();
    for rule in &stylesheet.rules {
        if rule
            .selectors
            .iter()
            .any(|selector| selector_matches(elem, selector))
        {
            for decl in &rule.declarations {
                let _ = values.insert(decl.property.clone(), decl.value.clone());
            }
        }
    }
    values
}

/// Build the styled tree for a document subtree.
///
/// Every document child becomes a styled child in order, whatever its
/// type. Text nodes match no selectors; after their (empty) map is built
/// they inherit `color` from the parent when unset.
#[must_use]
pub fn style_tree(dom: &DomTree, id: NodeId, stylesheet: &Stylesheet) -> StyledNode {
    let specified = match dom.get(id).map(|n| &n.node_type) {
        Some(NodeType::Element(data)) => specified_values(data, stylesheet),
        _ => PropertyMap::new(),
    };

    let mut children = Vec::with_capacity(dom.children(id).len());
    for &child_id in dom.children(id) {
        let mut child = style_tree(dom, child_id, stylesheet);

        // Text inherits color from its immediate parent.
        if dom.as_text(child_id).is_some() && !child.specified.contains_key("color") {
            if let Some(color) = specified.get("color") {
                let _ = child.specified.insert("color".to_string(), color.clone());
            }
        }

        children.push(child);
    }

    StyledNode {
        node: id,
        specified,
        children,
    }
}
