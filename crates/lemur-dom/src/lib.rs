//! Document tree implementation for the Lemur rendering engine.
//!
//! This crate provides an arena-based document tree loosely modeled on the
//! [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices: `DomTree` owns a
//! flat vector of nodes and every relationship is an index into it. Parents
//! exclusively own their children through `children` lists; there are no
//! parent or sibling back-pointers. Upward and lookup queries (for example
//! [`DomTree::get_element_by_id`]) descend from the root instead of walking
//! up, which keeps ownership strictly tree-shaped.
//!
//! The document is mutable while scripts run and frozen (by convention)
//! afterwards; styled and layout trees are derived from it and rebuilt on
//! any change, never patched.

use std::collections::HashMap;

/// Map of attribute names to values for an element.
///
/// [§ 4.9.2 Interface `NamedNodeMap`](https://dom.spec.whatwg.org/#interface-namednodemap)
///
/// NOTE: This is a simplified representation — no namespaces, no Attr node
/// objects. Keys are unique and lowercased at parse time; values are kept
/// verbatim.
pub type AttrMap = HashMap<String, String>;

/// A type-safe index into the document tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing
/// issues, and is the stable handle the scripting sandbox hands out to
/// scripts. Handles become invalid when the document is rebuilt, which is
/// unobservable to scripts because the sandbox is re-created per load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// A node stores its type and the ordered indices of its children. That is
/// the whole relationship model: a parent owns its children, and nothing
/// points back up.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
///
/// Text nodes never have children; the parser and the scripting sandbox
/// only ever attach children to elements.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    ///
    /// The arena root. Parsed top-level nodes become its children.
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// Verbatim character data.
    Text(String),
}

/// Element-specific data.
///
/// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
///
/// "When an element is created, its local name is always given."
///
/// `tag_name` is lowercase ASCII — the parser normalizes it, and everything
/// downstream (selector matching, lookups) relies on that.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttrMap,
}

impl ElementData {
    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// Returns the element's class names, split on ASCII whitespace.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set
    /// of space-separated tokens."
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.attrs
            .get("class")
            .map_or_else(Vec::new, |list| list.split_whitespace().collect())
    }
}

/// Arena-based document tree.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree."
///
/// All nodes live in one contiguous vector indexed by [`NodeId`]:
/// - O(1) access to any node
/// - no borrowing issues (indices instead of references)
/// - nodes detached by mutation simply become unreachable; the arena is
///   dropped wholesale when the load is discarded
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new document tree with just the Document node at the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Document,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the arena, including unreachable ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (it never is; the Document is always there).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node in the arena and return its ID.
    ///
    /// The node is not yet attached to the tree. The DOM spec has no
    /// explicit "allocate" concept; we separate allocation from insertion
    /// for flexibility in tree construction.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            children: Vec::new(),
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before
    /// null."
    ///
    /// Appends `child` to the end of `parent`'s children list. No-op when
    /// `parent` is out of range.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Returns an iterator over all descendants of a node in document order
    /// (depth-first, pre-order traversal). Does not include the starting
    /// node.
    ///
    /// [§ 4.2.4 Tree order](https://dom.spec.whatwg.org/#concept-tree-order)
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is
    /// that document, if it exists; otherwise null."
    ///
    /// Returns the first element child of the Document node — the single
    /// root element of the parsed markup.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// [§ 5.1 getElementById](https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid)
    ///
    /// "Return the first element in tree order within node's descendants
    /// whose ID is elementId; otherwise, return null."
    ///
    /// Depth-first pre-order search from the document root. This descends
    /// from a known root rather than relying on parent pointers, which the
    /// tree does not have.
    #[must_use]
    pub fn get_element_by_id(&self, id_value: &str) -> Option<NodeId> {
        std::iter::once(self.root())
            .chain(self.descendants(self.root()))
            .find(|&id| {
                self.as_element(id)
                    .and_then(ElementData::id)
                    .is_some_and(|v| v == id_value)
            })
    }

    /// Replace an element's children with a single text node.
    ///
    /// This is the document half of the scripting sandbox's `innerHTML`
    /// setter contract: the assigned string becomes one verbatim text
    /// child; it is intentionally not re-parsed as markup. The previous
    /// children become unreachable in the arena.
    pub fn replace_children_with_text(&mut self, parent: NodeId, text: &str) {
        let text_id = self.alloc(NodeType::Text(text.to_string()));
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.clear();
            node.children.push(text_id);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
///
/// Iterator that walks the tree in document order (depth-first, pre-order).
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    /// Stack of nodes to visit (children are pushed in reverse order so we
    /// process them left-to-right).
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
