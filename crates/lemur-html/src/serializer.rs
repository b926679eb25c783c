//! Canonical serializer and debug printer for document trees.
//!
//! The serializer produces one normalized rendition of a tree: lowercase
//! names, attributes sorted by key and double-quoted, explicit closing
//! tags, text verbatim. Parsing its output reproduces a structurally
//! equal tree, which the round-trip tests rely on.

use lemur_dom::{DomTree, NodeId, NodeType};

/// Serialize a subtree to canonical markup text.
///
/// The Document node itself produces no output; its children are emitted
/// in order.
#[must_use]
pub fn serialize(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else { return };

    match &node.node_type {
        NodeType::Document => {
            for &child in tree.children(id) {
                write_node(tree, child, out);
            }
        }
        NodeType::Element(data) => {
            out.push('<');
            out.push_str(&data.tag_name);

            // HashMap iteration order is unstable; sort for a canonical form.
            let mut attrs: Vec<(&String, &String)> = data.attrs.iter().collect();
            attrs.sort_by_key(|(k, _)| k.as_str());
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(value);
                out.push('"');
            }
            out.push('>');

            for &child in tree.children(id) {
                write_node(tree, child, out);
            }

            out.push_str("</");
            out.push_str(&data.tag_name);
            out.push('>');
        }
        NodeType::Text(data) => out.push_str(data),
    }
}

/// Print an indented textual dump of a subtree to stdout.
///
/// Text content is shown with visible whitespace (newlines escaped, spaces
/// as middle dots) so stray whitespace nodes are easy to spot.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match &node.node_type {
            NodeType::Document => {
                println!("{prefix}Document");
            }
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    println!("{prefix}<{}>", data.tag_name);
                } else {
                    let mut attrs: Vec<String> = data
                        .attrs
                        .iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.clone()
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    attrs.sort();
                    println!("{prefix}<{} {}>", data.tag_name, attrs.join(" "));
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{display}\"");
            }
        }
        for &child_id in tree.children(id) {
            print_tree(tree, child_id, indent + 1);
        }
    }
}
