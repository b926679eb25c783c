//! Forgiving recursive-descent markup parser.
//!
//! The parser walks a character buffer with a cursor and builds nodes
//! directly into the arena. It recognizes a small grammar:
//!
//! - nodes: whitespace is skipped between siblings; parsing stops at
//!   end-of-input or at a `</` lexeme
//! - element: `<` name attributes `>` children optional-closing-tag
//! - text: any maximal run of characters not containing `<`
//!
//! There are no parse errors. Whatever was assembled when the input runs
//! out (or turns to garbage) is the result.

use lemur_common::warning::{warn_once, Component};
use lemur_dom::{AttrMap, DomTree, ElementData, NodeId, NodeType};

/// Parse markup text into a document tree.
///
/// Top-level nodes become children of the Document root; the first element
/// among them is the document element.
#[must_use]
pub fn parse(source: &str) -> DomTree {
    Parser::new(source).run()
}

/// Cursor-based parser state.
struct Parser {
    /// Input as a char buffer for O(1) cursor access.
    input: Vec<char>,
    /// Current cursor position.
    pos: usize,
    /// The tree under construction.
    tree: DomTree,
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            input: source.chars().collect(),
            pos: 0,
            tree: DomTree::new(),
        }
    }

    fn run(mut self) -> DomTree {
        let nodes = self.parse_nodes();
        for id in nodes {
            self.tree.append_child(NodeId::ROOT, id);
        }
        self.tree
    }

    // ── Cursor primitives ──────────────────────────────────────────────

    fn next_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn starts_with(&self, s: &str) -> bool {
        let mut i = self.pos;
        for ch in s.chars() {
            if self.input.get(i) != Some(&ch) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn consume_char(&mut self) -> Option<char> {
        let c = self.next_char();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn consume_while(&mut self, test: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(c) = self.next_char() {
            if !test(c) {
                break;
            }
            result.push(c);
            self.pos += 1;
        }
        result
    }

    fn consume_whitespace(&mut self) {
        let _ = self.consume_while(char::is_whitespace);
    }

    // ── Grammar ────────────────────────────────────────────────────────

    /// Parse a sequence of sibling nodes until end-of-input or a closing
    /// tag lexeme.
    fn parse_nodes(&mut self) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        loop {
            self.consume_whitespace();
            if self.eof() || self.starts_with("</") {
                break;
            }
            if let Some(id) = self.parse_node() {
                nodes.push(id);
            }
        }
        nodes
    }

    fn parse_node(&mut self) -> Option<NodeId> {
        if self.next_char() == Some('<') {
            self.parse_element()
        } else {
            self.parse_text()
        }
    }

    /// Text is everything up to the next `<`.
    fn parse_text(&mut self) -> Option<NodeId> {
        let data = self.consume_while(|c| c != '<');
        if data.is_empty() {
            return None;
        }
        Some(self.tree.alloc(NodeType::Text(data)))
    }

    /// `<` name attributes `>` children `</` name `>`
    ///
    /// The closing tag is optional, and its name is consumed but not
    /// required to match the opening name.
    fn parse_element(&mut self) -> Option<NodeId> {
        let _ = self.consume_char(); // '<'
        let tag_name = self.parse_name();
        if tag_name.is_empty() {
            // Not a tag after all (`<!doctype`, `<!--`, a stray `<`).
            // Skip to the closing angle bracket so the cursor always
            // makes progress.
            let _ = warn_once(Component::Markup, "skipping markup that is not an element tag");
            let _ = self.consume_while(|c| c != '>');
            let _ = self.consume_char();
            return None;
        }
        let attrs = self.parse_attributes();
        let _ = self.consume_char(); // '>'

        let element = self.tree.alloc(NodeType::Element(ElementData {
            tag_name,
            attrs,
        }));

        let children = self.parse_nodes();
        for child in children {
            self.tree.append_child(element, child);
        }

        if self.starts_with("</") {
            let _ = self.consume_char(); // '<'
            let _ = self.consume_char(); // '/'
            let _ = self.parse_name(); // consumed, not matched
            let _ = self.consume_while(|c| c != '>');
            let _ = self.consume_char(); // '>'
        }

        Some(element)
    }

    /// ASCII-alphanumeric name, lowercased.
    fn parse_name(&mut self) -> String {
        self.consume_while(|c| c.is_ascii_alphanumeric())
            .to_ascii_lowercase()
    }

    /// Attributes repeat until `>` (or end-of-input). Duplicate keys:
    /// last one wins.
    fn parse_attributes(&mut self) -> AttrMap {
        let mut attributes = AttrMap::new();
        loop {
            self.consume_whitespace();
            match self.next_char() {
                None | Some('>') => break,
                _ => {}
            }

            // Attribute names additionally allow `-` (data-* and friends).
            let name = self
                .consume_while(|c| c.is_ascii_alphanumeric() || c == '-')
                .to_ascii_lowercase();
            if name.is_empty() {
                // Stray punctuation inside the tag; skip it and keep going.
                let _ = self.consume_char();
                continue;
            }

            self.consume_whitespace();
            let value = if self.next_char() == Some('=') {
                let _ = self.consume_char();
                self.parse_attr_value()
            } else {
                // Bare boolean attribute.
                String::new()
            };

            let _ = attributes.insert(name, value);
        }
        attributes
    }

    /// Single-quoted, double-quoted, or unquoted (terminated by whitespace
    /// or `>`). Values are preserved verbatim.
    fn parse_attr_value(&mut self) -> String {
        self.consume_whitespace();
        match self.next_char() {
            Some(quote) if quote == '"' || quote == '\'' => {
                let _ = self.consume_char();
                let value = self.consume_while(|c| c != quote);
                let _ = self.consume_char(); // closing quote, absent at EOF
                value
            }
            _ => self.consume_while(|c| !c.is_whitespace() && c != '>'),
        }
    }
}
