//! Style-sheet parser.
//!
//! A cursor-based recursive-descent parser over a character buffer. The
//! grammar is deliberately small:
//!
//! ```text
//! stylesheet  = rule*
//! rule        = selectors '{' declarations '}'
//! selectors   = simple (',' simple)*
//! simple      = ('#' ident | '.' ident | tag)+
//! declaration = property ':' value ';'
//! ```
//!
//! `/* … */` comments are skipped as whitespace everywhere. There is no
//! combinator structure: whitespace between simple selectors just starts
//! another selector in the rule's list.
//!
//! # Error handling
//!
//! Parsing never aborts the sheet. A malformed declaration is dropped (or
//! falls back to a keyword value) and parsing continues at the next
//! declaration; a rule header without `{` skips to the next `}`.

use lemur_common::warning::{warn_once, Component};

use crate::values::{Color, Display, FlexDirection, Justify, Value};

/// A simple selector: optional tag name, optional id, class names.
///
/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// A selector matches an element iff every present constraint is
/// satisfied; the element's class list may be a superset of the
/// selector's.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct Selector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    pub tag_name: Option<String>,
    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    pub id: Option<String>,
    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    pub classes: Vec<String>,
}

impl Selector {
    /// True when no constraint is present (such a selector is dropped by
    /// the parser, never stored in a rule).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag_name.is_none() && self.id.is_none() && self.classes.is_empty()
    }
}

/// A property/value pair. The property name is lowercased; the value has
/// already been through the coercion ladder.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Declaration {
    /// Lowercased property name.
    pub property: String,
    /// Typed value.
    pub value: Value,
}

/// A style rule: a non-empty selector list and its declarations.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Rule {
    /// Alternative selectors; any match applies the declarations.
    pub selectors: Vec<Selector>,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

/// An ordered list of rules. Source order is the entire cascade: later
/// declarations for the same property win.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct Stylesheet {
    /// Rules in source order.
    pub rules: Vec<Rule>,
}

/// Parse style-sheet text.
#[must_use]
pub fn parse(source: &str) -> Stylesheet {
    Parser::new(source).parse_stylesheet()
}

/// Cursor-based parser state.
struct Parser {
    input: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            input: source.chars().collect(),
            pos: 0,
        }
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

    /// Whitespace and `/* … */` comments are interchangeable.
    fn consume_whitespace(&mut self) {
        loop {
            if self.next_char().is_some_and(char::is_whitespace) {
                let _ = self.consume_char();
            } else if self.starts_with("/*") {
                let _ = self.consume_char();
                let _ = self.consume_char();
                while !self.eof() && !self.starts_with("*/") {
                    let _ = self.consume_char();
                }
                let _ = self.consume_char();
                let _ = self.consume_char();
            } else {
                break;
            }
        }
    }

    // ── Grammar ────────────────────────────────────────────────────────

    fn parse_stylesheet(&mut self) -> Stylesheet {
        let mut rules = Vec::new();
        loop {
            self.consume_whitespace();
            if self.eof() {
                break;
            }
            if let Some(rule) = self.parse_rule() {
                rules.push(rule);
            }
        }
        Stylesheet { rules }
    }

    /// `selectors '{' declarations '}'`
    ///
    /// A header that never reaches `{` skips past the next `}` so
    /// subsequent rules still parse.
    fn parse_rule(&mut self) -> Option<Rule> {
        let selectors = self.parse_selectors();
        if self.next_char() != Some('{') {
            let _ = warn_once(Component::Style, "skipping rule with malformed selector header");
            let _ = self.consume_while(|c| c != '}');
            let _ = self.consume_char();
            return None;
        }
        let declarations = self.parse_declarations();
        if selectors.is_empty() {
            let _ = warn_once(Component::Style, "dropping rule with empty selector list");
            return None;
        }
        Some(Rule {
            selectors,
            declarations,
        })
    }

    /// Comma-separated selector alternatives. Whitespace between simple
    /// selectors is tolerated but carries no combinator meaning — each
    /// whitespace-separated chunk just becomes another selector in the
    /// list.
    fn parse_selectors(&mut self) -> Vec<Selector> {
        let mut selectors = Vec::new();
        loop {
            self.consume_whitespace();
            match self.next_char() {
                // `}` means the header is malformed; leave it for the
                // caller's recovery.
                None | Some('{') | Some('}') => break,
                Some(',') => {
                    let _ = self.consume_char();
                    continue;
                }
                _ => {}
            }
            let selector = self.parse_simple_selector();
            if !selector.is_empty() {
                selectors.push(selector);
            }
        }
        selectors
    }

    /// A concatenation of `#id`, `.class`, and bare tag tokens, ending at
    /// whitespace, `,`, `{`, or end-of-input.
    fn parse_simple_selector(&mut self) -> Selector {
        let mut selector = Selector::default();
        while let Some(c) = self.next_char() {
            if c.is_whitespace() || c == ',' || c == '{' || c == '}' {
                break;
            }
            match c {
                '#' => {
                    let _ = self.consume_char();
                    selector.id = Some(self.parse_identifier());
                }
                '.' => {
                    let _ = self.consume_char();
                    selector.classes.push(self.parse_identifier());
                }
                _ => {
                    let tag = self.consume_while(|c| c.is_ascii_alphanumeric());
                    if tag.is_empty() {
                        // Something we do not model (`*`, `>`, `[` ...).
                        // Skip the character so the cursor keeps moving.
                        let _ = self.consume_char();
                    } else {
                        selector.tag_name = Some(tag.to_ascii_lowercase());
                    }
                }
            }
        }
        selector
    }

    /// Identifier in ids and classes: ASCII alphanumeric plus `-`.
    fn parse_identifier(&mut self) -> String {
        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '-')
    }

    /// `'{' declaration* '}'` — the opening brace has been checked by the
    /// caller.
    fn parse_declarations(&mut self) -> Vec<Declaration> {
        let _ = self.consume_char(); // '{'
        let mut declarations = Vec::new();
        loop {
            self.consume_whitespace();
            match self.next_char() {
                None => break,
                Some('}') => {
                    let _ = self.consume_char();
                    break;
                }
                _ => {}
            }
            if let Some(decl) = self.parse_declaration() {
                declarations.push(decl);
            }
        }
        declarations
    }

    /// `property ':' value ';'`
    ///
    /// The value is the raw trimmed text up to `;` (a missing semicolon
    /// before `}` is tolerated), then typed by the coercion ladder.
    fn parse_declaration(&mut self) -> Option<Declaration> {
        let property = self.consume_while(|c| c != ':' && c != ';' && c != '}');
        if self.next_char() != Some(':') {
            // No value at all — drop the fragment, eat a stray ';'.
            let _ = warn_once(Component::Style, "skipping declaration without ':'");
            if self.next_char() == Some(';') {
                let _ = self.consume_char();
            }
            return None;
        }
        let _ = self.consume_char(); // ':'

        let property = property.trim().to_lowercase();
        self.consume_whitespace();
        let raw = self.consume_while(|c| c != ';' && c != '}');
        if self.next_char() == Some(';') {
            let _ = self.consume_char();
        }
        if property.is_empty() {
            return None;
        }
        let value = coerce_value(&property, raw.trim());
        Some(Declaration { property, value })
    }
}

/// The value coercion ladder, in order:
///
/// 1. `display` keywords
/// 2. `flex-direction` keywords
/// 3. `justify-content` keywords
/// 4. `#rrggbb` hex color (any property)
/// 5. `px` length (any property)
/// 6. raw keyword fallback
fn coerce_value(property: &str, raw: &str) -> Value {
    match property {
        "display" => {
            return Value::Display(match raw {
                "flex" => Display::Flex,
                "none" => Display::None,
                _ => Display::Block,
            });
        }
        "flex-direction" => {
            return Value::FlexDirection(if raw == "column" {
                FlexDirection::Column
            } else {
                FlexDirection::Row
            });
        }
        "justify-content" => {
            return Value::Justify(match raw {
                "flex-end" => Justify::FlexEnd,
                "center" => Justify::Center,
                "space-between" => Justify::SpaceBetween,
                "space-around" => Justify::SpaceAround,
                _ => Justify::FlexStart,
            });
        }
        _ => {}
    }

    if raw.starts_with('#') && raw.chars().count() == 7 {
        if let Some(color) = Color::from_hex(raw) {
            return Value::Color(color);
        }
    }

    if let Some(prefix) = raw.strip_suffix("px") {
        if let Ok(px) = prefix.parse::<f32>() {
            return Value::Length(px);
        }
    }

    Value::Keyword(raw.to_string())
}
