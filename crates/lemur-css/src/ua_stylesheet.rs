//! User-agent stylesheet.
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents
//! elements of HTML documents in ways consistent with general user
//! expectations."
//!
//! These rules enter the cascade before any page rules, so any page rule
//! overrides them — the cascade here is source order and nothing else.

use std::sync::OnceLock;

use crate::parser::{self, Stylesheet};

/// [§ 15.3 The CSS user agent style sheet](https://html.spec.whatwg.org/multipage/rendering.html#the-css-user-agent-style-sheet-and-presentational-hints)
///
/// The subset of the suggested default sheet this engine can express:
/// hidden elements and block-level flow content. Everything else keeps
/// its inline default.
const UA_CSS: &str = "
/* [§ 15.3.1 Hidden elements] */
head, link, meta, script, style, title {
    display: none;
}

/* [§ 15.3.3 Flow content] */
address, article, aside, blockquote, body, center, dd, details, dir,
div, dl, dt, fieldset, figcaption, figure, footer, form, h1, h2, h3,
h4, h5, h6, header, hr, html, li, main, menu, nav, ol, p, pre,
section, summary, ul {
    display: block;
}
";

/// The parsed user-agent stylesheet (parsed once, shared).
pub fn ua_stylesheet() -> &'static Stylesheet {
    static SHEET: OnceLock<Stylesheet> = OnceLock::new();
    SHEET.get_or_init(|| parser::parse(UA_CSS))
}
