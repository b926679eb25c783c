//! Anonymous text box metrics.
//!
//! Text is sized with a monospace approximation: every character advances
//! 0.6 em and a line is 1.2 em tall. Any renderer replacing this must
//! keep the contract that text height is a pure function of font size,
//! string length, and containing-block width.

use lemur_dom::DomTree;

use crate::cascade::StyledNode;

use super::box_model::Dimensions;
use super::LayoutBox;

/// Default font size in pixels when nothing specifies one.
const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Character advance as a fraction of the font size.
const CHAR_WIDTH_EM: f32 = 0.6;

/// Line height as a fraction of the font size.
const LINE_HEIGHT_EM: f32 = 1.2;

/// Lay out an anonymous text box.
///
/// The box spans the containing block's width at its origin and carries
/// no margin or padding. Text nodes inherit only `color`, so the
/// effective font size comes from the text's own map when present,
/// otherwise from the parent block's styled node, otherwise 16 px.
pub(crate) fn layout_text(
    dom: &DomTree,
    layout_box: &mut LayoutBox<'_>,
    containing: Dimensions,
    parent: Option<&StyledNode>,
) {
    layout_box.dimensions.x = containing.x;
    layout_box.dimensions.y = containing.y;
    layout_box.dimensions.width = containing.width;

    let own = layout_box.length("font-size");
    let inherited = parent.map_or(0.0, |s| s.length("font-size"));
    let font_size = if own > 0.0 {
        own
    } else if inherited > 0.0 {
        inherited
    } else {
        DEFAULT_FONT_SIZE
    };

    let text_len = layout_box
        .styled_node
        .and_then(|s| dom.as_text(s.node))
        .map_or(0, |t| t.chars().count());

    // chars-per-line = floor(width / (fs * 0.6)); a box too narrow for a
    // single character still gets one line.
    let chars_per_line = (layout_box.dimensions.width / (font_size * CHAR_WIDTH_EM)).floor();
    #[allow(clippy::cast_precision_loss)]
    let lines = if chars_per_line > 0.0 {
        (text_len as f32 / chars_per_line).ceil()
    } else {
        1.0
    };

    layout_box.dimensions.height = lines * font_size * LINE_HEIGHT_EM;
}
