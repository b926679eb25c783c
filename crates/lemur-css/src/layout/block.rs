//! Block layout.
//!
//! [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
//!
//! "In a block formatting context, boxes are laid out one after the
//! other, vertically, beginning at the top of a containing block."
//!
//! Margins never collapse in this engine. A box is placed at the top of
//! its offset containing block; its own top margin takes effect through
//! the parent's running children height, which advances by the child's
//! full margin-box height after each child.

use lemur_dom::DomTree;

use super::box_model::{Dimensions, Edges};
use super::{layout_dispatch, LayoutBox};

/// Lay out a block-level box and its descendants.
///
/// Inline boxes come through here too: without an inline formatting
/// context they stack like blocks.
pub(crate) fn layout_block(dom: &DomTree, layout_box: &mut LayoutBox<'_>, containing: Dimensions) {
    // STEP 1: Read edge sizes. Absent properties resolve to 0.
    let margin = Edges {
        top: layout_box.length("margin-top"),
        right: layout_box.length("margin-right"),
        bottom: layout_box.length("margin-bottom"),
        left: layout_box.length("margin-left"),
    };
    let padding = Edges {
        top: layout_box.length("padding-top"),
        right: layout_box.length("padding-right"),
        bottom: layout_box.length("padding-bottom"),
        left: layout_box.length("padding-left"),
    };
    let border = Edges {
        top: layout_box.length("border-top-width"),
        right: layout_box.length("border-right-width"),
        bottom: layout_box.length("border-bottom-width"),
        left: layout_box.length("border-left-width"),
    };
    layout_box.dimensions.margin = margin;
    layout_box.dimensions.padding = padding;
    layout_box.dimensions.border = border;

    // STEP 2: Position. The left margin offsets the box; the top margin
    // does not — it is accounted for by the parent's cursor advance.
    layout_box.dimensions.x = containing.x + margin.left;
    layout_box.dimensions.y = containing.y;

    // STEP 3: Content width. An explicit positive `width` wins as-is;
    // otherwise the box takes what the containing block leaves after its
    // horizontal margins, padding, and border widths, so that
    //
    //   width + margins + paddings + borders = containing width
    //
    // holds exactly whenever `width` is unspecified.
    let explicit_width = layout_box.length("width");
    layout_box.dimensions.width = if explicit_width > 0.0 {
        explicit_width
    } else {
        containing.width
            - (margin.left
                + margin.right
                + padding.left
                + padding.right
                + border.left
                + border.right)
    };

    // STEP 4: Content origin for children. The width computed above is
    // already the content width.
    let content = Dimensions::rect(
        containing.x + margin.left + padding.left,
        layout_box.dimensions.y + padding.top,
        layout_box.dimensions.width,
        0.0,
    );

    // STEP 5: Children stack at the running height. Anonymous children
    // have no margins, so the uniform margin-box advance is exact for
    // them too.
    let mut children_height = 0.0;
    let parent_styled = layout_box.styled_node;
    for child in &mut layout_box.children {
        let mut child_containing = content;
        child_containing.y += children_height;
        layout_dispatch(dom, child, child_containing, parent_styled);
        children_height += child.dimensions.margin_box_height();
    }

    // STEP 6: Height. Explicit positive `height` wins as-is; otherwise
    // the children's stacked height plus this box's own vertical padding
    // and border.
    let explicit_height = layout_box.length("height");
    layout_box.dimensions.height = if explicit_height > 0.0 {
        explicit_height
    } else {
        children_height + padding.top + padding.bottom + border.top + border.bottom
    };
}
