//! Single-axis flex layout.
//!
//! [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
//!
//! A minimal subset: one line, no wrapping, no grow/shrink factors.
//! Children first receive their natural block geometry inside the
//! container, then are redistributed along the main axis according to
//! `justify-content`. Column direction is the row algorithm with the
//! axes swapped.

use lemur_dom::DomTree;

use crate::values::{FlexDirection, Justify};

use super::box_model::Dimensions;
use super::{layout_dispatch, LayoutBox};

/// Lay out a flex container and its items.
pub(crate) fn layout_flex(dom: &DomTree, layout_box: &mut LayoutBox<'_>, containing: Dimensions) {
    let styled = layout_box.styled_node;
    let direction = styled.map_or(FlexDirection::Row, |s| s.flex_direction());
    let justify = styled.map_or(Justify::FlexStart, |s| s.justify());

    // STEP 1: The container takes the containing block's position and
    // cross-axis extent; the main-axis extent it distributes over is the
    // containing block's too.
    layout_box.dimensions.x = containing.x;
    layout_box.dimensions.y = containing.y;
    layout_box.dimensions.width = containing.width;
    layout_box.dimensions.height = match direction {
        FlexDirection::Row => 0.0,
        FlexDirection::Column => containing.height,
    };

    // STEP 2: Give every child its natural size by laying it out as a
    // block inside the container's geometry. Positions set here are
    // provisional; step 4 moves each item (and its subtree) to its slot.
    let inner = Dimensions::rect(
        layout_box.dimensions.x,
        layout_box.dimensions.y,
        layout_box.dimensions.width,
        layout_box.dimensions.height,
    );
    for child in &mut layout_box.children {
        layout_dispatch(dom, child, inner, styled);
    }

    // STEP 3: Free space on the main axis (may be negative; items then
    // overflow exactly as the justification arithmetic dictates).
    let count = layout_box.children.len();
    let main_extent = |d: &Dimensions| match direction {
        FlexDirection::Row => d.width,
        FlexDirection::Column => d.height,
    };
    let total: f32 = layout_box
        .children
        .iter()
        .map(|c| main_extent(&c.dimensions))
        .sum();
    let available = match direction {
        FlexDirection::Row => layout_box.dimensions.width,
        FlexDirection::Column => layout_box.dimensions.height,
    };
    let remaining = available - total;

    // STEP 4: Place items along the main axis.
    let (offset, spacing) = justify_offsets(justify, remaining, count);
    let mut max_cross = 0.0_f32;
    match direction {
        FlexDirection::Row => {
            let mut cursor = layout_box.dimensions.x + offset;
            let container_y = layout_box.dimensions.y;
            for child in &mut layout_box.children {
                translate(
                    child,
                    cursor - child.dimensions.x,
                    container_y - child.dimensions.y,
                );
                cursor += child.dimensions.width + spacing;
                max_cross = max_cross.max(child.dimensions.height);
            }
        }
        FlexDirection::Column => {
            let mut cursor = layout_box.dimensions.y + offset;
            let container_x = layout_box.dimensions.x;
            for child in &mut layout_box.children {
                translate(
                    child,
                    container_x - child.dimensions.x,
                    cursor - child.dimensions.y,
                );
                cursor += child.dimensions.height + spacing;
                max_cross = max_cross.max(child.dimensions.width);
            }
        }
    }

    // STEP 5: The cross-axis extent is the explicit one when given,
    // otherwise the largest item.
    match direction {
        FlexDirection::Row => {
            let explicit_height = layout_box.length("height");
            layout_box.dimensions.height = if explicit_height > 0.0 {
                explicit_height
            } else {
                max_cross
            };
        }
        FlexDirection::Column => {
            let explicit_width = layout_box.length("width");
            layout_box.dimensions.width = if explicit_width > 0.0 {
                explicit_width
            } else {
                max_cross
            };
        }
    }
}

/// Compute the main-axis alignment: the distance from the container's
/// main-axis start to the first item, and the gap between items.
///
/// [§ 8.2 justify-content](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
#[allow(clippy::cast_precision_loss)]
fn justify_offsets(justify: Justify, remaining: f32, item_count: usize) -> (f32, f32) {
    if item_count == 0 {
        return (0.0, 0.0);
    }

    match justify {
        // "Flex items are packed toward the start of the line."
        Justify::FlexStart => (0.0, 0.0),

        // "Flex items are packed toward the end of the line."
        Justify::FlexEnd => (remaining, 0.0),

        // "Flex items are packed toward the center of the line."
        Justify::Center => (remaining / 2.0, 0.0),

        // "Flex items are evenly distributed in the line." With a single
        // item this is identical to flex-start.
        Justify::SpaceBetween => {
            if item_count > 1 {
                (0.0, remaining / (item_count - 1) as f32)
            } else {
                (0.0, 0.0)
            }
        }

        // "Flex items are evenly distributed in the line, with half-size
        // spaces on either end."
        Justify::SpaceAround => {
            let spacing = remaining / item_count as f32;
            (spacing / 2.0, spacing)
        }
    }
}

/// Shift a box and its whole subtree by a delta. Children were laid out
/// relative to the provisional position, so they move with it.
fn translate(layout_box: &mut LayoutBox<'_>, dx: f32, dy: f32) {
    layout_box.dimensions.x += dx;
    layout_box.dimensions.y += dy;
    for child in &mut layout_box.children {
        translate(child, dx, dy);
    }
}
