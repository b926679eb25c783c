//! Integration tests for the layout engine: block geometry, text
//! metrics, flex distribution.

use lemur_css::{layout_tree, style_tree, BoxType, Dimensions, LayoutBox, StyledNode};
use lemur_dom::DomTree;

const EPSILON: f32 = 0.01;

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// Parse, style, and lay out a page against a viewport.
fn pipeline(markup: &str, css: &str, viewport: Dimensions) -> (DomTree, StyledNode) {
    let dom = lemur_html::parse(markup);
    let sheet = lemur_css::parse(css);
    let root = dom.document_element().expect("markup has a root element");
    let styled = style_tree(&dom, root, &sheet);
    // Smoke-check that the tree lays out at all before the caller digs in.
    assert!(layout_tree(&dom, &styled, viewport).is_some());
    (dom, styled)
}

#[test]
fn test_block_width_and_padding_offsets() {
    // div takes the viewport minus its padding; the child starts after
    // the padding and spans the parent's content width.
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let (dom, styled) = pipeline(
        "<div><p></p></div>",
        "div { padding-left: 10px; padding-right: 10px; } div, p { display: block; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();

    assert_close(root.dimensions.x, 0.0);
    assert_close(root.dimensions.width, 80.0);

    let p = &root.children[0];
    assert_close(p.dimensions.x, 10.0);
    assert_close(p.dimensions.width, 80.0);
}

#[test]
fn test_unspecified_width_fills_containing_block() {
    // width + margins + paddings + borders == containing width.
    let viewport = Dimensions::rect(0.0, 0.0, 200.0, 600.0);
    let (dom, styled) = pipeline(
        "<div></div>",
        "div { display: block; margin-left: 5px; margin-right: 7px; \
               padding-left: 3px; padding-right: 4px; \
               border-left-width: 2px; border-right-width: 1px; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    let d = &root.dimensions;
    assert_close(
        d.width
            + d.margin.left
            + d.margin.right
            + d.padding.left
            + d.padding.right
            + d.border.left
            + d.border.right,
        200.0,
    );
    assert_close(d.x, 5.0);
}

#[test]
fn test_explicit_width_and_height_win() {
    let viewport = Dimensions::rect(0.0, 0.0, 200.0, 600.0);
    let (dom, styled) = pipeline(
        "<div></div>",
        "div { display: block; width: 50px; height: 25px; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    assert_close(root.dimensions.width, 50.0);
    assert_close(root.dimensions.height, 25.0);
}

#[test]
fn test_children_stack_with_margins() {
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let (dom, styled) = pipeline(
        "<div><p></p><p></p></div>",
        "div, p { display: block; } p { height: 10px; margin-top: 3px; margin-bottom: 2px; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();

    // Each child sits at the top of its offset containing block; the
    // cursor advances by the full margin-box height.
    assert_close(root.children[0].dimensions.y, 0.0);
    assert_close(root.children[1].dimensions.y, 15.0);
    assert_close(root.dimensions.height, 30.0);
}

#[test]
fn test_auto_height_includes_own_padding_and_border() {
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let (dom, styled) = pipeline(
        "<div><p></p></div>",
        "div, p { display: block; } p { height: 10px; } \
         div { padding-top: 4px; padding-bottom: 6px; border-top-width: 1px; border-bottom-width: 2px; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    assert_close(root.dimensions.height, 23.0);
    // The child starts below the parent's top padding.
    assert_close(root.children[0].dimensions.y, 4.0);
}

#[test]
fn test_text_box_metrics() {
    // 10 chars at font-size 20 in a 120px line: floor(120 / 12) = 10
    // chars per line, one line, 20 * 1.2 = 24 tall.
    let viewport = Dimensions::rect(0.0, 0.0, 120.0, 600.0);
    let (dom, styled) = pipeline(
        "<div>aaaaaaaaaa</div>",
        "div { display: block; font-size: 20px; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    let text = &root.children[0];
    assert_eq!(text.box_type, BoxType::Anonymous);
    assert_close(text.dimensions.width, 120.0);
    assert_close(text.dimensions.height, 24.0);
    assert_close(root.dimensions.height, 24.0);
}

#[test]
fn test_text_box_wraps_to_multiple_lines() {
    // 25 chars at the 16px default in a 100px line: floor(100 / 9.6) =
    // 10 per line, ceil(25 / 10) = 3 lines, 3 * 19.2 tall.
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let (dom, styled) = pipeline(
        "<div>aaaaaaaaaaaaaaaaaaaaaaaaa</div>",
        "div { display: block; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    assert_close(root.children[0].dimensions.height, 57.6);
}

#[test]
fn test_whitespace_only_text_generates_no_box() {
    // The parser never emits pure-whitespace text between siblings, but
    // scripted mutation can; build the tree by hand to exercise the
    // construction-time filter.
    use lemur_dom::{AttrMap, DomTree, ElementData, NodeId, NodeType};
    let mut dom = DomTree::new();
    let div = dom.alloc(NodeType::Element(ElementData {
        tag_name: "div".to_string(),
        attrs: AttrMap::new(),
    }));
    dom.append_child(NodeId::ROOT, div);
    let blank = dom.alloc(NodeType::Text("   \n\t   ".to_string()));
    dom.append_child(div, blank);
    let real = dom.alloc(NodeType::Text("visible".to_string()));
    dom.append_child(div, real);

    let sheet = lemur_css::parse("div { display: block; }");
    let styled = style_tree(&dom, div, &sheet);
    assert_eq!(styled.children.len(), 2);

    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    // Only the non-whitespace text generated a box, and the blank run
    // contributed no height.
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].box_type, BoxType::Anonymous);
}

#[test]
fn test_display_none_prunes_layout_only() {
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let (dom, styled) = pipeline(
        "<div><script>var x = 1;</script><p>hi</p></div>",
        "div, p { display: block; } script { display: none; }",
        viewport,
    );
    // The styled tree still mirrors the whole document...
    assert_eq!(styled.children.len(), 2);
    // ...but the script subtree generates no box.
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].box_type, BoxType::Block);
}

#[test]
fn test_display_none_root_yields_no_tree() {
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let dom = lemur_html::parse("<div>x</div>");
    let sheet = lemur_css::parse("div { display: none; }");
    let root = dom.document_element().unwrap();
    let styled = style_tree(&dom, root, &sheet);
    assert!(layout_tree(&dom, &styled, viewport).is_none());
}

#[test]
fn test_flex_space_between() {
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let (dom, styled) = pipeline(
        r#"<div class="row"><div class="box"></div><div class="box"></div><div class="box"></div></div>"#,
        ".row { display: flex; justify-content: space-between; } .box { width: 20px; height: 10px; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    assert_eq!(root.box_type, BoxType::Flex);

    let xs: Vec<f32> = root.children.iter().map(|c| c.dimensions.x).collect();
    assert_close(xs[0], 0.0);
    assert_close(xs[1], 40.0);
    assert_close(xs[2], 80.0);
    for child in &root.children {
        assert_close(child.dimensions.y, 0.0);
    }
    assert_close(root.dimensions.height, 10.0);
}

#[test]
fn test_flex_space_between_gaps_constant() {
    let viewport = Dimensions::rect(0.0, 0.0, 177.0, 600.0);
    let (dom, styled) = pipeline(
        r#"<div class="row"><div class="box"></div><div class="box"></div><div class="box"></div><div class="box"></div></div>"#,
        ".row { display: flex; justify-content: space-between; } .box { width: 13px; height: 5px; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    let children = &root.children;
    let first_gap = children[1].dimensions.x - (children[0].dimensions.x + 13.0);
    for pair in children.windows(2) {
        let gap = pair[1].dimensions.x - (pair[0].dimensions.x + 13.0);
        assert!((gap - first_gap).abs() < 0.5);
    }
}

#[test]
fn test_flex_center_midpoints_align() {
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let (dom, styled) = pipeline(
        r#"<div class="row"><div class="box"></div><div class="box"></div></div>"#,
        ".row { display: flex; justify-content: center; } .box { width: 20px; height: 10px; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    let first = root.children.first().unwrap().dimensions;
    let last = root.children.last().unwrap().dimensions;
    let union_mid = (first.x + (last.x + last.width)) / 2.0;
    let container_mid = root.dimensions.x + root.dimensions.width / 2.0;
    assert!((union_mid - container_mid).abs() < 0.5);
}

#[test]
fn test_flex_end_and_space_around() {
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let css_end =
        ".row { display: flex; justify-content: flex-end; } .box { width: 20px; height: 10px; }";
    let (dom, styled) = pipeline(
        r#"<div class="row"><div class="box"></div><div class="box"></div></div>"#,
        css_end,
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    assert_close(root.children[0].dimensions.x, 60.0);
    assert_close(root.children[1].dimensions.x, 80.0);

    let css_around =
        ".row { display: flex; justify-content: space-around; } .box { width: 20px; height: 10px; }";
    let (dom, styled) = pipeline(
        r#"<div class="row"><div class="box"></div><div class="box"></div></div>"#,
        css_around,
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    assert_close(root.children[0].dimensions.x, 15.0);
    assert_close(root.children[1].dimensions.x, 65.0);
}

#[test]
fn test_flex_column_stacks_on_y() {
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 300.0);
    let (dom, styled) = pipeline(
        r#"<div class="col"><div class="item"></div><div class="item"></div></div>"#,
        ".col { display: flex; flex-direction: column; } .item { width: 50px; height: 30px; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    assert_close(root.children[0].dimensions.y, 0.0);
    assert_close(root.children[1].dimensions.y, 30.0);
    assert_close(root.children[0].dimensions.x, 0.0);
    // Cross axis: the container hugs its widest item.
    assert_close(root.dimensions.width, 50.0);
}

#[test]
fn test_flex_repositions_grandchildren() {
    // Moving a flex item must carry its subtree with it.
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let (dom, styled) = pipeline(
        r#"<div class="row"><div class="box"><p></p></div></div>"#,
        ".row { display: flex; justify-content: flex-end; } \
         .box { width: 20px; height: 10px; } p { display: block; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    let item = &root.children[0];
    assert_close(item.dimensions.x, 80.0);
    assert_close(item.children[0].dimensions.x, 80.0);
}

fn geometry_equal(a: &LayoutBox<'_>, b: &LayoutBox<'_>) -> bool {
    a.dimensions == b.dimensions
        && a.children.len() == b.children.len()
        && a.children
            .iter()
            .zip(b.children.iter())
            .all(|(x, y)| geometry_equal(x, y))
}

#[test]
fn test_layout_is_idempotent() {
    let viewport = Dimensions::rect(0.0, 0.0, 123.0, 456.0);
    let (dom, styled) = pipeline(
        r#"<div class="row"><div class="box">abcdef</div><p>text here</p></div>"#,
        ".row { display: flex; justify-content: space-around; } \
         .box { width: 20px; height: 10px; } p { display: block; font-size: 14px; }",
        viewport,
    );
    let first = layout_tree(&dom, &styled, viewport).unwrap();
    let second = layout_tree(&dom, &styled, viewport).unwrap();
    assert!(geometry_equal(&first, &second));
}

#[test]
fn test_inline_box_lays_out_by_block_rule() {
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    // span has no display declaration, so it generates an inline box.
    let (dom, styled) = pipeline(
        "<div><span>hi</span></div>",
        "div { display: block; }",
        viewport,
    );
    let root = layout_tree(&dom, &styled, viewport).unwrap();
    let span = &root.children[0];
    assert_eq!(span.box_type, BoxType::Inline);
    assert_close(span.dimensions.width, 100.0);
}
