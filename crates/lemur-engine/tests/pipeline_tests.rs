//! End-to-end pipeline tests: parse → script → style → layout.

use lemur_css::{BoxType, Color, Dimensions};
use lemur_engine::{fetch_document, load_page, ContentBlocker, LoadError, Page};

#[test]
fn test_script_mutation_feeds_styling() {
    let page = Page::load(
        r#"<div id="m">A</div>"#,
        "",
        Some("var e = document.getElementById('m'); e.innerHTML = 'B';"),
    );

    let tree = page.document();
    let div = tree.get_element_by_id("m").expect("div present");
    let children = tree.children(div);
    assert_eq!(children.len(), 1);
    assert_eq!(tree.as_text(children[0]), Some("B"));
    drop(tree);

    // Styling observes the mutated document: the styled tree mirrors the
    // post-script children.
    let styled = page.styled().expect("styled tree");
    assert_eq!(styled.children.len(), 1);
}

#[test]
fn test_inline_scripts_run_in_document_order() {
    let page = Page::load(
        r#"<div>
             <script>console.log("first");</script>
             <p>content</p>
             <script>console.log("second", 1 + 1);</script>
           </div>"#,
        "",
        None,
    );
    assert_eq!(page.logs(), &["first".to_string(), "second 2".to_string()]);
}

#[test]
fn test_script_failure_does_not_abort_load() {
    let page = Page::load(
        r#"<div id="m"><script>boom();</script><p>still here</p></div>"#,
        "p { color: #ff0000; }",
        None,
    );

    assert_eq!(page.logs().len(), 1);
    assert!(page.logs()[0].starts_with("JS Error: "));

    // The pipeline carried on: styling and layout both work.
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    assert!(page.layout(viewport).is_some());
}

#[test]
fn test_script_elements_generate_no_boxes() {
    // The UA stylesheet hides script elements; their text must not
    // contribute geometry.
    let page = Page::load(
        r#"<div><script>var hidden = "should not render";</script><p>hi</p></div>"#,
        "",
        None,
    );
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let root = page.layout(viewport).expect("layout tree");
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].box_type, BoxType::Block);
}

#[test]
fn test_inline_style_overrides_provided_sheet() {
    let page = Page::load(
        "<div><style>p { color: #00ff00; }</style><p>x</p></div>",
        "p { color: #ff0000; }",
        None,
    );
    let tree = page.document();
    let styled = page.styled().expect("styled tree");
    // children: [style, p] — the style element's text comes later in the
    // cascade than the provided sheet.
    let p = styled
        .children
        .iter()
        .find(|c| tree.as_element(c.node).is_some_and(|e| e.tag_name == "p"))
        .expect("p styled node");
    assert_eq!(
        p.color("color"),
        Some(Color {
            r: 0,
            g: 255,
            b: 0,
            a: 255
        })
    );
}

#[test]
fn test_flex_page_lays_out_end_to_end() {
    let page = Page::load(
        r#"<div class="row"><div class="box"></div><div class="box"></div><div class="box"></div></div>"#,
        ".row { display: flex; justify-content: space-between; } .box { width: 20px; height: 10px; }",
        None,
    );
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);
    let root = page.layout(viewport).expect("layout tree");

    let xs: Vec<f32> = root.children.iter().map(|c| c.dimensions.x).collect();
    assert_eq!(xs.len(), 3);
    assert!((xs[0] - 0.0).abs() < 0.01);
    assert!((xs[1] - 40.0).abs() < 0.01);
    assert!((xs[2] - 80.0).abs() < 0.01);
    assert!((root.dimensions.height - 10.0).abs() < 0.01);
}

#[test]
fn test_new_load_supersedes_previous_trees() {
    let viewport = Dimensions::rect(0.0, 0.0, 100.0, 600.0);

    let first = Page::load("<div><p>one</p></div>", "", None);
    let first_root = first.layout(viewport).expect("layout tree");
    assert_eq!(first_root.children.len(), 1);

    let second = Page::load("<div><p>one</p><p>two</p></div>", "", None);
    let second_root = second.layout(viewport).expect("layout tree");
    assert_eq!(second_root.children.len(), 2);
}

#[test]
fn test_blocked_url_yields_error_document() {
    let mut blocker = ContentBlocker::new();
    blocker.load_rules(["doubleclick"]);

    assert!(matches!(
        fetch_document("http://doubleclick.example/ad.html", &blocker),
        Err(LoadError::Blocked)
    ));

    // The page loader substitutes markup instead of failing.
    let page = load_page("http://doubleclick.example/ad.html", &blocker, "", None);
    let tree = page.document();
    let root = tree.document_element().expect("error document parses");
    assert_eq!(tree.as_element(root).unwrap().tag_name, "html");
}

#[test]
fn test_missing_file_yields_error_document() {
    let blocker = ContentBlocker::new();
    let page = load_page("definitely-missing-file.html", &blocker, "", None);
    let viewport = Dimensions::rect(0.0, 0.0, 200.0, 600.0);
    // The error document renders like any other page.
    assert!(page.layout(viewport).is_some());
}

#[test]
fn test_local_file_loads_through_pipeline() {
    let path = std::env::temp_dir().join("lemur-pipeline-test.html");
    std::fs::write(&path, r#"<div id="local"><p>from disk</p></div>"#).expect("write temp file");

    let blocker = ContentBlocker::new();
    let page = load_page(path.to_str().expect("utf-8 path"), &blocker, "", None);
    assert!(page.document().get_element_by_id("local").is_some());

    let _ = std::fs::remove_file(&path);
}
