//! Lemur CLI
//!
//! A headless front end to the rendering pipeline for testing and
//! debugging: parse a page, run its scripts, and inspect the DOM,
//! layout geometry, or sandbox log without any graphics shell.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;

use lemur_css::{BoxType, Dimensions, LayoutBox};
use lemur_dom::DomTree;
use lemur_engine::{load_page, ContentBlocker, Page};

/// Lemur CLI - a headless rendering pipeline for testing and debugging
#[derive(Parser, Debug)]
#[command(name = "lemur-cli")]
#[command(author, version, about, long_about = None)]
#[command(group = clap::ArgGroup::new("input").required(true))]
#[command(after_help = r#"EXAMPLES:
    # Parse a local file and show the DOM tree
    lemur-cli ./index.html

    # Fetch a URL and show the DOM tree
    lemur-cli https://example.com

    # Show the computed layout geometry
    lemur-cli --layout ./index.html

    # Parse inline markup with a stylesheet
    lemur-cli --html '<div class="row"><p>Hi</p></div>' --css styles.css --layout

    # Run a script against the page and show its console output
    lemur-cli ./index.html --script patch.js --logs

    # Dump the layout tree as JSON with a custom viewport
    lemur-cli --html '<div>Hi</div>' --json --width 800 --height 600

    # Block resources whose URL contains a substring
    lemur-cli https://example.com --block ads. --block tracker
"#)]
struct Cli {
    /// Path to a markup file or URL to fetch and parse
    #[arg(value_name = "FILE|URL", group = "input")]
    path: Option<String>,

    /// Parse a markup string directly instead of a file/URL
    #[arg(long, value_name = "HTML", group = "input")]
    html: Option<String>,

    /// Stylesheet file applied to the page (inline <style> text still
    /// applies on top)
    #[arg(long, value_name = "FILE")]
    css: Option<PathBuf>,

    /// Script file run against the page after inline scripts
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Show the computed layout tree with box geometry instead of the
    /// DOM tree
    #[arg(long)]
    layout: bool,

    /// Dump the layout tree as pretty-printed JSON
    #[arg(long, conflicts_with = "layout")]
    json: bool,

    /// Print the sandbox console log after the pipeline runs
    #[arg(long)]
    logs: bool,

    /// Block URLs containing this substring (repeatable)
    #[arg(long, value_name = "RULE")]
    block: Vec<String>,

    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "720")]
    height: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut blocker = ContentBlocker::new();
    blocker.load_rules(cli.block.iter().cloned());

    let css = match &cli.css {
        Some(path) => fs::read_to_string(path)?,
        None => String::new(),
    };
    let script = match &cli.script {
        Some(path) => Some(fs::read_to_string(path)?),
        None => None,
    };

    let page = if let Some(html) = &cli.html {
        Page::load(html, &css, script.as_deref())
    } else if let Some(path) = &cli.path {
        load_page(path, &blocker, &css, script.as_deref())
    } else {
        // clap should prevent this, but just in case
        anyhow::bail!("either a file/URL path or --html must be provided");
    };

    #[allow(clippy::cast_precision_loss)]
    let viewport = Dimensions::rect(0.0, 0.0, cli.width as f32, cli.height as f32);

    if cli.json {
        match page.layout(viewport) {
            Some(root) => println!("{}", serde_json::to_string_pretty(&root)?),
            None => println!("null"),
        }
    } else if cli.layout {
        println!("{}", "Layout tree".cyan().bold());
        match page.layout(viewport) {
            Some(root) => print_layout(&page.document(), &root, 0),
            None => println!("  (no boxes)"),
        }
    } else {
        println!("{}", "DOM tree".cyan().bold());
        let tree = page.document();
        lemur_html::print_tree(&tree, tree.root(), 0);
    }

    if cli.logs {
        println!();
        println!("{}", "Console".cyan().bold());
        if page.logs().is_empty() {
            println!("  (empty)");
        }
        for entry in page.logs() {
            if entry.starts_with("JS Error:") {
                println!("  {}", entry.red());
            } else {
                println!("  {entry}");
            }
        }
    }

    Ok(())
}

/// Print an indented layout tree with box kinds, node labels, and
/// geometry.
fn print_layout(tree: &DomTree, layout_box: &LayoutBox<'_>, indent: usize) {
    let prefix = "  ".repeat(indent);

    let kind = match layout_box.box_type {
        BoxType::Block => "block",
        BoxType::Inline => "inline",
        BoxType::Anonymous => "text",
        BoxType::Flex => "flex",
    };

    let label = layout_box
        .styled_node
        .map_or_else(String::new, |styled| match tree.as_element(styled.node) {
            Some(data) => format!("<{}>", data.tag_name),
            None => {
                let text = tree.as_text(styled.node).unwrap_or_default();
                let mut preview: String = text.trim().chars().take(20).collect();
                if text.trim().chars().count() > 20 {
                    preview.push('…');
                }
                format!("\"{preview}\"")
            }
        });

    let d = &layout_box.dimensions;
    println!(
        "{prefix}{} {} x={:.1} y={:.1} w={:.1} h={:.1}",
        kind.green(),
        label,
        d.x,
        d.y,
        d.width,
        d.height
    );

    for child in &layout_box.children {
        print_layout(tree, child, indent + 1);
    }
}
