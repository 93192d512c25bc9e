//! Thicket CLI
//!
//! Parse a markup file (or an inline string) and print the tree, the
//! re-serialized markup, the raw segments, tables, or the problems lenient
//! parsing recovered from.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};
use clap::{ArgAction, Parser, ValueEnum};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thicket_common::warning::LOG_TARGET;
use thicket_dom::{Cell, Document, DomTree, MAX_INDENT_SIZE, NodeId, NodeType, WriteOptions};
use thicket_html::{HTMLParser, HTMLTokenizer, ParseMode, ParseOptions, tree_outline};

/// Thicket: a tolerant parser for HTML-like markup
#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(name = "thicket")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the node tree
    thicket page.html

    # Validate strictly
    thicket --strict page.html

    # Pretty-print with tabs
    thicket --format html --tabs page.html

    # Dump the tables of a page
    thicket --format tables page.html

    # Parse inline markup
    thicket --html '<p>a<b>b</p>'
"#)]
struct Cli {
    /// Markup file to parse
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this string instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// JSON file with `parse` and `write` option sections
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail on the first structural problem
    #[arg(long)]
    strict: bool,

    /// Keep comments in the tree
    #[arg(long)]
    comments: bool,

    /// Only print elements with this tag name
    #[arg(long, value_name = "TAG")]
    tag: Option<String>,

    /// Only print elements with this class
    #[arg(long, value_name = "CLASS")]
    class: Option<String>,

    /// Only print the element with this id
    #[arg(long, value_name = "ID")]
    id: Option<String>,

    /// Write everything on one line
    #[arg(long)]
    compact: bool,

    /// Spaces per indentation level
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Indent with tabs
    #[arg(long)]
    tabs: bool,

    /// Write childless elements as `<tag></tag>`
    #[arg(long)]
    no_self_closing: bool,

    /// Never keep a short text child on its parent's line
    #[arg(long)]
    no_shrink: bool,

    /// Longest text kept on its parent's line
    #[arg(long, value_name = "N")]
    shrink_limit: Option<usize>,

    /// More logging (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented node outline
    Tree,
    /// Node tree as JSON
    Json,
    /// Re-serialized markup
    Html,
    /// Flattened single-line markup
    Flat,
    /// Tokenizer segments with their byte ranges
    Segments,
    /// Table rows and cells
    Tables,
    /// Problems recovered from while parsing
    Issues,
}

/// The formats that render a built document.
#[derive(Clone, Copy, Debug)]
enum View {
    Tree,
    Json,
    Html,
    Flat,
    Tables,
}

/// Options file layout.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    parse: ParseOptions,
    write: WriteOptions,
}

impl Config {
    fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Command-line flags win over the file.
    fn validate(&self) -> Result<()> {
        ensure!(
            self.write.indent_size <= MAX_INDENT_SIZE,
            "indent size {} exceeds the maximum of {MAX_INDENT_SIZE}",
            self.write.indent_size
        );
        Ok(())
    }

    fn apply(&mut self, cli: &Cli) {
        if cli.strict {
            self.parse.mode = ParseMode::Strict;
        }
        if cli.comments {
            self.parse.keep_comments = true;
        }
        if cli.compact {
            self.write.pretty = false;
        }
        if let Some(indent) = cli.indent {
            self.write.indent_size = indent;
        }
        if cli.tabs {
            self.write.use_tabs = true;
        }
        if cli.no_self_closing {
            self.write.self_closing = false;
        }
        if cli.no_shrink {
            self.write.shrink_text = false;
        }
        if let Some(limit) = cli.shrink_limit {
            self.write.shrink_limit = limit;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply(&cli);
    config.validate()?;
    log::debug!(target: LOG_TARGET, "parse options: {:?}", config.parse);

    let source = load_source(&cli)?;

    let view = match cli.format {
        Format::Segments => return print_segments(&source, &config.parse),
        Format::Issues => return print_issues(&source, &config.parse),
        Format::Tree => View::Tree,
        Format::Json => View::Json,
        Format::Html => View::Html,
        Format::Flat => View::Flat,
        Format::Tables => View::Tables,
    };

    let document = HTMLParser::new(&source, &config.parse)
        .run()
        .context("parse failed")?;
    let selection = select(&cli, &document);
    print_document(view, &document, selection.as_deref(), &config.write)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_source(cli: &Cli) -> Result<String> {
    if let Some(html) = &cli.html {
        Ok(html.clone())
    } else if let Some(path) = &cli.path {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    } else {
        bail!("expected a file path or --html")
    }
}

/// Elements matching `--id`, `--class` and `--tag`, or `None` for the whole
/// document. Filters combine.
fn select(cli: &Cli, document: &Document) -> Option<Vec<NodeId>> {
    let mut selected: Option<Vec<NodeId>> = None;
    let mut narrow = |found: Vec<NodeId>| {
        selected = Some(match selected.take() {
            Some(previous) => previous.into_iter().filter(|id| found.contains(id)).collect(),
            None => found,
        });
    };

    if let Some(id) = &cli.id {
        narrow(document.element_by_id(id).into_iter().collect());
    }
    if let Some(class) = &cli.class {
        narrow(document.elements_by_class_name(class));
    }
    if let Some(tag) = &cli.tag {
        narrow(document.elements_by_tag_name(tag));
    }
    selected
}

fn print_document(
    view: View,
    document: &Document,
    selection: Option<&[NodeId]>,
    write: &WriteOptions,
) -> Result<()> {
    let tree = document.tree();
    let roots = selection.unwrap_or(&[NodeId::ROOT]);

    match view {
        View::Tree => {
            for &id in roots {
                print!("{}", tree_outline(tree, id));
            }
        }
        View::Json => {
            let nodes: Vec<Value> = roots.iter().map(|&id| node_to_json(tree, id)).collect();
            let value = match nodes.as_slice() {
                [single] => single.clone(),
                _ => Value::Array(nodes),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        View::Html => {
            for &id in roots {
                println!("{}", tree.write(id, write));
            }
        }
        View::Flat => {
            for &id in roots {
                println!("{}", tree.outer_html(id));
            }
        }
        View::Tables => print_tables(document, selection),
    }
    Ok(())
}

fn print_tables(document: &Document, selection: Option<&[NodeId]>) {
    let tree = document.tree();
    let tables = match selection {
        Some(ids) => ids.iter().flat_map(|&id| tree.tables(id)).collect(),
        // fragments without a body still get their tables listed
        None if document.body().is_none() => tree.tables(NodeId::ROOT),
        None => document.tables(),
    };

    for (index, table) in tables.iter().enumerate() {
        println!("{}", format!("=== Table {index} ===").bold());
        for (label, rows) in [
            ("head", table.head()),
            ("body", table.body()),
            ("foot", table.foot()),
        ] {
            for row in rows {
                let cells: Vec<String> = row.cells().iter().map(Cell::text).collect();
                println!("{:>4} | {}", label.dimmed(), cells.join(" | "));
            }
        }
    }
}

fn print_segments(source: &str, options: &ParseOptions) -> Result<()> {
    for segment in HTMLTokenizer::new(source, options) {
        let segment = segment.context("tokenize failed")?;
        let span = segment.span();
        println!(
            "{:>7} {:>6}..{:<6} {segment}",
            segment.kind().cyan(),
            span.start,
            span.end
        );
    }
    Ok(())
}

fn print_issues(source: &str, options: &ParseOptions) -> Result<()> {
    match HTMLParser::new(source, options).run_with_issues() {
        Ok((_, issues)) if issues.is_empty() => println!("{}", "no issues".green()),
        Ok((_, issues)) => {
            for issue in issues {
                let location = issue
                    .position
                    .as_ref()
                    .map_or_else(|| "end of input".to_string(), ToString::to_string);
                println!("{}: {} ({location})", issue.kind.yellow(), issue.message);
            }
        }
        Err(error) => {
            println!("{}: {error}", "error".red().bold());
            bail!("strict parse failed");
        }
    }
    Ok(())
}

/// JSON view of a node and its subtree.
fn node_to_json(tree: &DomTree, id: NodeId) -> Value {
    let mut obj = Map::new();
    let Some(node) = tree.get(id) else {
        return Value::Null;
    };

    match &node.node_type {
        NodeType::Document => {
            let _ = obj.insert("type".to_string(), json!("document"));
        }
        NodeType::Element(data) => {
            let _ = obj.insert("type".to_string(), json!("element"));
            let _ = obj.insert("tagName".to_string(), json!(data.tag_name));
            let attrs: Map<String, Value> = data
                .attrs
                .iter()
                .map(|attr| (attr.name.clone(), json!(attr.value)))
                .collect();
            let _ = obj.insert("attributes".to_string(), Value::Object(attrs));
        }
        NodeType::Text(text) => {
            let _ = obj.insert("type".to_string(), json!("text"));
            let _ = obj.insert("content".to_string(), json!(text));
        }
        NodeType::Comment(text) => {
            let _ = obj.insert("type".to_string(), json!("comment"));
            let _ = obj.insert("content".to_string(), json!(text));
        }
    }

    if !node.children.is_empty() {
        let children: Vec<Value> = node
            .children
            .iter()
            .map(|&child| node_to_json(tree, child))
            .collect();
        let _ = obj.insert("children".to_string(), Value::Array(children));
    }

    Value::Object(obj)
}
