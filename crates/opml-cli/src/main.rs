use std::fmt::Write as _;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use time::format_description::well_known::Rfc2822;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use opml::{Config, Document, Outline};

#[derive(Debug, Parser)]
#[command(name = "opml", version, about = "Print the outline tree of an OPML document")]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Tree)]
    format: FormatArg,
    /// Print every outline's text on its own line, depth first
    #[arg(long)]
    flatten: bool,
    /// Fail on malformed XML instead of printing an empty document
    #[arg(long)]
    strict: bool,
    /// Maximum element nesting depth (0 means unlimited)
    #[arg(long, value_name = "N")]
    max_depth: Option<u16>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Tree,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(Args::parse()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let input = read_input(&args.input)?;

    let mut config = Config::default();
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    let parser = opml::Parser::with_config(config);

    let document = if args.strict {
        parser.try_parse(&input).context("malformed OPML")?
    } else {
        parser.parse(&input)
    };
    debug!(outlines = document.flatten().len(), "document parsed");

    let output = match (args.format, args.flatten) {
        (FormatArg::Json, false) => serde_json::to_string_pretty(&document)? + "\n",
        (FormatArg::Json, true) => serde_json::to_string_pretty(&document.flatten())? + "\n",
        (FormatArg::Tree, false) => render_tree(&document)?,
        (FormatArg::Tree, true) => render_flat(&document),
    };

    io::stdout()
        .write_all(output.as_bytes())
        .context("failed to write stdout")
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn render_tree(document: &Document) -> Result<String> {
    let mut out = String::new();
    if let Some(title) = document.title() {
        writeln!(out, "title: {title}")?;
    }
    match (document.owner_name(), document.owner_email()) {
        (Some(name), Some(email)) => writeln!(out, "owner: {name} <{email}>")?,
        (Some(name), None) => writeln!(out, "owner: {name}")?,
        (None, Some(email)) => writeln!(out, "owner: <{email}>")?,
        (None, None) => {}
    }
    if let Some(created) = document.date_created() {
        writeln!(out, "created: {}", created.format(&Rfc2822)?)?;
    }
    if let Some(modified) = document.date_modified() {
        writeln!(out, "modified: {}", modified.format(&Rfc2822)?)?;
    }

    if !out.is_empty() && !document.is_empty() {
        out.push('\n');
    }
    for outline in document.outlines() {
        write_outline(&mut out, outline, 0)?;
    }
    Ok(out)
}

fn write_outline(out: &mut String, outline: &Outline, depth: usize) -> Result<()> {
    writeln!(out, "{:indent$}{outline}", "", indent = depth * 2)?;
    for child in outline.outlines() {
        write_outline(out, child, depth + 1)?;
    }
    Ok(())
}

fn render_flat(document: &Document) -> String {
    document
        .iter()
        .map(|outline| format!("{outline}\n"))
        .collect()
}
