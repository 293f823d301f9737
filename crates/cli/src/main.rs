mod config;
mod input;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use folio_markdown::{Document, Renderer, TocEntry};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::load_options;
use crate::input::{collect_sources, read_source, Source};

#[derive(ClapParser)]
#[command(name = "folio-md")]
#[command(about = "Markdown renderer for the folio blog")]
#[command(version)]
struct Cli {
    /// Renderer options file (defaults to ./markdown.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render Markdown files or directories to HTML
    Render {
        /// Files, directories, or `-` for stdin
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Write .html files here instead of printing to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit title, HTML, table of contents and reading time as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the table of contents of a Markdown file
    Toc {
        /// File, or `-` for stdin
        path: PathBuf,

        /// Emit JSON instead of an indented list
        #[arg(long)]
        json: bool,
    },

    /// Print the estimated reading time of a Markdown file
    ReadingTime {
        /// File, or `-` for stdin
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let options = load_options(cli.config.as_deref())?;
    let renderer = Renderer::new(options);

    match cli.command {
        Commands::Render {
            paths,
            output,
            json,
        } => render(&renderer, &paths, output.as_deref(), json)?,
        Commands::Toc { path, json } => print_toc(&renderer, &path, json)?,
        Commands::ReadingTime { path } => {
            let source = read_source(&path)?;
            let document = parse_document(&source)?;
            println!("{} min read", renderer.reading_time(document.body));
        }
    }

    Ok(())
}

fn render(renderer: &Renderer, paths: &[PathBuf], output: Option<&Path>, json: bool) -> Result<()> {
    let sources = collect_sources(paths)?;
    if sources.is_empty() {
        anyhow::bail!("No markdown files found");
    }

    let Some(output_dir) = output else {
        let mut documents = Vec::with_capacity(sources.len());
        for source in &sources {
            let document = renderer
                .render_document(&source.content)
                .with_context(|| format!("Failed to render {}", source.label()))?;
            documents.push(document);
        }

        if json {
            let value = if documents.len() == 1 {
                serde_json::to_string_pretty(&documents[0])?
            } else {
                serde_json::to_string_pretty(&documents)?
            };
            println!("{}", value);
        } else {
            for document in &documents {
                print!("{}", document.html);
            }
        }
        return Ok(());
    };

    let mut rendered = 0;
    for source in &sources {
        if source.path.is_none() {
            anyhow::bail!("stdin cannot be written to an output directory");
        }

        println!("🔨 Rendering: {}", source.label());
        let document = renderer
            .render_document(&source.content)
            .with_context(|| format!("Failed to render {}", source.label()))?;

        let (relative, body) = if json {
            (
                source.relative.with_extension("json"),
                serde_json::to_string_pretty(&document)?,
            )
        } else {
            (source.html_path(), document.html)
        };

        let target = output_dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&target, body).with_context(|| format!("Failed to write {}", target.display()))?;
        println!("   ✓ {}", target.display());
        rendered += 1;
    }

    println!("\n✅ Rendered {} file(s)", rendered);
    Ok(())
}

fn parse_document(source: &Source) -> Result<Document<'_>> {
    Document::parse(&source.content).with_context(|| format!("Failed to parse {}", source.label()))
}

fn print_toc(renderer: &Renderer, path: &Path, json: bool) -> Result<()> {
    let source = read_source(path)?;
    let document = parse_document(&source)?;
    let toc: Vec<TocEntry> = renderer.toc(document.body).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&toc)?);
        return Ok(());
    }

    for entry in &toc {
        let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
        println!("{}- {} (#{})", indent, entry.text, entry.id);
    }

    Ok(())
}
