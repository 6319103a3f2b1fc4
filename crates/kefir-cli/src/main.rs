//! kefir CLI - Main Entry Point

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use kefir::{parse_descriptors, write_document, Compiler, CompilerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kefir", version, about = "Compile a JSON UI description into an HTML page")]
struct Cli {
    /// JSON file holding an array of UI descriptors
    input: PathBuf,

    /// Output file (default: INPUT with an .html extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Indent the generated HTML
    #[arg(long)]
    pretty: bool,

    /// id of the container holding the page's elements
    #[arg(long, default_value = "root")]
    root_id: String,

    /// Echo the generated document to stdout
    #[arg(long)]
    print: bool,

    /// Dump diagnostics to stdout as JSON
    #[arg(long)]
    diagnostics_json: bool,
}

impl Cli {
    fn config(&self) -> CompilerConfig {
        CompilerConfig {
            root_id: self.root_id.clone(),
            pretty_print: self.pretty,
            ..CompilerConfig::default()
        }
    }

    fn output_path(&self) -> PathBuf {
        default_output(&self.input, self.output.as_deref())
    }
}

fn default_output(input: &Path, output: Option<&Path>) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("html"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{}", kefir::banner());

    run(&Cli::parse())
}

fn run(cli: &Cli) -> Result<()> {
    let src = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let descriptors = parse_descriptors(&src)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;

    let compiler = Compiler::new(descriptors).with_config(cli.config());
    let compilation = compiler.compile();
    let html = compilation.to_html(&compiler.serializer());

    if cli.print {
        println!("{html}");
    }
    if cli.diagnostics_json {
        println!("{}", serde_json::to_string_pretty(&compilation.diagnostics)?);
    }
    if !compilation.is_clean() {
        tracing::warn!("{} descriptor(s) had problems", compilation.diagnostics.len());
    }

    let out_path = cli.output_path();
    write_document(&out_path, &html)?;
    Ok(())
}
