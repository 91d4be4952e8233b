//! mdpage CLI - Markdown to HTML converter with Mermaid diagram support.
//!
//! Converts a markdown file (or every `.md` file in a folder) into styled,
//! self-contained HTML. Mermaid code blocks are embedded for client-side
//! rendering by Mermaid.js; `--no-images` quotes their source instead.

mod convert;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use output::Output;

/// mdpage - Markdown to HTML converter.
#[derive(Parser)]
#[command(name = "mdpage", version, about)]
pub(crate) struct Cli {
    /// Input markdown file, or a folder to convert recursively.
    pub(crate) input: PathBuf,

    /// Output HTML path (single file) or output directory (folder mode).
    /// Defaults to the input stem with `.html`, or `<folder>/html_output`.
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Document title for single-file conversion.
    #[arg(short, long, default_value = "Document")]
    pub(crate) title: String,

    /// Skip interactive Mermaid rendering; quote diagram source instead.
    #[arg(long)]
    pub(crate) no_images: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = convert::run(&cli, &output) {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
