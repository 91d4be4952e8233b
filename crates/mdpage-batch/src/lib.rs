//! Folder scanning and batch conversion for mdpage.
//!
//! Given a directory, every discovered `.md` file is converted into a
//! same-named `.html` file inside an `html_output` subdirectory (or a
//! caller-specified output directory). Failures on individual files are
//! logged and skipped; the batch continues and reports a summary.
//!
//! # Example
//!
//! ```ignore
//! use mdpage_batch::{BatchOptions, convert_dir};
//!
//! let summary = convert_dir("docs".as_ref(), &BatchOptions::default())?;
//! println!("{} succeeded, {} skipped", summary.succeeded, summary.skipped);
//! ```

mod scanner;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mdpage_renderer::DocumentRenderer;

pub use scanner::{MarkdownFile, scan};

/// Batch conversion errors.
///
/// Per-file read/write failures are not errors at this level; they are
/// logged, counted as skipped, and the batch continues.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("input directory not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        source: io::Error,
    },
}

/// Options for a batch conversion run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Output directory; defaults to `html_output` inside the input directory.
    pub output_dir: Option<PathBuf>,
    /// Whether mermaid blocks get the interactive container.
    pub diagrams_enabled: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            diagrams_enabled: true,
        }
    }
}

/// Result of a batch conversion run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Files converted and written.
    pub succeeded: usize,
    /// Files skipped because reading, converting, or writing failed.
    pub skipped: usize,
    /// Paths of the written HTML files, in processing order.
    pub outputs: Vec<PathBuf>,
}

/// Convert every markdown file under `dir` into HTML files.
///
/// The output directory is created if absent. Each file's title is its name
/// without extension. One renderer is reused sequentially across the batch;
/// its scratch directory is released before returning.
pub fn convert_dir(dir: &Path, options: &BatchOptions) -> Result<BatchSummary, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::InputNotFound(dir.to_path_buf()));
    }

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| dir.join("html_output"));
    fs::create_dir_all(&output_dir).map_err(|source| BatchError::OutputDir {
        path: output_dir.clone(),
        source,
    })?;

    let files = scan(dir);
    let mut renderer = DocumentRenderer::new();
    let mut summary = BatchSummary::default();

    for file in &files {
        match convert_file(&renderer, file, &output_dir, options.diagrams_enabled) {
            Ok(output) => {
                tracing::debug!(path = %output.display(), "Converted");
                summary.succeeded += 1;
                summary.outputs.push(output);
            }
            Err(e) => {
                tracing::warn!(path = %file.path.display(), error = %e, "Skipping file");
                summary.skipped += 1;
            }
        }
    }

    renderer.cleanup();
    Ok(summary)
}

/// Convert one file; any I/O failure skips just this file.
fn convert_file(
    renderer: &DocumentRenderer,
    file: &MarkdownFile,
    output_dir: &Path,
    diagrams_enabled: bool,
) -> io::Result<PathBuf> {
    let markdown = fs::read_to_string(&file.path)?;
    let title = file.stem();
    let html = renderer.convert(&markdown, &title, diagrams_enabled);

    let output = output_dir.join(format!("{title}.html"));
    fs::write(&output, html)?;
    Ok(output)
}
