//! Conversion entry points for single files and folders.

use std::fs;

use mdpage_batch::BatchOptions;
use mdpage_renderer::DocumentRenderer;

use crate::Cli;
use crate::error::CliError;
use crate::output::Output;

/// Run the conversion described by the CLI arguments.
pub(crate) fn run(cli: &Cli, output: &Output) -> Result<(), CliError> {
    if !cli.input.exists() {
        return Err(CliError::InputNotFound(cli.input.clone()));
    }

    if cli.input.is_dir() {
        run_batch(cli, output)
    } else {
        run_single(cli, output)
    }
}

/// Convert one markdown file to one HTML file.
fn run_single(cli: &Cli, output: &Output) -> Result<(), CliError> {
    let markdown = fs::read_to_string(&cli.input).map_err(|source| CliError::Read {
        path: cli.input.clone(),
        source,
    })?;

    let out_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("html"));

    let mut renderer = DocumentRenderer::new();
    let html = renderer.convert(&markdown, &cli.title, !cli.no_images);
    renderer.cleanup();

    fs::write(&out_path, html).map_err(|source| CliError::Write {
        path: out_path.clone(),
        source,
    })?;

    output.success(&format!("HTML created successfully: {}", out_path.display()));
    Ok(())
}

/// Convert every markdown file in a folder; failures skip, the batch continues.
fn run_batch(cli: &Cli, output: &Output) -> Result<(), CliError> {
    output.info(&format!("Converting folder: {}", cli.input.display()));

    let options = BatchOptions {
        output_dir: cli.output.clone(),
        diagrams_enabled: !cli.no_images,
    };
    let summary = mdpage_batch::convert_dir(&cli.input, &options)?;

    if summary.skipped > 0 {
        output.warning(&format!(
            "{} succeeded, {} skipped",
            summary.succeeded, summary.skipped
        ));
    } else {
        output.success(&format!("{} succeeded, 0 skipped", summary.succeeded));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cli(input: PathBuf, output_path: Option<PathBuf>, no_images: bool) -> Cli {
        Cli {
            input,
            output: output_path,
            title: "Document".to_owned(),
            no_images,
            verbose: false,
        }
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let args = cli(PathBuf::from("/nonexistent/input.md"), None, false);
        let err = run(&args, &Output::new()).unwrap_err();
        assert!(matches!(err, CliError::InputNotFound(_)));
    }

    #[test]
    fn test_single_file_default_output_path() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("notes.md");
        fs::write(&input, "# Notes\n").unwrap();

        run(&cli(input.clone(), None, false), &Output::new()).unwrap();

        let html = fs::read_to_string(temp.path().join("notes.html")).unwrap();
        assert!(html.contains("<title>Document</title>"));
        assert!(html.contains("<h1 id=\"notes\">Notes"));
    }

    #[test]
    fn test_single_file_no_images_forces_fallback() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("d.md");
        fs::write(&input, "```mermaid\ngraph TD; A-->B;\n```\n").unwrap();
        let out = temp.path().join("d.html");

        run(&cli(input, Some(out.clone()), true), &Output::new()).unwrap();

        let html = fs::read_to_string(out).unwrap();
        assert!(!html.contains("<div class=\"mermaid\">"));
        assert!(html.contains("language-mermaid"));
    }

    #[test]
    fn test_folder_input_runs_batch() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a.md"), "# A").unwrap();
        fs::write(temp.path().join("b.md"), "# B").unwrap();

        run(&cli(temp.path().to_path_buf(), None, false), &Output::new()).unwrap();

        let out = temp.path().join("html_output");
        assert!(out.join("a.html").is_file());
        assert!(out.join("b.html").is_file());
    }
}
