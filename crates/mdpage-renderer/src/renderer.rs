//! Document conversion pipeline.

use std::fmt::Write;

use pulldown_cmark::{Options, Parser};

use mdpage_diagrams::{MermaidSubstituter, RenderMode};

use crate::html::{HtmlRenderer, TOC_PLACEHOLDER, TocEntry, escape_html};
use crate::template;

/// Converts markdown text into complete, self-contained HTML documents.
///
/// The pipeline per call: mermaid block substitution, markdown to HTML via a
/// fresh [`HtmlRenderer`], `[TOC]` placeholder replacement, page template.
/// Conversion performs no disk I/O; writing the result is the caller's job.
///
/// When the substituter's scratch directory cannot be acquired at
/// construction, a warning is logged and all conversions use the static
/// fallback fragment instead of the interactive container.
pub struct DocumentRenderer {
    substituter: Option<MermaidSubstituter>,
}

impl DocumentRenderer {
    #[must_use]
    pub fn new() -> Self {
        let substituter = match MermaidSubstituter::new() {
            Ok(sub) => Some(sub),
            Err(e) => {
                tracing::warn!(error = %e, "Mermaid substituter unavailable, diagrams will use static fallback");
                None
            }
        };
        Self { substituter }
    }

    /// Convert markdown to a complete HTML document string.
    ///
    /// With `diagrams_enabled`, mermaid blocks get the interactive container;
    /// if that path fails, a warning is logged and the same text is retried
    /// through the static fallback. With diagrams disabled, the static
    /// fallback is used directly and no interactive markup is ever emitted.
    #[must_use]
    pub fn convert(&self, markdown: &str, title: &str, diagrams_enabled: bool) -> String {
        let substituted = self.substitute(markdown, diagrams_enabled);

        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(&substituted, options);
        let result = HtmlRenderer::new().render(parser);

        let body = replace_toc_placeholder(&result.html, &result.toc);
        template::render_document(title, &body)
    }

    fn substitute(&self, markdown: &str, diagrams_enabled: bool) -> String {
        if diagrams_enabled {
            if let Some(sub) = &self.substituter {
                match sub.substitute(markdown, RenderMode::Interactive) {
                    Ok(text) => return text,
                    Err(e) => {
                        tracing::warn!(error = %e, "Interactive diagram substitution failed, retrying with static fallback");
                    }
                }
            }
        }
        MermaidSubstituter::substitute_static(markdown)
    }

    /// Release the substituter's scratch directory.
    ///
    /// Idempotent; failures are logged, never returned.
    pub fn cleanup(&mut self) {
        if let Some(sub) = self.substituter.as_mut() {
            sub.cleanup();
        }
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the `[TOC]` placeholder with a rendered table of contents.
fn replace_toc_placeholder(html: &str, toc: &[TocEntry]) -> String {
    if !html.contains(TOC_PLACEHOLDER) {
        return html.to_owned();
    }
    html.replace(TOC_PLACEHOLDER, &render_toc(toc))
}

/// Render collected headings as a nested list inside `<div class="toc">`.
fn render_toc(entries: &[TocEntry]) -> String {
    let mut html = String::from("<div class=\"toc\">\n<ul>\n");
    let base = entries.first().map_or(1, |e| e.level);
    let mut level = base;
    for entry in entries {
        while level < entry.level {
            html.push_str("<ul>\n");
            level += 1;
        }
        while level > entry.level && level > base {
            html.push_str("</ul>\n");
            level -= 1;
        }
        let _ = writeln!(
            html,
            "<li><a href=\"#{}\">{}</a></li>",
            entry.id,
            escape_html(&entry.title)
        );
    }
    while level > base {
        html.push_str("</ul>\n");
        level -= 1;
    }
    html.push_str("</ul>\n</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAGRAM_DOC: &str = "# Title\n\n```mermaid\ngraph TD; A-->B;\n```\n";

    #[test]
    fn test_convert_with_diagrams_enabled() {
        let renderer = DocumentRenderer::new();
        let html = renderer.convert(DIAGRAM_DOC, "Doc", true);

        assert!(html.contains("<title>Doc</title>"));
        assert!(html.contains("<h1 id=\"title\">Title"));
        assert_eq!(html.matches("<div class=\"mermaid-alternatives\">").count(), 1);
        assert!(html.contains("<div class=\"mermaid\">\ngraph TD; A-->B;\n</div>"));
        assert!(html.contains("<textarea readonly style=\"width: 100%; height: 100px;\">graph TD; A--&gt;B;</textarea>"));
    }

    #[test]
    fn test_convert_with_diagrams_disabled() {
        let renderer = DocumentRenderer::new();
        let html = renderer.convert(DIAGRAM_DOC, "Doc", false);

        assert!(html.contains("<h1 id=\"title\">Title"));
        assert!(!html.contains("<div class=\"mermaid\">"));
        assert!(html.contains("language-mermaid"));
        assert_eq!(html.matches("<div class=\"mermaid-alternatives\">").count(), 1);
    }

    #[test]
    fn test_convert_without_diagrams_is_mode_independent() {
        let renderer = DocumentRenderer::new();
        let markdown = "# Plain\n\nNo diagrams here.\n";
        let interactive = renderer.convert(markdown, "Doc", true);
        let fallback = renderer.convert(markdown, "Doc", false);
        assert_eq!(interactive, fallback);
    }

    #[test]
    fn test_convert_falls_back_after_cleanup() {
        let mut renderer = DocumentRenderer::new();
        renderer.cleanup();
        let html = renderer.convert(DIAGRAM_DOC, "Doc", true);
        // Interactive path fails once the scratch is gone; output must be
        // the static fallback, not an error.
        assert!(!html.contains("<div class=\"mermaid\">"));
        assert!(html.contains("<div class=\"mermaid-alternatives\">"));
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let mut renderer = DocumentRenderer::new();
        renderer.cleanup();
        renderer.cleanup();
    }

    #[test]
    fn test_toc_marker_rendered() {
        let renderer = DocumentRenderer::new();
        let html = renderer.convert("[TOC]\n\n# One\n\n## Two\n", "Doc", false);
        assert!(html.contains("<div class=\"toc\">"));
        assert!(html.contains("<li><a href=\"#one\">One</a></li>"));
        assert!(html.contains("<li><a href=\"#two\">Two</a></li>"));
        assert!(!html.contains(TOC_PLACEHOLDER));
    }

    #[test]
    fn test_toc_state_does_not_leak_between_calls() {
        let renderer = DocumentRenderer::new();
        let first = renderer.convert("[TOC]\n\n# Alpha\n", "Doc", false);
        let second = renderer.convert("[TOC]\n\n# Beta\n", "Doc", false);
        assert!(first.contains("#alpha"));
        assert!(!second.contains("#alpha"));
        assert!(second.contains("#beta"));
    }

    #[test]
    fn test_title_is_escaped_in_output() {
        let renderer = DocumentRenderer::new();
        let html = renderer.convert("text", "<b>Doc</b>", false);
        assert!(html.contains("<title>&lt;b&gt;Doc&lt;/b&gt;</title>"));
    }

    #[test]
    fn test_render_toc_nesting() {
        let toc = vec![
            TocEntry { level: 1, title: "A".into(), id: "a".into() },
            TocEntry { level: 2, title: "B".into(), id: "b".into() },
            TocEntry { level: 1, title: "C".into(), id: "c".into() },
        ];
        let html = render_toc(&toc);
        assert_eq!(html.matches("<ul>").count(), 2);
        assert_eq!(html.matches("</ul>").count(), 2);
        assert!(html.find("#b").unwrap() < html.find("#c").unwrap());
    }
}
