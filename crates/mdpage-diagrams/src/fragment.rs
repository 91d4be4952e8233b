//! HTML fragment builders for substituted Mermaid blocks.
//!
//! Fragments are emitted as contiguous lines (no internal blank lines) so the
//! downstream markdown parser passes them through as a single raw HTML block.

use std::fmt::Write;

/// Build the interactive fragment for one diagram block.
///
/// The raw diagram source goes un-escaped into a `<div class="mermaid">`
/// container for Mermaid.js to render in the browser. The help block keeps
/// the diagram inspectable where client-side rendering is unavailable.
#[must_use]
pub fn interactive(source: &str) -> String {
    let mut html = String::with_capacity(source.len() + 1024);
    html.push_str("\n<div class=\"mermaid-diagram\">\n");
    html.push_str("<h4>\u{1f4ca} Mermaid Diagram</h4>\n");
    html.push_str("<div class=\"mermaid-container\">\n");
    html.push_str("<div class=\"mermaid\">\n");
    html.push_str(source);
    html.push_str("\n</div>\n");
    html.push_str("</div>\n");
    push_help_block(&mut html, source);
    html.push_str("</div>\n");
    html
}

/// Build the static fallback fragment for one diagram block.
///
/// The diagram source is quoted as an escaped code block; no live-rendering
/// container element is emitted.
#[must_use]
pub fn static_fallback(source: &str) -> String {
    let mut html = String::with_capacity(source.len() + 1024);
    html.push_str("\n<div class=\"mermaid-diagram\">\n");
    html.push_str("<h4>\u{1f4ca} Mermaid Diagram</h4>\n");
    html.push_str("<div class=\"mermaid-code\">\n");
    let _ = write!(
        html,
        "<pre><code class=\"language-mermaid\">{}</code></pre>\n",
        escape_html(source)
    );
    html.push_str("</div>\n");
    push_help_block(&mut html, source);
    html.push_str("</div>\n");
    html
}

/// Append the help block common to both output modes.
///
/// Lists the four fixed alternatives for viewing a Mermaid diagram and a
/// collapsible readonly textarea with the raw source for copy-paste. The
/// textarea content is escaped; un-escaping recovers the source exactly.
fn push_help_block(html: &mut String, source: &str) {
    html.push_str("<div class=\"mermaid-alternatives\">\n");
    html.push_str("<p><strong>\u{1f4a1} Ways to view this diagram:</strong></p>\n");
    html.push_str("<ol>\n");
    html.push_str(
        "<li><strong>Mermaid Live Editor:</strong> \
         <a href=\"https://mermaid.live\" target=\"_blank\">https://mermaid.live</a></li>\n",
    );
    html.push_str("<li><strong>VS Code:</strong> install the Mermaid Preview extension</li>\n");
    html.push_str("<li><strong>GitHub:</strong> renders Mermaid diagrams automatically</li>\n");
    html.push_str(
        "<li><strong>Mermaid CLI:</strong> install mermaid-cli and convert to an image</li>\n",
    );
    html.push_str("</ol>\n");
    html.push_str("<details>\n");
    html.push_str("<summary>\u{1f4cb} Copy Mermaid source</summary>\n");
    let _ = write!(
        html,
        "<textarea readonly style=\"width: 100%; height: 100px;\">{}</textarea>\n",
        escape_html(source)
    );
    html.push_str("</details>\n");
    html.push_str("</div>\n");
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_embeds_raw_source() {
        let html = interactive("graph TD; A-->B;");
        assert!(html.contains("<div class=\"mermaid\">\ngraph TD; A-->B;\n</div>"));
    }

    #[test]
    fn test_interactive_contains_help_block() {
        let html = interactive("graph TD");
        assert!(html.contains("https://mermaid.live"));
        assert!(html.contains("Mermaid Preview extension"));
        assert!(html.contains("renders Mermaid diagrams automatically"));
        assert!(html.contains("mermaid-cli"));
        assert!(html.contains("<details>"));
    }

    #[test]
    fn test_static_fallback_has_no_live_container() {
        let html = static_fallback("graph TD");
        assert!(!html.contains("<div class=\"mermaid\">"));
        assert!(html.contains("<code class=\"language-mermaid\">graph TD</code>"));
    }

    #[test]
    fn test_textarea_round_trips_special_characters() {
        let source = "graph TD; A-->B;\nA[\"x < y & z\"]";
        let html = static_fallback(source);
        let escaped = "graph TD; A--&gt;B;\nA[&quot;x &lt; y &amp; z&quot;]";
        assert!(html.contains(&format!("<textarea readonly style=\"width: 100%; height: 100px;\">{escaped}</textarea>")));
    }

    #[test]
    fn test_fragments_have_no_blank_lines() {
        // A blank line would terminate the raw HTML block during markdown parsing.
        for html in [interactive("graph TD\n  A --> B"), static_fallback("graph TD")] {
            assert!(!html.trim().contains("\n\n"), "fragment contains a blank line:\n{html}");
        }
    }

    #[test]
    fn test_multi_line_body_preserved() {
        let source = "sequenceDiagram\n  participant A\n\n  A->>B: hi";
        let html = interactive(source);
        assert!(html.contains(source));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("plain"), "plain");
    }
}
