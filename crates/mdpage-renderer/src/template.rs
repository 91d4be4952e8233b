//! Page template for converted documents.
//!
//! Wraps a rendered HTML fragment in a complete, self-contained document:
//! embedded stylesheet, Mermaid.js loaded from a CDN, and an initialization
//! script so diagram containers render on page load.

use std::fmt::Write;

use crate::html::escape_html;

/// Mermaid.js CDN location. Pinned so rendered pages stay reproducible.
const MERMAID_JS_URL: &str = "https://cdn.jsdelivr.net/npm/mermaid@10.6.1/dist/mermaid.min.js";

/// Embedded stylesheet: typography, code, tables, blockquotes, the table of
/// contents box, and the diagram container classes emitted by substitution.
const STYLE: &str = r"
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    line-height: 1.6;
    max-width: 1200px;
    margin: 0 auto;
    padding: 20px;
    color: #333;
}
h1, h2, h3, h4, h5, h6 {
    color: #2c3e50;
    margin-top: 2em;
    margin-bottom: 1em;
}
h1 {
    border-bottom: 3px solid #3498db;
    padding-bottom: 10px;
}
h2 {
    border-bottom: 2px solid #ecf0f1;
    padding-bottom: 5px;
}
a.headerlink {
    color: #ccc;
    text-decoration: none;
    margin-left: 4px;
    visibility: hidden;
}
h1:hover a.headerlink, h2:hover a.headerlink, h3:hover a.headerlink,
h4:hover a.headerlink, h5:hover a.headerlink, h6:hover a.headerlink {
    visibility: visible;
}
code {
    background-color: #f8f9fa;
    padding: 2px 4px;
    border-radius: 3px;
    font-family: 'Courier New', monospace;
}
pre {
    background-color: #f8f9fa;
    padding: 15px;
    border-radius: 5px;
    overflow-x: auto;
    border-left: 4px solid #3498db;
}
table {
    border-collapse: collapse;
    width: 100%;
    margin: 20px 0;
}
th, td {
    border: 1px solid #ddd;
    padding: 12px;
    text-align: left;
}
th {
    background-color: #f2f2f2;
    font-weight: bold;
}
img {
    max-width: 100%;
    height: auto;
    display: block;
    margin: 20px auto;
    box-shadow: 0 4px 8px rgba(0,0,0,0.1);
}
blockquote {
    border-left: 4px solid #3498db;
    margin: 20px 0;
    padding: 10px 20px;
    background-color: #f8f9fa;
}
.toc {
    background-color: #f8f9fa;
    padding: 20px;
    border-radius: 5px;
    margin: 20px 0;
}

/* Mermaid diagram styles */
.mermaid-diagram {
    border: 2px solid #e1e5e9;
    border-radius: 8px;
    padding: 20px;
    margin: 20px 0;
    background-color: #f8f9fa;
}
.mermaid-diagram h4 {
    margin-top: 0;
    color: #0366d6;
    border-bottom: 1px solid #e1e5e9;
    padding-bottom: 10px;
}
.mermaid-container {
    background-color: white;
    border: 1px solid #e1e5e9;
    border-radius: 6px;
    padding: 15px;
    margin: 15px 0;
    overflow-x: auto;
}
.mermaid {
    text-align: center;
}
.mermaid-code {
    background-color: #f6f8fa;
    border: 1px solid #e1e5e9;
    border-radius: 6px;
    padding: 15px;
    margin: 15px 0;
}
.mermaid-code pre {
    margin: 0;
    overflow-x: auto;
}
.mermaid-alternatives {
    margin-top: 15px;
}
.mermaid-alternatives ol {
    margin: 10px 0;
}
.mermaid-alternatives li {
    margin: 5px 0;
}
.mermaid-alternatives a {
    color: #0366d6;
    text-decoration: none;
}
.mermaid-alternatives a:hover {
    text-decoration: underline;
}
details {
    margin-top: 15px;
}
summary {
    cursor: pointer;
    font-weight: bold;
    color: #0366d6;
}
textarea {
    font-family: 'Courier New', monospace;
    font-size: 12px;
    border: 1px solid #e1e5e9;
    border-radius: 4px;
    padding: 10px;
    resize: vertical;
}
";

/// Mermaid.js initialization: render on load with the page's theme colors.
const MERMAID_INIT: &str = r"
mermaid.initialize({
    startOnLoad: true,
    theme: 'default',
    themeVariables: {
        primaryColor: '#3498db',
        primaryTextColor: '#2c3e50',
        primaryBorderColor: '#2980b9',
        lineColor: '#34495e',
        secondaryColor: '#ecf0f1',
        tertiaryColor: '#ffffff'
    }
});
";

/// Render a complete HTML5 document around a body fragment.
///
/// The title is escaped before insertion into `<title>`.
#[must_use]
pub(crate) fn render_document(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + STYLE.len() + 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    let _ = write!(html, "<style>{STYLE}</style>\n");
    let _ = writeln!(html, "<script src=\"{MERMAID_JS_URL}\"></script>");
    let _ = write!(html, "<script>{MERMAID_INIT}</script>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}
