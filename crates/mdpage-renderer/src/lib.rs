//! Markdown to self-contained HTML document rendering for mdpage.
//!
//! This crate turns markdown text into a complete HTML5 document string:
//! mermaid code blocks are substituted first (interactive or static fallback,
//! see `mdpage-diagrams`), the result runs through an event-based
//! `pulldown-cmark` renderer, and the fragment is wrapped in a fixed page
//! template with embedded CSS and the Mermaid.js CDN script.
//!
//! # Architecture
//!
//! - [`DocumentRenderer`]: Main entry point; `convert` is the whole pipeline
//! - [`HtmlRenderer`]: Event-based HTML5 renderer with heading anchors and
//!   table of contents collection
//! - `template`: Page chrome (doctype, head, style, Mermaid.js script)
//!
//! Each `convert` call constructs a fresh parser and renderer, so one call's
//! table of contents can never leak into another's. A `DocumentRenderer` may
//! be reused across any number of documents.
//!
//! # Example
//!
//! ```
//! use mdpage_renderer::DocumentRenderer;
//!
//! let mut renderer = DocumentRenderer::new();
//! let html = renderer.convert("# Hello", "My Page", true);
//! assert!(html.contains("<title>My Page</title>"));
//! renderer.cleanup();
//! ```

mod html;
mod renderer;
mod template;

pub use html::{HtmlRenderResult, HtmlRenderer, TocEntry, escape_html};
pub use renderer::DocumentRenderer;
