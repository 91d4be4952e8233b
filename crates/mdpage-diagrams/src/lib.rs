//! Mermaid code block substitution for mdpage.
//!
//! This crate locates fenced `mermaid` code blocks in markdown text and
//! replaces each one with an HTML fragment. No diagram interpretation happens
//! here: the interactive fragment embeds the raw diagram source in a
//! `<div class="mermaid">` container that Mermaid.js renders client-side,
//! and the static fallback quotes the source as a code block instead. Both
//! variants carry a fixed help block listing alternative ways to view the
//! diagram, with a copyable textarea of the raw source.
//!
//! # Architecture
//!
//! - [`MermaidSubstituter`]: regex-driven block replacement with two output modes
//! - [`fragment`]: HTML fragment builders shared by both modes
//! - `scratch`: temp directory lifecycle for intermediate artifacts
//!
//! # Example
//!
//! ```
//! use mdpage_diagrams::{MermaidSubstituter, RenderMode};
//!
//! let markdown = "```mermaid\ngraph TD; A-->B;\n```";
//! let substituter = MermaidSubstituter::new().unwrap();
//! let html = substituter.substitute(markdown, RenderMode::Interactive).unwrap();
//! assert!(html.contains(r#"<div class="mermaid">"#));
//! ```

pub mod fragment;
mod scratch;
mod substituter;

pub use substituter::{DiagramError, MermaidSubstituter, RenderMode};
