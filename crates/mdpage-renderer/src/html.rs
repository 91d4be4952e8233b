//! Event-based HTML renderer for pulldown-cmark.
//!
//! Produces an HTML5 fragment with slugified heading ids, permalink anchors,
//! and a collected table of contents. Raw HTML blocks (such as substituted
//! mermaid fragments) pass through untouched.

use std::collections::HashMap;
use std::fmt::Write;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Tag, TagEnd};

/// Placeholder emitted for a `[TOC]` paragraph; replaced with the rendered
/// table of contents after the event pass.
pub(crate) const TOC_PLACEHOLDER: &str = "<!-- mdpage:toc -->";

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading plain text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Result of rendering markdown to an HTML fragment.
#[derive(Clone, Debug)]
pub struct HtmlRenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Table of contents entries, in document order.
    pub toc: Vec<TocEntry>,
}

/// State for the heading currently being rendered.
#[derive(Default)]
struct HeadingState {
    /// Level of the open heading, `None` outside headings.
    level: Option<u8>,
    /// Explicit id from an attribute list, e.g. `## Title {#custom}`.
    custom_id: Option<String>,
    /// Plain text buffer for the slug and table of contents.
    text: String,
    /// HTML buffer with inline formatting.
    html: String,
    /// Counters for de-duplicating generated ids.
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    fn is_active(&self) -> bool {
        self.level.is_some()
    }

    fn start(&mut self, level: u8, custom_id: Option<String>) {
        self.level = Some(level);
        self.custom_id = custom_id;
        self.text.clear();
        self.html.clear();
    }

    /// Close the heading, returning (level, id, plain text, inner HTML).
    fn complete(&mut self) -> Option<(u8, String, String, String)> {
        let level = self.level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);
        let base = self
            .custom_id
            .take()
            .unwrap_or_else(|| slugify(&text));
        let count = self.id_counts.entry(base.clone()).or_insert(0);
        *count += 1;
        let id = if *count == 1 {
            base
        } else {
            format!("{base}-{}", *count - 1)
        };
        Some((level, id, text, html))
    }
}

/// State for table rendering.
#[derive(Default)]
struct TableState {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    fn alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => " style=\"text-align:left\"",
            Some(Alignment::Center) => " style=\"text-align:center\"",
            Some(Alignment::Right) => " style=\"text-align:right\"",
            Some(Alignment::None) | None => "",
        }
    }
}

/// Renders pulldown-cmark events to an HTML5 fragment.
///
/// One renderer handles one event stream; construct a fresh instance per
/// document so heading id counters and the table of contents never carry
/// over between conversions.
pub struct HtmlRenderer {
    output: String,
    heading: HeadingState,
    table: TableState,
    toc: Vec<TocEntry>,
    /// Inside a code block: language and buffered content.
    code: Option<(Option<String>, String)>,
    /// Inside an image: buffered alt text.
    image_alt: Option<String>,
    /// Output offset right after the current `<p>`, for `[TOC]` detection.
    para_start: Option<usize>,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            heading: HeadingState::default(),
            table: TableState::default(),
            toc: Vec::new(),
            code: None,
            image_alt: None,
            para_start: None,
        }
    }

    /// Render markdown events into an HTML fragment plus table of contents.
    pub fn render<'a, I>(mut self, events: I) -> HtmlRenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        HtmlRenderResult {
            html: self.output,
            toc: self.toc,
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Footnotes and math are not part of the page contract.
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.output.push_str("<p>");
                self.para_start = Some(self.output.len());
            }
            Tag::Heading { level, id, .. } => {
                self.heading
                    .start(heading_level_to_num(level), id.map(|s| s.to_string()));
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => lang
                        .split_whitespace()
                        .next()
                        .map(std::string::ToString::to_string),
                    _ => None,
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => match start {
                None => self.output.push_str("<ul>"),
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    let _ = write!(self.output, "<ol start=\"{n}\">");
                }
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(alignments) => {
                self.table = TableState {
                    in_head: false,
                    alignments,
                    cell_index: 0,
                };
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.cell_index = 0;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.cell_index = 0;
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let style = self.table.alignment_style();
                let cell = if self.table.in_head { "th" } else { "td" };
                let _ = write!(self.output, "<{cell}{style}>");
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link { dest_url, .. } => {
                let open = format!("<a href=\"{}\">", escape_html(&dest_url));
                self.push_inline(&open);
            }
            Tag::Image { dest_url, title, .. } => {
                self.image_alt = Some(String::new());
                let _ = write!(self.output, "<img src=\"{}\"", escape_html(&dest_url));
                if !title.is_empty() {
                    let _ = write!(self.output, " title=\"{}\"", escape_html(&title));
                }
            }
            Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if let Some(start) = self.para_start.take() {
                    if &self.output[start..] == "[TOC]" {
                        self.output.truncate(start - "<p>".len());
                        self.output.push_str(TOC_PLACEHOLDER);
                        return;
                    }
                }
                self.output.push_str("</p>");
            }
            TagEnd::Heading(level) => {
                if let Some((level, id, text, html)) = self.heading.complete() {
                    self.toc.push(TocEntry {
                        level,
                        title: text.trim().to_string(),
                        id: id.clone(),
                    });
                    let _ = write!(
                        self.output,
                        "<h{level} id=\"{id}\">{}\
                         <a class=\"headerlink\" href=\"#{id}\" title=\"Permalink\">&para;</a>\
                         </h{level}>",
                        html.trim()
                    );
                } else {
                    let _ = write!(self.output, "</h{}>", heading_level_to_num(level));
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                if let Some((lang, buffer)) = self.code.take() {
                    if let Some(lang) = lang {
                        let _ = write!(
                            self.output,
                            "<pre><code class=\"language-{}\">{}</code></pre>",
                            escape_html(&lang),
                            escape_html(&buffer)
                        );
                    } else {
                        let _ = write!(
                            self.output,
                            "<pre><code>{}</code></pre>",
                            escape_html(&buffer)
                        );
                    }
                }
            }
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.table.in_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                let cell = if self.table.in_head { "</th>" } else { "</td>" };
                self.output.push_str(cell);
                self.table.cell_index += 1;
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                if let Some(alt) = self.image_alt.take() {
                    let _ = write!(self.output, " alt=\"{}\">", escape_html(&alt));
                }
            }
            TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition => {}
        }
    }

    /// Route inline markup into the heading buffer when a heading is open.
    fn push_inline(&mut self, s: &str) {
        if self.heading.is_active() {
            self.heading.html.push_str(s);
        } else {
            self.output.push_str(s);
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, buffer)) = self.code.as_mut() {
            buffer.push_str(text);
        } else if let Some(alt) = self.image_alt.as_mut() {
            alt.push_str(text);
        } else if self.heading.is_active() {
            self.heading.text.push_str(text);
            self.heading.html.push_str(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.heading.is_active() {
            self.heading.text.push_str(code);
            let _ = write!(self.heading.html, "<code>{}</code>", escape_html(code));
        } else {
            let _ = write!(self.output, "<code>{}</code>", escape_html(code));
        }
    }

    fn soft_break(&mut self) {
        if let Some((_, buffer)) = self.code.as_mut() {
            buffer.push('\n');
        } else if self.heading.is_active() {
            self.heading.text.push(' ');
            self.heading.html.push('\n');
        } else {
            self.output.push('\n');
        }
    }

    fn task_list_marker(&mut self, checked: bool) {
        if checked {
            self.output
                .push_str("<input type=\"checkbox\" checked disabled> ");
        } else {
            self.output.push_str("<input type=\"checkbox\" disabled> ");
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert heading level enum to number.
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Convert heading text to a URL-safe slug.
fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // prevents a leading dash
    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }
    if result.ends_with('-') {
        result.pop();
    }
    result
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
