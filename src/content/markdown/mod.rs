//! Markdown rendering pipeline
//!
//! A post body goes through a fixed sequence of stages. Each stage is a
//! plain function over the pulldown-cmark event stream (the document tree
//! in pre-order) and can be run on its own:
//!
//! 1. [`parse`]: CommonMark grammar
//! 2. GFM: tables, strikethrough, task lists, footnotes and alerts as
//!    parser options, then [`autolink::link_bare_urls`] for autolink literals
//! 3. [`raw_html::passthrough`]: keep raw HTML as markup or demote it
//! 4. [`raw_html::reintegrate`]: merge and re-parse raw HTML blocks
//! 5. [`Highlighter::highlight`]: token classes for fenced code
//! 6. [`serialize`]: event stream to HTML string
//!
//! The parser is permissive, so there is no error path: unknown syntax
//! comes out as text.

pub mod autolink;
mod highlight;
pub mod raw_html;

pub use highlight::Highlighter;

use pulldown_cmark::{html, Event, Options, Parser};

use crate::config::{HighlightConfig, MarkdownConfig};

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    gfm: bool,
    allow_dangerous_html: bool,
    highlighter: Option<Highlighter>,
}

impl MarkdownRenderer {
    /// Create a renderer with the default settings: GFM on, raw HTML
    /// allowed, highlighting without line numbers
    pub fn new() -> Self {
        Self::with_config(&MarkdownConfig::default(), &HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_config(markdown: &MarkdownConfig, highlight: &HighlightConfig) -> Self {
        let highlighter = if highlight.enable {
            Some(Highlighter::new(highlight.line_number))
        } else {
            None
        };

        Self {
            gfm: markdown.gfm,
            allow_dangerous_html: markdown.allow_dangerous_html,
            highlighter,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let mut events = parse(markdown, self.gfm);
        if self.gfm {
            events = autolink::link_bare_urls(events);
        }
        events = raw_html::passthrough(events, self.allow_dangerous_html);
        events = raw_html::reintegrate(events);
        if let Some(highlighter) = &self.highlighter {
            events = highlighter.highlight(events);
        }
        serialize(events)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parser options; front-matter is split off before parsing, so YAML
/// metadata blocks stay disabled
pub fn parse_options(gfm: bool) -> Options {
    if gfm {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_GFM
    } else {
        Options::empty()
    }
}

/// Parse markdown into its event stream
pub fn parse(markdown: &str, gfm: bool) -> Vec<Event<'_>> {
    Parser::new_ext(markdown, parse_options(gfm)).collect()
}

/// Serialize an event stream to HTML
pub fn serialize(events: Vec<Event<'_>>) -> String {
    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}
