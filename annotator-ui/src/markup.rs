//! Markdown rendering for summary panels and conflict reports.
//!
//! Uses pulldown-cmark for parsing CommonMark-compliant markdown. Raw HTML
//! embedded in the source is escaped rather than passed through, since the
//! output is injected with `dangerous_inner_html`.

use pulldown_cmark::{html, Event, Options, Parser};
use serde::Deserialize;

/// Pure conversion from markup source to an HTML fragment.
///
/// Implementations must accept arbitrary input and never fail.
pub trait MarkupRenderer {
    fn render(&self, source: &str) -> String;
}

/// Configuration for markdown rendering
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable GitHub-flavored markdown (tables, strikethrough, task lists)
    pub gfm: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { gfm: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownRenderer {
    config: MarkdownConfig,
}

impl MarkdownRenderer {
    pub fn new(config: MarkdownConfig) -> Self {
        Self { config }
    }
}

impl MarkupRenderer for MarkdownRenderer {
    fn render(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, build_options(&self.config)).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });

        let mut html_output = String::with_capacity(source.len() * 2);
        html::push_html(&mut html_output, parser);
        html_output
    }
}

fn build_options(config: &MarkdownConfig) -> Options {
    let mut options = Options::empty();
    if config.gfm {
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_bold() {
        let html = MarkdownRenderer::default().render("**bold**");
        assert_eq!(html, "<p><strong>bold</strong></p>\n");
    }

    #[test]
    fn renders_gfm_tables() {
        let html = MarkdownRenderer::default().render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));

        let plain = MarkdownRenderer::new(MarkdownConfig { gfm: false })
        .render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(!plain.contains("<table>"));
    }

    #[test]
    fn escapes_raw_html() {
        let html = MarkdownRenderer::default().render("<script>alert(1)</script>\n\nhi <b>x</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn plain_commonmark_still_escapes_html() {
        let html = MarkdownRenderer::new(MarkdownConfig { gfm: false }).render("<i>x</i>");
        assert!(!html.contains("<i>"));
        assert!(html.contains("&lt;i&gt;"));
    }

    #[test]
    fn empty_input_renders_empty_fragment() {
        assert_eq!(MarkdownRenderer::default().render(""), "");
    }
}
