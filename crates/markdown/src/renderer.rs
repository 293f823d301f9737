use crate::config::RenderOptions;
use crate::convert;
use crate::document::{Document, RenderedDocument};
use crate::error::Result;
use crate::headings::{inject_heading_ids, reserve_heading_ids};
use crate::hybrid::{split_segments, Segment};
use crate::reading::reading_time;
use crate::slug::Slugger;
use crate::toc::{Toc, TocEntry};

/// Markdown renderer bound to one set of options.
///
/// Holds no per-call state: every [`Renderer::render`] call gets a fresh
/// [`Slugger`], so a renderer can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render Markdown, optionally mixed with layout HTML, to HTML.
    ///
    /// Never fails: content that cannot be converted is returned as-is.
    pub fn render(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }

        let mut slugger = Slugger::new();

        if self.options.is_hybrid(source) {
            log::debug!("layout markers found, rendering in hybrid mode");
            self.render_hybrid(source, &mut slugger)
        } else {
            self.render_pure(source, &mut slugger)
        }
    }

    fn render_pure(&self, source: &str, slugger: &mut Slugger) -> String {
        match convert::to_html(source, &self.options) {
            Ok(html) => self.finish(&html, slugger),
            Err(e) => {
                log::warn!("Markdown conversion failed, returning source unchanged: {}", e);
                source.to_string()
            }
        }
    }

    fn render_hybrid(&self, source: &str, slugger: &mut Slugger) -> String {
        let mut html = String::with_capacity(source.len() * 2);

        // Ids on pass-through headings are never rewritten
        if self.options.heading_ids {
            reserve_heading_ids(source, slugger);
        }

        for segment in split_segments(source) {
            match segment {
                Segment::Tag(tag) => html.push_str(tag),
                Segment::Text(text) if text.trim().is_empty() => html.push_str(text),
                Segment::Text(text) => match convert::to_html(text, &self.options) {
                    Ok(converted) => html.push_str(&self.finish(&converted, slugger)),
                    Err(e) => {
                        log::warn!("Failed to convert layout segment, keeping it as-is: {}", e);
                        html.push_str(text);
                    }
                },
            }
        }

        html
    }

    fn finish(&self, html: &str, slugger: &mut Slugger) -> String {
        if self.options.heading_ids {
            inject_heading_ids(html, slugger)
        } else {
            html.to_string()
        }
    }

    /// Table of contents of the raw Markdown headings.
    pub fn toc<'a>(&self, source: &'a str) -> Toc<'a> {
        Toc::new(source)
    }

    /// Estimated reading time in minutes at the configured reading speed.
    pub fn reading_time(&self, source: &str) -> usize {
        reading_time(source, self.options.words_per_minute)
    }

    /// Render a whole document: front matter, HTML, TOC and reading time.
    pub fn render_document(&self, content: &str) -> Result<RenderedDocument> {
        let document = Document::parse(content)?;
        let toc: Vec<TocEntry> = self.toc(document.body).collect();

        let title = document.frontmatter.title.clone().or_else(|| {
            toc.iter()
                .find(|entry| entry.level == 1)
                .map(|entry| entry.text.clone())
        });

        Ok(RenderedDocument {
            title,
            description: document.frontmatter.description.clone(),
            tags: document.frontmatter.tags.clone(),
            html: self.render(document.body),
            reading_time: self.reading_time(document.body),
            toc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown() {
        let renderer = Renderer::default();
        let md = "# Hello\n\nThis is **bold**.";
        let html = renderer.render(md);

        assert!(html.contains("<h1 id=\"hello\">Hello</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(Renderer::default().render(""), "");
    }

    #[test]
    fn test_render_without_heading_ids() {
        let renderer = Renderer::new(RenderOptions {
            heading_ids: false,
            ..RenderOptions::default()
        });
        assert_eq!(renderer.render("## Plain"), "<h2>Plain</h2>\n");
    }

    #[test]
    fn test_render_falls_back_to_source() {
        let renderer = Renderer::new(RenderOptions {
            max_nesting: 2,
            ..RenderOptions::default()
        });
        let source = "> > > too deep";
        assert_eq!(renderer.render(source), source);
    }

    #[test]
    fn test_hybrid_failed_segment_kept_verbatim() {
        let renderer = Renderer::new(RenderOptions {
            max_nesting: 2,
            ..RenderOptions::default()
        });
        let source = "<div class=\"layout-row\">> > > deep</div><div>**ok**</div>";
        let html = renderer.render(source);

        assert!(html.contains("<div class=\"layout-row\">> > > deep</div>"));
        assert!(html.contains("<strong>ok</strong>"));
    }

    #[test]
    fn test_hybrid_whitespace_between_tags_untouched() {
        let source = "<div class=\"layout-row\">\n  <div class=\"layout-column\">\n</div>\n</div>";
        assert_eq!(Renderer::default().render(source), source);
    }

    #[test]
    fn test_hybrid_headings_share_slugger() {
        let source = "<div class=\"layout-column\">\n## Intro\n</div><div class=\"layout-column\">\n## Intro\n</div>";
        let html = Renderer::default().render(source);

        assert!(html.contains("<h2 id=\"intro\">Intro</h2>"));
        assert!(html.contains("<h2 id=\"intro-2\">Intro</h2>"));
    }

    #[test]
    fn test_existing_heading_id_is_not_repeated() {
        let html = Renderer::default().render("<h2 id=\"intro\">Raw</h2>\n\n## Intro\n");
        assert_eq!(html, "<h2 id=\"intro\">Raw</h2>\n<h2 id=\"intro-2\">Intro</h2>\n");
    }

    #[test]
    fn test_hybrid_pass_through_heading_id_is_not_repeated() {
        let source = "<div class=\"layout-row\">\n## Intro\n</div><h2 id=\"intro\">Kept</h2>";
        let html = Renderer::default().render(source);

        assert!(html.contains("<h2 id=\"intro-2\">Intro</h2>"));
        assert_eq!(html.matches("id=\"intro\"").count(), 1);
    }

    #[test]
    fn test_custom_layout_markers() {
        let renderer = Renderer::new(RenderOptions {
            layout_markers: vec!["grid".to_string()],
            ..RenderOptions::default()
        });
        let html = renderer.render("<section class=\"grid\">*hi*</section>");
        assert!(html.starts_with("<section class=\"grid\"><p><em>hi</em></p>"));
    }

    #[test]
    fn test_reading_time_uses_configured_speed() {
        let renderer = Renderer::new(RenderOptions {
            words_per_minute: 2,
            ..RenderOptions::default()
        });
        assert_eq!(renderer.reading_time("one two three"), 2);
    }

    #[test]
    fn test_render_document_title_fallback() {
        let doc = Renderer::default()
            .render_document("# From Heading\n\nBody text.")
            .unwrap();
        assert_eq!(doc.title.as_deref(), Some("From Heading"));
        assert_eq!(doc.reading_time, 1);
        assert_eq!(doc.toc.len(), 1);
        assert!(doc.html.contains("<h1 id=\"from-heading\">"));
    }

    #[test]
    fn test_render_document_with_frontmatter() {
        let content = "---\ntitle: Trip to Kyoto\ntags: [travel, japan]\n---\n# Day 1\n\nTemples.";
        let doc = Renderer::default().render_document(content).unwrap();
        assert_eq!(doc.title.as_deref(), Some("Trip to Kyoto"));
        assert_eq!(doc.tags, vec!["travel", "japan"]);
        assert!(!doc.html.contains("Trip to Kyoto"));
    }
}
