//! Markdown rendering for the folio blog.
//!
//! Three independent operations over a content string:
//!
//! - [`render_markdown`]: HTML with unique heading anchors. Content that
//!   contains layout container markers is rendered in hybrid mode, where
//!   the layout HTML passes through untouched.
//! - [`extract_toc`]: headings of the raw Markdown for a table of contents.
//! - [`calculate_reading_time`]: estimated minutes to read.
//!
//! ```
//! let html = folio_markdown::render_markdown("# Title\n\nSome *text*.");
//! assert!(html.contains(r#"<h1 id="title">Title</h1>"#));
//! ```

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod escape;
mod headings;
pub mod hybrid;
pub mod reading;
pub mod renderer;
pub mod slug;
pub mod toc;

pub use config::RenderOptions;
pub use document::{Document, Frontmatter, RenderedDocument};
pub use error::{Error, Result};
pub use escape::escape_html;
pub use reading::{count_words, reading_time, DEFAULT_WORDS_PER_MINUTE};
pub use renderer::Renderer;
pub use slug::{base_slug, Slugger};
pub use toc::{Toc, TocEntry};

/// Render with default options. See [`Renderer::render`].
pub fn render_markdown(source: &str) -> String {
    Renderer::default().render(source)
}

/// Table of contents of `source`. See [`Toc`].
pub fn extract_toc(source: &str) -> Toc<'_> {
    Toc::new(source)
}

/// Reading time in minutes at 200 words per minute.
pub fn calculate_reading_time(source: &str) -> usize {
    reading_time(source, DEFAULT_WORDS_PER_MINUTE)
}
