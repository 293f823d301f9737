use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::Lines;
use std::sync::OnceLock;

use crate::slug::base_slug;

/// One heading of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    pub id: String,
}

/// Lazy table-of-contents scan over raw Markdown.
///
/// Matches ATX headings (`#` to `######`, whitespace, text) line by line,
/// ignoring any HTML around them. Ids are base slugs without collision
/// counting, so two headings with the same text share an id here even
/// though the rendered HTML numbers them. Clone the iterator to restart it.
#[derive(Debug, Clone)]
pub struct Toc<'a> {
    lines: Lines<'a>,
}

impl<'a> Toc<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines(),
        }
    }
}

impl Iterator for Toc<'_> {
    type Item = TocEntry;

    fn next(&mut self) -> Option<TocEntry> {
        static HEADING_RE: OnceLock<Regex> = OnceLock::new();
        let heading_re =
            HEADING_RE.get_or_init(|| Regex::new(r"^(#{1,6})[ \t]+(.+)$").unwrap());

        for line in self.lines.by_ref() {
            let Some(caps) = heading_re.captures(line) else {
                continue;
            };

            let text = caps[2].trim_end();
            if text.is_empty() {
                continue;
            }

            return Some(TocEntry {
                level: caps[1].len() as u8,
                text: text.to_string(),
                id: base_slug(text),
            });
        }

        None
    }
}
