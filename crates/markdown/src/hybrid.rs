//! Hybrid rendering for content that mixes layout HTML with Markdown.
//!
//! The editor wraps Markdown in layout containers (`<div class="layout-row">`
//! and friends). Those tags must reach the page untouched, so the source is
//! split on tag boundaries and only the text between tags is converted.

use regex::Regex;
use std::sync::OnceLock;

/// A slice of hybrid source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// An element tag or comment, emitted verbatim
    Tag(&'a str),
    /// Text between tags, converted as Markdown
    Text(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Tag(s) | Segment::Text(s) => s,
        }
    }
}

/// Split `source` into alternating tag and text segments in one scan.
///
/// Concatenating the segments yields `source` again. Empty text between
/// adjacent tags is omitted.
pub fn split_segments(source: &str) -> Vec<Segment<'_>> {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let tag_re = TAG_RE.get_or_init(|| {
        Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>").unwrap()
    });

    let mut segments = Vec::new();
    let mut last = 0;

    for tag in tag_re.find_iter(source) {
        if tag.start() > last {
            segments.push(Segment::Text(&source[last..tag.start()]));
        }
        segments.push(Segment::Tag(tag.as_str()));
        last = tag.end();
    }

    if last < source.len() {
        segments.push(Segment::Text(&source[last..]));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_alternates_tags_and_text() {
        let source = "<div class=\"layout-row\">**bold**</div>";
        assert_eq!(
            split_segments(source),
            vec![
                Segment::Tag("<div class=\"layout-row\">"),
                Segment::Text("**bold**"),
                Segment::Tag("</div>"),
            ]
        );
    }

    #[test]
    fn test_split_is_lossless() {
        let source = "intro\n<div class=\"layout-column\">\n# Title\n<br/>text <!-- note --> end</div>tail";
        let joined: String = split_segments(source).iter().map(|s| s.as_str()).collect();
        assert_eq!(joined, source);
    }

    #[test]
    fn test_comparison_operators_are_text() {
        let segments = split_segments("a < b and c > d");
        assert_eq!(segments, vec![Segment::Text("a < b and c > d")]);
    }

    #[test]
    fn test_comment_is_single_tag() {
        let segments = split_segments("<!-- <div> -->");
        assert_eq!(segments, vec![Segment::Tag("<!-- <div> -->")]);
    }

    #[test]
    fn test_self_closing_tag() {
        let segments = split_segments("x<br/>y");
        assert_eq!(
            segments,
            vec![Segment::Text("x"), Segment::Tag("<br/>"), Segment::Text("y")]
        );
    }

    #[test]
    fn test_empty_source() {
        assert!(split_segments("").is_empty());
    }
}
