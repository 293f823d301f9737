use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::toc::TocEntry;

const DELIMITER: &str = "---";

/// Optional YAML header of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Source split into front matter and Markdown body.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    pub frontmatter: Frontmatter,
    pub body: &'a str,
}

impl<'a> Document<'a> {
    /// Split off a leading `---` fenced YAML block if there is one.
    ///
    /// Without a closing fence the whole content is treated as the body,
    /// since a lone `---` is also a Markdown thematic break.
    pub fn parse(content: &'a str) -> Result<Self> {
        match split_frontmatter(content) {
            Some((yaml, body)) => {
                let frontmatter = if yaml.trim().is_empty() {
                    Frontmatter::default()
                } else {
                    serde_yaml::from_str(yaml)?
                };
                Ok(Self { frontmatter, body })
            }
            None => Ok(Self {
                frontmatter: Frontmatter::default(),
                body: content,
            }),
        }
    }
}

fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix('\u{feff}').unwrap_or(content);
    let first_line_end = rest.find('\n')?;
    if rest[..first_line_end].trim_end() != DELIMITER {
        return None;
    }

    let yaml_start = first_line_end + 1;
    let mut offset = yaml_start;
    for line in rest[yaml_start..].split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Some((&rest[yaml_start..offset], body));
        }
        offset += line.len();
    }

    None
}

/// Everything a post page needs from its source.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub html: String,
    pub toc: Vec<TocEntry>,
    pub reading_time: usize,
}
