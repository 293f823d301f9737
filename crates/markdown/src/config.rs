use serde::{Deserialize, Serialize};

/// Renderer configuration.
///
/// Passed by value to [`crate::Renderer::new`]; there is no process-wide
/// renderer state, so callers with different settings can render side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// GitHub-flavored extensions: tables, strikethrough, task lists, footnotes
    #[serde(default = "default_true")]
    pub gfm: bool,
    /// Render soft line breaks as `<br />`
    #[serde(default)]
    pub breaks: bool,
    /// Inject `id` attributes into rendered headings
    #[serde(default = "default_true")]
    pub heading_ids: bool,
    /// Substrings that switch rendering to hybrid HTML/Markdown mode
    #[serde(default = "default_layout_markers")]
    pub layout_markers: Vec<String>,
    /// Maximum container nesting before conversion is abandoned
    #[serde(default = "default_max_nesting")]
    pub max_nesting: usize,
    /// Reading speed used by the reading-time estimate
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gfm: default_true(),
            breaks: false,
            heading_ids: default_true(),
            layout_markers: default_layout_markers(),
            max_nesting: default_max_nesting(),
            words_per_minute: default_words_per_minute(),
        }
    }
}

impl RenderOptions {
    /// Parse options from YAML. Missing keys fall back to their defaults.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub(crate) fn is_hybrid(&self, source: &str) -> bool {
        self.layout_markers
            .iter()
            .any(|marker| !marker.is_empty() && source.contains(marker.as_str()))
    }
}

fn default_true() -> bool {
    true
}

fn default_layout_markers() -> Vec<String> {
    ["layout-row", "layout-column", "layout-grid-2", "layout-callout"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_max_nesting() -> usize {
    64
}

fn default_words_per_minute() -> usize {
    200
}
