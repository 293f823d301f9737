use anyhow::{Context, Result};
use folio_markdown::RenderOptions;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "markdown.yaml";

/// Load renderer options.
///
/// An explicit path must exist. Without one, `markdown.yaml` in the working
/// directory is used when present, otherwise the defaults apply.
pub fn load_options(path: Option<&Path>) -> Result<RenderOptions> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            path
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if !default_path.exists() {
                log::debug!("no {} found, using default options", DEFAULT_CONFIG_FILE);
                return Ok(RenderOptions::default());
            }
            default_path
        }
    };

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    RenderOptions::from_yaml(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))
}
