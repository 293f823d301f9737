use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A Markdown source to render.
pub struct Source {
    /// Where the content came from; `None` for stdin
    pub path: Option<PathBuf>,
    /// Output location relative to the output directory
    pub relative: PathBuf,
    pub content: String,
}

impl Source {
    pub fn label(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<stdin>".to_string())
    }

    /// Relative output path with an `.html` extension.
    pub fn html_path(&self) -> PathBuf {
        self.relative.with_extension("html")
    }
}

/// Read a single file, or stdin when `path` is `-`.
pub fn read_source(path: &Path) -> Result<Source> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(Source {
            path: None,
            relative: PathBuf::from("stdin"),
            content,
        });
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let relative = path
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("Invalid file path: {}", path.display()))?;

    Ok(Source {
        path: Some(path.to_path_buf()),
        relative,
        content,
    })
}

/// Expand files and directories into sources. Directories are walked
/// recursively for `.md` files, in sorted order.
pub fn collect_sources(paths: &[PathBuf]) -> Result<Vec<Source>> {
    let mut sources = Vec::new();

    for path in paths {
        if !path.is_dir() {
            sources.push(read_source(path)?);
            continue;
        }

        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
        {
            let file = entry.path();
            let content = fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let relative = file.strip_prefix(path).unwrap_or(file).to_path_buf();

            sources.push(Source {
                path: Some(file.to_path_buf()),
                relative,
                content,
            });
        }
    }

    Ok(sources)
}
