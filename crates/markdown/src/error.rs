//! Error types for the rendering pipeline.

use thiserror::Error;

/// Result type for fallible pipeline steps.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while converting or parsing content.
///
/// The public render, TOC and reading-time operations never surface these;
/// they recover locally and log a diagnostic instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Block or inline containers nested deeper than the configured limit.
    #[error("nesting depth {depth} exceeds the limit of {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    /// The event stream closed a container that was never opened.
    #[error("unbalanced markdown structure: {0}")]
    Unbalanced(String),

    /// The converter panicked on this input.
    #[error("markdown conversion panicked: {0}")]
    Panicked(String),

    /// Front matter was present but not valid YAML for a document header.
    #[error("invalid front matter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),
}
