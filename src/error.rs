//! Errors raised by the content core

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the content store and slug resolver.
///
/// Irregular content (bad frontmatter, unknown markdown syntax, missing
/// dates) never shows up here; it is absorbed into absent values.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Duplicate slug '{slug}': {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// Whether this is the "no such post" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }
}
