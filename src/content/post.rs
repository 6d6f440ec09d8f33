//! Post models

use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// Listing view of a post: metadata only, the body is never rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetadata {
    /// Slug (file name without extension)
    pub slug: String,

    /// Post title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Publication date, sortable as a string (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Short summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Labels in the order they were written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<String>>,
}

impl PostMetadata {
    /// Build metadata for `slug` from its parsed front-matter
    pub fn new(slug: impl Into<String>, fm: FrontMatter) -> Self {
        Self {
            slug: slug.into(),
            title: fm.title,
            date: fm.date,
            excerpt: fm.excerpt,
            tag: fm.tag,
        }
    }

    /// The date used for ordering; an empty string counts as no date
    pub fn sort_date(&self) -> Option<&str> {
        self.date.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// Tags, empty when none were given
    pub fn tags(&self) -> &[String] {
        self.tag.as_deref().unwrap_or(&[])
    }
}

/// Detail view of a post: metadata plus the rendered body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub meta: PostMetadata,

    /// Rendered HTML content
    pub content: String,
}

impl PostDetail {
    pub fn new(meta: PostMetadata, content: String) -> Self {
        Self { meta, content }
    }

    pub fn slug(&self) -> &str {
        &self.meta.slug
    }
}
