//! Content loader - listing and slug resolution on top of the store

use super::{sort_posts, ContentStore, FrontMatter, MarkdownRenderer, PostDetail, PostMetadata};
use crate::error::ContentError;
use crate::Site;

/// Answers the two access patterns of the site: "list many posts"
/// (metadata only) and "get one post" (metadata plus rendered body).
///
/// Every call goes back to the store; nothing is remembered between calls.
pub struct ContentLoader {
    store: ContentStore,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a new content loader for a site
    pub fn new(site: &Site) -> Self {
        let store = ContentStore::new(&site.content_dir, &site.config.extensions);
        let renderer =
            MarkdownRenderer::with_config(&site.config.markdown, &site.config.highlight);
        Self::from_parts(store, renderer)
    }

    /// Create a loader from an explicit store and renderer
    pub fn from_parts(store: ContentStore, renderer: MarkdownRenderer) -> Self {
        Self { store, renderer }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Every slug that resolves to a post
    pub fn all_slugs(&self) -> Result<Vec<String>, ContentError> {
        self.store.slugs()
    }

    /// Metadata of all posts, newest first, dateless posts last.
    /// Bodies are never rendered here.
    pub fn list_posts(&self) -> Result<Vec<PostMetadata>, ContentError> {
        let mut posts: Vec<PostMetadata> = self
            .store
            .entries()?
            .into_iter()
            .map(|entry| {
                let (fm, _) = FrontMatter::parse(&entry.raw);
                PostMetadata::new(entry.slug, fm)
            })
            .collect();

        sort_posts(&mut posts);
        tracing::debug!("Listed {} posts", posts.len());

        Ok(posts)
    }

    /// Fully rendered post for `slug`, or `NotFound`
    pub fn get_post(&self, slug: &str) -> Result<PostDetail, ContentError> {
        let raw = self.store.read(slug)?;
        let (fm, body) = FrontMatter::parse(&raw);
        let content = self.renderer.render(body);
        tracing::debug!("Rendered {} ({} bytes)", slug, content.len());

        Ok(PostDetail::new(PostMetadata::new(slug, fm), content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn loader_with(files: &[(&str, &str)]) -> (TempDir, ContentLoader) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let store = ContentStore::new(dir.path(), &["md".to_string()]);
        (dir, ContentLoader::from_parts(store, MarkdownRenderer::new()))
    }

    #[test]
    fn test_list_posts_order() {
        let (_dir, loader) = loader_with(&[
            ("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nA body"),
            ("b.md", "---\ntitle: B\ndate: 2024-06-01\n---\nB body"),
            ("c.md", "---\ntitle: C\n---\nC body"),
        ]);
        let posts = loader.list_posts().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["b", "a", "c"]);
        assert_eq!(posts[2].date, None);
    }

    #[test]
    fn test_list_reflects_disk_changes() {
        let (dir, loader) = loader_with(&[("a.md", "---\ndate: 2024-01-01\n---\n")]);
        assert_eq!(loader.list_posts().unwrap().len(), 1);

        fs::write(dir.path().join("z.md"), "---\ndate: 2025-01-01\n---\n").unwrap();
        let posts = loader.list_posts().unwrap();
        assert_eq!(posts[0].slug, "z");
    }

    #[test]
    fn test_get_post() {
        let (_dir, loader) = loader_with(&[(
            "hello.md",
            "---\ntitle: Hello\ndate: 2024-03-01\ntag: [a, b]\n---\n# Heading\n\n```rust\nlet x = 1;\n```\n",
        )]);
        let post = loader.get_post("hello").unwrap();
        assert_eq!(post.slug(), "hello");
        assert_eq!(post.meta.title.as_deref(), Some("Hello"));
        assert_eq!(post.meta.tags(), ["a", "b"]);
        assert!(post.content.contains("<h1>Heading</h1>"));
        assert!(post.content.contains("source rust"));
    }

    #[test]
    fn test_get_post_is_deterministic() {
        let (_dir, loader) = loader_with(&[("p.md", "Text with https://example.com\n\n<div>raw</div>\n")]);
        assert_eq!(loader.get_post("p").unwrap(), loader.get_post("p").unwrap());
    }

    #[test]
    fn test_get_unknown_post() {
        let (_dir, loader) = loader_with(&[("p.md", "x")]);
        let err = loader.get_post("does-not-exist").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_all_slugs() {
        let (_dir, loader) = loader_with(&[("one.md", ""), ("two.md", ""), ("skip.txt", "")]);
        assert_eq!(loader.all_slugs().unwrap(), ["one", "two"]);
    }
}
