//! Content module - reads posts from disk, extracts metadata, renders bodies

mod frontmatter;
mod listing;
pub mod loader;
pub mod markdown;
mod post;
mod store;

pub use frontmatter::FrontMatter;
pub use listing::{compare_by_date, sort_posts};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{PostDetail, PostMetadata};
pub use store::{slug_for_path, ContentEntry, ContentStore};
