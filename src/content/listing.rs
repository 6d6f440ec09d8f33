//! Listing order for posts

use std::cmp::Ordering;

use super::PostMetadata;

/// Order posts newest first.
///
/// Dates compare as plain strings, so they must share a sortable format
/// such as `YYYY-MM-DD`. Posts without a date go after every dated post
/// and keep their relative order (the sort is stable).
pub fn sort_posts(posts: &mut [PostMetadata]) {
    posts.sort_by(compare_by_date);
}

/// Comparator behind [`sort_posts`]
pub fn compare_by_date(a: &PostMetadata, b: &PostMetadata) -> Ordering {
    match (a.sort_date(), b.sort_date()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => b.cmp(a),
    }
}
