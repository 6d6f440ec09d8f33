//! Page shells around pipeline output
//!
//! Layout and styling are out of scope; these wrap a listing or a rendered
//! post in just enough HTML to be served or written to disk.

use crate::config::SiteConfig;
use crate::content::{PostDetail, PostMetadata};
use crate::helpers::{date_iso, display_date, escape_html, link_to, tag_list};

const UNTITLED: &str = "Untitled";

/// Wrap a page body in the document skeleton
fn layout(config: &SiteConfig, title: &str, body: &str) -> String {
    let page_title = if title.is_empty() {
        escape_html(&config.title)
    } else {
        format!("{} | {}", escape_html(title), escape_html(&config.title))
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
</head>
<body>
<main>
{}
</main>
</body>
</html>
"#,
        page_title, body
    )
}

fn time_tag(config: &SiteConfig, date: Option<&str>) -> String {
    match date {
        Some(date) => {
            let datetime = date_iso(date)
                .map(|iso| format!(r#" datetime="{}""#, iso))
                .unwrap_or_default();
            format!(
                "<time{}>{}</time>",
                datetime,
                escape_html(&display_date(date, &config.date_format))
            )
        }
        None => String::new(),
    }
}

/// URL of a post's detail page
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    format!("{}/{}", config.blog_root(), slug)
}

/// Listing page: one entry per post in the given order
pub fn index_page(config: &SiteConfig, posts: &[PostMetadata]) -> String {
    let mut body = String::from("<h1>Blog Posts</h1>\n<ul class=\"posts\">\n");

    for post in posts {
        let title = post.title.as_deref().unwrap_or(UNTITLED);
        body.push_str("<li class=\"post\">");
        body.push_str(&format!(
            "<h2>{}</h2>",
            link_to(&post_url(config, &post.slug), title)
        ));
        body.push_str(&time_tag(config, post.sort_date()));
        if let Some(excerpt) = &post.excerpt {
            body.push_str(&format!("<p>{}</p>", escape_html(excerpt)));
        }
        body.push_str(&tag_list(post.tags()));
        body.push_str("</li>\n");
    }

    body.push_str("</ul>");
    layout(config, "", &body)
}

/// Detail page for a single rendered post
pub fn post_page(config: &SiteConfig, post: &PostDetail) -> String {
    let title = post.meta.title.as_deref().unwrap_or(UNTITLED);
    let body = format!(
        "<article>\n<header>\n<h1>{}</h1>\n{}\n{}\n</header>\n<div class=\"markdown-content\">\n{}</div>\n</article>",
        escape_html(title),
        time_tag(config, post.meta.sort_date()),
        tag_list(post.meta.tags()),
        post.content
    );
    layout(config, title, &body)
}

/// Page shown for an unknown slug
pub fn not_found_page(config: &SiteConfig, slug: &str) -> String {
    let body = format!(
        "<h1>404</h1>\n<p>No post named <code>{}</code>.</p>\n<p>{}</p>",
        escape_html(slug),
        link_to(&format!("{}/", config.blog_root()), "All posts")
    );
    layout(config, "Not Found", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(slug: &str, title: Option<&str>, date: Option<&str>) -> PostMetadata {
        PostMetadata {
            slug: slug.to_string(),
            title: title.map(|t| t.to_string()),
            date: date.map(|d| d.to_string()),
            excerpt: Some("Short & sweet".to_string()),
            tag: Some(vec!["rust".to_string()]),
        }
    }

    #[test]
    fn test_index_page() {
        let config = SiteConfig::default();
        let posts = vec![
            meta("b", Some("Second"), Some("2024-06-01")),
            meta("c", None, None),
        ];
        let html = index_page(&config, &posts);
        assert!(html.contains(r#"<a href="/blog/b">Second</a>"#));
        assert!(html.contains(r#"<time datetime="2024-06-01">June 1, 2024</time>"#));
        assert!(html.contains(r#"<a href="/blog/c">Untitled</a>"#));
        assert!(html.contains("Short &amp; sweet"));
        assert!(html.find("/blog/b").unwrap() < html.find("/blog/c").unwrap());
    }

    #[test]
    fn test_post_page_embeds_content_verbatim() {
        let config = SiteConfig::default();
        let post = PostDetail::new(
            meta("a", Some("A <title>"), Some("2024-01-01")),
            "<p>Hello</p>\n<video src=\"/v.mp4\"></video>\n".to_string(),
        );
        let html = post_page(&config, &post);
        assert!(html.contains("<h1>A &lt;title&gt;</h1>"));
        assert!(html.contains("<video src=\"/v.mp4\"></video>"));
        assert!(html.contains("<title>A &lt;title&gt; | My Blog</title>"));
        assert!(html.contains(r#"<li class="tag">rust</li>"#));
    }

    #[test]
    fn test_not_found_page() {
        let config = SiteConfig::default();
        let html = not_found_page(&config, "<missing>");
        assert!(html.contains("&lt;missing&gt;"));
        assert!(html.contains(r#"<a href="/blog/">All posts</a>"#));
    }
}
