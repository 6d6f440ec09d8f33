//! List posts in display order

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::PostMetadata;
use crate::helpers::display_date;
use crate::Site;

/// Print the listing, as text lines or as JSON
pub fn run(site: &Site, json: bool) -> Result<()> {
    let posts = site.loader().list_posts()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("  {}", format_line(&site.config, post));
    }

    Ok(())
}

/// `date - title [slug] #tags`
fn format_line(config: &SiteConfig, post: &PostMetadata) -> String {
    let date = post
        .sort_date()
        .map(|d| display_date(d, &config.date_format))
        .unwrap_or_else(|| "----------".to_string());
    let title = post.title.as_deref().unwrap_or("(untitled)");

    let mut line = format!("{} - {} [{}]", date, title, post.slug);
    for tag in post.tags() {
        line.push_str(" #");
        line.push_str(tag);
    }
    line
}
