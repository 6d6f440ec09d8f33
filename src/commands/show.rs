//! Render a single post

use anyhow::Result;

use crate::Site;

/// Print the rendered HTML of `slug`, or the whole post as JSON
pub fn run(site: &Site, slug: &str, json: bool) -> Result<()> {
    let post = site.loader().get_post(slug)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        print!("{}", post.content);
    }

    Ok(())
}
