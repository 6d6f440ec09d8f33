//! Generate static files

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::ContentLoader;
use crate::templates;
use crate::Site;

/// Pre-render the listing and every post into the public directory.
///
/// Layout under `<public>/<blog_dir>/`:
/// `index.html`, `index.json`, and `<slug>/index.html` plus
/// `<slug>/index.json` per post.
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = site.loader();
    let out_dir = output_dir(site);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {:?}", out_dir))?;

    // Listing
    let posts = loader.list_posts()?;
    write_file(&out_dir.join("index.json"), &serde_json::to_string_pretty(&posts)?)?;
    write_file(
        &out_dir.join("index.html"),
        &templates::index_page(&site.config, &posts),
    )?;
    tracing::info!("Wrote listing of {} posts", posts.len());

    // Detail pages; each slug touches its own directory
    let slugs = loader.all_slugs()?;
    slugs
        .par_iter()
        .map(|slug| render_post(site, &loader, &out_dir, slug))
        .collect::<Result<Vec<_>>>()?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts in {:.2}s",
        slugs.len(),
        duration.as_secs_f64()
    );

    Ok(())
}

/// Directory the blog pages are written to
pub fn output_dir(site: &Site) -> PathBuf {
    site.public_dir.join(site.config.blog_dir.trim_matches('/'))
}

fn render_post(site: &Site, loader: &ContentLoader, out_dir: &Path, slug: &str) -> Result<()> {
    let post = loader.get_post(slug)?;

    let dir = out_dir.join(slug);
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;
    write_file(&dir.join("index.html"), &templates::post_page(&site.config, &post))?;
    write_file(&dir.join("index.json"), &serde_json::to_string_pretty(&post)?)?;

    tracing::debug!("Generated: {}", slug);
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}
