//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub blog_dir: String,
    pub extensions: Vec<String>,

    // Display
    pub date_format: String,

    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub server: ServerConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            author: String::new(),
            url: "http://localhost:3000".to_string(),

            content_dir: "src/content/blog".to_string(),
            public_dir: "public".to_string(),
            blog_dir: "blog".to_string(),
            extensions: vec!["md".to_string(), "markdown".to_string()],

            date_format: "%B %-d, %Y".to_string(),

            markdown: MarkdownConfig::default(),
            highlight: HighlightConfig::default(),
            server: ServerConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// URL path prefix under which posts are served, e.g. `/blog`
    pub fn blog_root(&self) -> String {
        let dir = self.blog_dir.trim_matches('/');
        if dir.is_empty() {
            String::new()
        } else {
            format!("/{}", dir)
        }
    }
}

/// Markdown pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// GitHub-flavored extensions: tables, strikethrough, task lists, autolinks
    pub gfm: bool,
    /// Let raw HTML inside markdown through unescaped
    pub allow_dangerous_html: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            allow_dangerous_html: true,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            line_number: false,
        }
    }
}

/// Dynamic-render server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "src/content/blog");
        assert_eq!(config.extensions, vec!["md", "markdown"]);
        assert!(config.markdown.allow_dangerous_html);
        assert!(config.highlight.enable);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Notes
content_dir: posts
markdown:
  allow_dangerous_html: false
highlight:
  line_number: true
server:
  port: 8080
analytics: plausible
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.content_dir, "posts");
        assert!(!config.markdown.allow_dangerous_html);
        assert!(config.markdown.gfm);
        assert!(config.highlight.enable);
        assert!(config.highlight.line_number);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
        assert!(config.extra.contains_key("analytics"));
    }

    #[test]
    fn test_blog_root() {
        let mut config = SiteConfig::default();
        assert_eq!(config.blog_root(), "/blog");
        config.blog_dir = "/writing/".to_string();
        assert_eq!(config.blog_root(), "/writing");
        config.blog_dir = String::new();
        assert_eq!(config.blog_root(), "");
    }
}
