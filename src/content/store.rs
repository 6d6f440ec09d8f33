//! Content store - enumerates post files and reads them by slug

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::ContentError;

/// One post file as found on disk
#[derive(Debug, Clone)]
pub struct ContentEntry {
    pub slug: String,
    pub path: PathBuf,
    pub raw: String,
}

/// Read-only view over a directory of markdown files.
///
/// Nothing is cached: every call goes back to the filesystem.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    extensions: Vec<String>,
}

impl ContentStore {
    /// Create a store over `root`, accepting files with the given extensions
    pub fn new<P: AsRef<Path>>(root: P, extensions: &[String]) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: extensions.to_vec(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All slugs in the store
    pub fn slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.index()?.into_keys().collect())
    }

    /// Every entry with its raw text
    pub fn entries(&self) -> Result<Vec<ContentEntry>, ContentError> {
        self.index()?
            .into_iter()
            .map(|(slug, path)| {
                let raw = read_file(&path, &slug)?;
                Ok(ContentEntry { slug, path, raw })
            })
            .collect()
    }

    /// Raw text of the entry behind `slug`.
    ///
    /// Fails with `DuplicateSlug` when more than one extension matches,
    /// same as enumeration does.
    pub fn read(&self, slug: &str) -> Result<String, ContentError> {
        if !is_valid_slug(slug) {
            return Err(ContentError::NotFound(slug.to_string()));
        }

        let mut found: Option<PathBuf> = None;
        for ext in &self.extensions {
            let path = self.root.join(format!("{}.{}", slug, ext));
            if !path.is_file() {
                continue;
            }
            if let Some(first) = found {
                return Err(ContentError::DuplicateSlug {
                    slug: slug.to_string(),
                    first,
                    second: path,
                });
            }
            found = Some(path);
        }

        match found {
            Some(path) => {
                tracing::debug!("Reading {:?}", path);
                read_file(&path, slug)
            }
            None => Err(ContentError::NotFound(slug.to_string())),
        }
    }

    /// Map of slug to file path, one level deep
    fn index(&self) -> Result<BTreeMap<String, PathBuf>, ContentError> {
        let mut index = BTreeMap::new();

        if !self.root.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", self.root);
            return Ok(index);
        }

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", self.root, e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !self.is_content_file(path) {
                continue;
            }

            let Some(slug) = slug_for_path(path) else {
                tracing::warn!("Skipping {:?}: file name is not valid UTF-8", path);
                continue;
            };

            // Same rule as `read`, so every listed slug can be opened
            if !is_valid_slug(&slug) {
                tracing::warn!("Skipping {:?}: {:?} is not a usable slug", path, slug);
                continue;
            }

            if let Some(first) = index.get(&slug) {
                return Err(ContentError::DuplicateSlug {
                    slug,
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }
            index.insert(slug, path.to_path_buf());
        }

        Ok(index)
    }

    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|ext| ext == e))
            .unwrap_or(false)
    }
}

/// Slug for a content file: its name with the extension removed
pub fn slug_for_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// A slug must name a single file inside the content root
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\', '\0'])
}

fn read_file(path: &Path, slug: &str) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ContentError::NotFound(slug.to_string()),
        _ => ContentError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
