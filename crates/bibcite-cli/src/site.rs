/*
 * site.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Site configuration and document discovery.
 */

//! Site layout.
//!
//! A site is a directory with an optional `_bibcite.yml`. Every `.html`,
//! `.htm` or `.md` file below it is a document, except files inside the
//! output directory and anything whose name starts with `_` or `.`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bibcite::CiteSettings;
use serde::Deserialize;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Name of the site configuration file.
pub const CONFIG_FILE: &str = "_bibcite.yml";

/// File extensions treated as documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["html", "htm", "md"];

const DEFAULT_OUTPUT_DIR: &str = "_site";

/// Parsed `_bibcite.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Where rewritten documents go, relative to the site root.
    pub output_dir: PathBuf,

    #[serde(flatten)]
    pub cite: CiteSettings,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            cite: CiteSettings::default(),
        }
    }
}

impl SiteConfig {
    /// Load `_bibcite.yml` from `root`, or defaults when there is none.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            debug!("No {} in {}, using defaults", CONFIG_FILE, root.display());
            return Ok(Self::default().with_root(root));
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config.with_root(root))
    }

    /// Parse configuration text. An empty file gives the defaults.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    fn with_root(mut self, root: &Path) -> Self {
        self.cite.root = root.to_path_buf();
        self
    }

    /// Output directory, resolved against the site root.
    pub fn output_path(&self) -> PathBuf {
        self.cite.resolve_path(&self.output_dir)
    }
}

/// Documents under `root`, relative to it, in a stable order.
pub fn discover_documents(root: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry, output_dir));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to scan {}", root.display()))?;
        if !entry.file_type().is_file() || !is_document(entry.path()) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("{} is outside the site", entry.path().display()))?;
        documents.push(relative.to_path_buf());
    }

    debug!(count = documents.len(), "Discovered documents");
    Ok(documents)
}

fn is_excluded(entry: &DirEntry, output_dir: &Path) -> bool {
    let hidden = entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('_') || name.starts_with('.'));
    hidden || entry.path() == output_dir
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
