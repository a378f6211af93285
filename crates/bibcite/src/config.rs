/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Site-wide citation settings.
 */

//! Site-wide citation settings.
//!
//! Settings come from the host's configuration file. Keys are kebab-case;
//! the upper-case `PUBLICATIONS_SRC` spelling is accepted as well.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::resolve::DEFAULT_HEADING;

/// Citation settings for one build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CiteSettings {
    /// Default bibliography, used by every document without its own.
    #[serde(alias = "PUBLICATIONS_SRC", alias = "publications_src")]
    pub publications_src: Option<PathBuf>,

    /// Heading text above the appended bibliography.
    #[serde(alias = "BIBLIOGRAPHY_HEADING")]
    pub bibliography_heading: String,

    /// Base directory for relative bibliography paths.
    #[serde(skip)]
    pub root: PathBuf,
}

impl Default for CiteSettings {
    fn default() -> Self {
        Self {
            publications_src: None,
            bibliography_heading: DEFAULT_HEADING.to_string(),
            root: PathBuf::from("."),
        }
    }
}

impl CiteSettings {
    /// Set the default bibliography path.
    pub fn with_publications_src(mut self, path: impl Into<PathBuf>) -> Self {
        self.publications_src = Some(path.into());
        self
    }

    /// Set the base directory for relative paths.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Resolve `path` against the root unless it is already absolute.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        resolve_against(&self.root, path.as_ref())
    }

    /// Absolute location of the default bibliography, if one is configured.
    pub fn default_bibliography(&self) -> Option<PathBuf> {
        self.publications_src.as_ref().map(|p| self.resolve_path(p))
    }
}

pub(crate) fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
