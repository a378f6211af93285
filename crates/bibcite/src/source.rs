/*
 * source.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Loading bibliographies and choosing one per document.
 */

//! Bibliography sources.
//!
//! Every document is resolved against one database: its own, when its
//! metadata names a file that parses, or else the site-wide default.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use bibcite_bibtex::Bibliography;
use tracing::warn;

use crate::config::resolve_against;
use crate::content::{ContentItem, local_publications_src};
use crate::error::{CitationWarning, CiteError, Result};

/// Whether this build can read `.bib` files.
pub const fn reader_available() -> bool {
    cfg!(feature = "bibtex")
}

/// Read and parse a BibTeX file.
#[cfg(feature = "bibtex")]
pub fn load_bibliography(path: &Path) -> Result<Bibliography> {
    bibcite_bibtex::parse_file(path).map_err(|source| CiteError::BibliographyParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a BibTeX file.
#[cfg(not(feature = "bibtex"))]
pub fn load_bibliography(_path: &Path) -> Result<Bibliography> {
    Err(CiteError::MissingDependency {
        dependency: "bibtex",
    })
}

/// Chooses the database each document is resolved against.
#[derive(Debug, Clone, Copy)]
pub struct BibliographySource<'a> {
    default: Option<&'a Bibliography>,
    root: &'a Path,
}

impl<'a> BibliographySource<'a> {
    /// `root` is the base for relative paths in document metadata.
    pub fn new(default: Option<&'a Bibliography>, root: &'a Path) -> Self {
        Self { default, root }
    }

    pub fn default_database(&self) -> Option<&'a Bibliography> {
        self.default
    }

    /// Database for `item`.
    ///
    /// A local bibliography that loads shadows the default entirely. One
    /// that fails to load is reported in `warnings` and the default is used.
    pub fn select(
        &self,
        item: &dyn ContentItem,
        warnings: &mut Vec<CitationWarning>,
    ) -> Option<Cow<'a, Bibliography>> {
        let Some(local) = local_publications_src(item) else {
            return self.default.map(Cow::Borrowed);
        };

        let path = resolve_against(self.root, Path::new(local));
        match load_bibliography(&path) {
            Ok(database) => Some(Cow::Owned(database)),
            Err(err) => {
                warn!(
                    document = %item.source_name(),
                    path = %path.display(),
                    "Could not use local bibliography, falling back to the default: {}",
                    err
                );
                warnings.push(CitationWarning::LocalBibliography {
                    path: PathBuf::from(local),
                    message: err.to_string(),
                });
                self.default.map(Cow::Borrowed)
            }
        }
    }
}
