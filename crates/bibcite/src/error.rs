/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error and warning types for citation processing.
//!
//! Nothing here aborts a build. [`CiteError`] values are logged and turned
//! into a fallback (the default bibliography, or no bibliography at all);
//! [`CitationWarning`] values describe what was skipped in a document.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CiteError {
    /// A bibliography file could not be read or parsed.
    #[error("failed to parse bibliography {}: {source}", path.display())]
    BibliographyParse {
        path: PathBuf,
        #[source]
        source: bibcite_bibtex::Error,
    },

    /// Citation processing was built without a required component.
    #[error("failed to load dependency `{dependency}`")]
    MissingDependency { dependency: &'static str },
}

pub type Result<T> = std::result::Result<T, CiteError>;

/// A recoverable problem found while processing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationWarning {
    /// A marker names a key that is not in the bibliography. The marker is
    /// left in the text unchanged.
    MissingKey { key: String },

    /// The document's own bibliography could not be used; the default
    /// bibliography was used instead.
    LocalBibliography { path: PathBuf, message: String },
}

impl fmt::Display for CitationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitationWarning::MissingKey { key } => {
                write!(f, "No BibTeX entry found for key \"{}\"", key)
            }
            CitationWarning::LocalBibliography { path, message } => write!(
                f,
                "failed to parse bibliography {}: {}",
                path.display(),
                message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dependency_display() {
        let err = CiteError::MissingDependency {
            dependency: "bibtex",
        };
        assert_eq!(err.to_string(), "failed to load dependency `bibtex`");
    }

    #[test]
    fn test_bibliography_parse_display() {
        let err = CiteError::BibliographyParse {
            path: PathBuf::from("refs.bib"),
            source: bibcite_bibtex::Error::DuplicateKey {
                key: "a".to_string(),
                line: 4,
            },
        };
        let display = err.to_string();
        assert!(display.contains("refs.bib"), "Got: {}", display);
        assert!(display.contains("repeated bibliography entry 'a'"), "Got: {}", display);
    }

    #[test]
    fn test_missing_key_display() {
        let warning = CitationWarning::MissingKey {
            key: "nobody2000".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "No BibTeX entry found for key \"nobody2000\""
        );
    }
}
