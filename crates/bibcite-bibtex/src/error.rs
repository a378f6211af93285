/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for reading BibTeX databases.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a `.bib` file.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed BibTeX syntax.
    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A bare identifier was used as a value but no `@string` defines it.
    #[error("undefined macro '{name}' on line {line}")]
    UndefinedMacro { name: String, line: usize },

    /// Two entries share a citation key.
    #[error("repeated bibliography entry '{key}' on line {line}")]
    DuplicateKey { key: String, line: usize },
}

impl Error {
    #[cfg(feature = "reader")]
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for bibcite-bibtex operations.
pub type Result<T> = std::result::Result<T, Error>;
