/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! BibTeX reader and bibliography data model.
//!
//! This crate reads `.bib` files into a [`Bibliography`]: an immutable,
//! source-ordered map from citation key to [`Entry`]. Entries carry their
//! text fields with macros expanded, and their `author`/`editor` lists
//! parsed into [`Person`] values.
//!
//! Field values are kept as written (braces, TeX escapes); turning them into
//! display text is the job of the formatting style.
//!
//! # Example
//!
//! ```
//! let bib = bibcite_bibtex::parse(
//!     "@book{knuth1984, author = {Donald E. Knuth}, title = {The {TeX}book}, year = 1984}",
//! )?;
//! let entry = bib.get("knuth1984").unwrap();
//! assert_eq!(entry.field("year"), Some("1984"));
//! assert_eq!(entry.persons("author")[0].last, vec!["Knuth".to_string()]);
//! # Ok::<(), bibcite_bibtex::Error>(())
//! ```

pub mod database;
pub mod error;
#[cfg(feature = "reader")]
pub mod parser;
pub mod person;

pub use database::{Bibliography, Entry};
pub use error::{Error, Result};
#[cfg(feature = "reader")]
pub use parser::parse;
pub use person::Person;

/// Read and parse a `.bib` file.
#[cfg(feature = "reader")]
pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<Bibliography> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&source)
}
