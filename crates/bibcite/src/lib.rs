/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Citation resolution for rendered documents.
//!
//! Documents cite bibliography entries with `[@key]` (or `[@@key]`). This
//! crate replaces each marker with a numbered link and appends a
//! bibliography listing the cited entries, each with links back to every
//! place it was cited.
//!
//! ```
//! use bibcite::Resolver;
//! use bibcite_bibtex::{Bibliography, Entry};
//!
//! let database: Bibliography = vec![
//!     Entry::new("smith2020", "misc")
//!         .with_field("author", "Jane Smith")
//!         .with_field("title", "A study")
//!         .with_field("year", "2020"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let resolution = Resolver::default().resolve("See [@smith2020].", Some(&database));
//! assert!(resolution
//!     .content
//!     .starts_with(r##"See <a href="#smith2020" id="ref-smith2020-1">[1]</a>."##));
//! assert!(resolution.content.contains("<h3>Bibliography</h3>"));
//! ```
//!
//! Build hosts implement [`ContentItem`] for their documents and call
//! [`add_citations`] once every document is rendered. A document may name
//! its own `.bib` file in its `publications_src` metadata; otherwise the
//! default from [`CiteSettings`] is used.

pub mod anchor;
pub mod citation;
pub mod config;
pub mod content;
pub mod error;
pub mod plugin;
pub mod resolve;
pub mod source;

pub use citation::{Citation, CitationForm, OccurrenceTable, scan};
pub use config::CiteSettings;
pub use content::ContentItem;
pub use error::{CitationWarning, CiteError, Result};
pub use plugin::{CitationReport, Citations, DocumentWarning, add_citations};
pub use resolve::{Resolution, Resolver};
pub use source::{BibliographySource, load_bibliography, reader_available};
