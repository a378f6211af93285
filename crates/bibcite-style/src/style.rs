/*
 * style.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The formatting style interface.

use bibcite_bibtex::Entry;

use crate::text::Text;

/// An entry after formatting: its label and body, ready for a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedEntry {
    /// Citation key of the source entry.
    pub key: String,
    /// Reference label without surrounding brackets (e.g. "1").
    pub label: String,
    /// Entry body.
    pub text: Text,
}

/// A bibliography formatting style.
///
/// Styles choose the order of the bibliography: the returned list need not
/// follow the order of `entries`.
pub trait BibliographyStyle: Send + Sync {
    /// Style name, used in logs.
    fn name(&self) -> &str;

    /// Format a set of entries into labelled bibliography items.
    fn format_entries(&self, entries: &[&Entry]) -> Vec<FormattedEntry>;
}
