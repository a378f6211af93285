/*
 * citation.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Citation marker scanning and occurrence counting.
 */

//! Citation markers.
//!
//! A marker is `[@key]` or `[@@key]`. The key starts with a word character
//! and runs up to the first closing bracket; surrounding whitespace is
//! trimmed. Only one key per marker is recognised.

use std::ops::Range;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

static CITE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(@@?)\s*(\w.*?)\s*\]").expect("citation pattern is valid"));

/// Which marker form was used.
///
/// Both forms currently render the same label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationForm {
    /// `[@key]`
    Single,
    /// `[@@key]`
    Double,
}

/// One citation marker found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    /// Citation key, trimmed.
    pub key: String,
    /// Marker form.
    pub form: CitationForm,
    /// Byte range of the whole marker in the scanned text.
    pub range: Range<usize>,
}

/// Find every citation marker in `text`, in order of appearance.
pub fn scan(text: &str) -> Vec<Citation> {
    CITE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let form = match caps.get(1)?.as_str() {
                "@@" => CitationForm::Double,
                _ => CitationForm::Single,
            };
            Some(Citation {
                key: caps.get(2)?.as_str().to_string(),
                form,
                range: whole.range(),
            })
        })
        .collect()
}

/// Number of times each key is cited in one document.
///
/// Keys are kept in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceTable {
    counts: IndexMap<String, usize>,
}

impl OccurrenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `key`.
    pub fn record(&mut self, key: &str) {
        *self.counts.entry(key.to_string()).or_insert(0) += 1;
    }

    /// Occurrences of `key`, zero when never cited.
    pub fn count(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<'a> FromIterator<&'a Citation> for OccurrenceTable {
    fn from_iter<I: IntoIterator<Item = &'a Citation>>(iter: I) -> Self {
        let mut table = OccurrenceTable::new();
        for citation in iter {
            table.record(&citation.key);
        }
        table
    }
}
