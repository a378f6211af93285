/*
 * anchor.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Anchor identifiers for bibliography entries.
//!
//! An entry paragraph is anchored at the citation key with whitespace
//! removed; the n-th citation of that key is anchored at
//! `ref-<anchor>-<n>`. All of these ids share one namespace per document.
//! When a candidate anchor, or any of its citation ids, is already taken,
//! the entry gets the next free `-2`, `-3`... suffix instead.
//!
//! Keys that contain no whitespace claim their bare anchor before any
//! normalised key does, so `"ab"` stays `ab` even when `"a b"` is listed
//! first.

use std::collections::{HashMap, HashSet};

/// Remove whitespace from a key.
pub fn normalize_key(key: &str) -> String {
    key.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Id of the element that the `occurrence`-th citation of an entry renders as.
pub fn citation_anchor(anchor: &str, occurrence: usize) -> String {
    format!("ref-{}-{}", anchor, occurrence)
}

/// Document-unique anchors, one per citation key.
#[derive(Debug, Default)]
pub struct AnchorIds {
    by_key: HashMap<String, String>,
    taken: HashSet<String>,
}

impl AnchorIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate anchors for `(key, citation count)` pairs, in listing order.
    pub fn allocate<'k>(entries: impl IntoIterator<Item = (&'k str, usize)>) -> Self {
        let entries: Vec<(&str, usize)> = entries.into_iter().collect();
        let mut ids = Self::new();

        let (verbatim, normalised): (Vec<_>, Vec<_>) = entries
            .iter()
            .partition(|(key, _)| !key.chars().any(char::is_whitespace));
        for (key, count) in verbatim.into_iter().chain(normalised) {
            ids.claim(key, count);
        }
        ids
    }

    fn claim(&mut self, key: &str, citations: usize) {
        if self.by_key.contains_key(key) {
            return;
        }
        let base = normalize_key(key);
        let mut candidate = base.clone();
        let mut n = 2;
        while !self.is_free(&candidate, citations) {
            candidate = format!("{}-{}", base, n);
            n += 1;
        }

        self.taken
            .extend((1..=citations).map(|i| citation_anchor(&candidate, i)));
        self.taken.insert(candidate.clone());
        self.by_key.insert(key.to_string(), candidate);
    }

    fn is_free(&self, anchor: &str, citations: usize) -> bool {
        !self.taken.contains(anchor)
            && (1..=citations).all(|i| !self.taken.contains(&citation_anchor(anchor, i)))
    }

    /// Anchor allocated for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }
}
