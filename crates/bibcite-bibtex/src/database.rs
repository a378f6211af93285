/*
 * database.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Bibliography database and entry types.
 */

//! Bibliography database types.
//!
//! A [`Bibliography`] maps citation keys to [`Entry`] values. Keys are
//! case-sensitive and unique, and iteration follows the order in which the
//! entries appeared in the source file.

use indexmap::IndexMap;

use crate::person::Person;

/// Fields whose values are lists of names rather than plain text.
pub const PERSON_FIELDS: &[&str] = &["author", "editor"];

/// A single bibliography entry (`@article{key, ...}`).
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Citation key, exactly as written in the source.
    pub key: String,

    /// Entry type, lower-cased (e.g. "article", "book").
    pub entry_type: String,

    /// Text fields keyed by lower-cased field name, macros expanded.
    pub fields: IndexMap<String, String>,

    /// Name lists keyed by role ("author", "editor").
    pub persons: IndexMap<String, Vec<Person>>,
}

impl Entry {
    /// Create an empty entry.
    pub fn new(key: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entry_type: entry_type.into().to_lowercase(),
            fields: IndexMap::new(),
            persons: IndexMap::new(),
        }
    }

    /// Add a field. Person fields are split into names.
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_field(name, value.into());
        self
    }

    pub(crate) fn set_field(&mut self, name: &str, value: String) {
        let name = name.to_lowercase();
        if PERSON_FIELDS.contains(&name.as_str()) {
            self.persons.insert(name, Person::parse_list(&value));
        } else {
            self.fields.insert(name, value);
        }
    }

    /// Get a text field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Get the names for a role, or an empty slice.
    pub fn persons(&self, role: &str) -> &[Person] {
        match self.persons.get(role) {
            Some(people) => people,
            None => &[],
        }
    }
}

/// An immutable, ordered collection of entries keyed by citation key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bibliography {
    entries: IndexMap<String, Entry>,
    preamble: Vec<String>,
}

impl Bibliography {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning it back if the key is already present.
    pub(crate) fn insert(&mut self, entry: Entry) -> std::result::Result<(), Entry> {
        if self.entries.contains_key(&entry.key) {
            return Err(entry);
        }
        self.entries.insert(entry.key.clone(), entry);
        Ok(())
    }

    #[cfg_attr(not(feature = "reader"), allow(dead_code))]
    pub(crate) fn push_preamble(&mut self, text: String) {
        self.preamble.push(text);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the database holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Iterate keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `@preamble` contents in source order.
    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }
}

impl FromIterator<Entry> for Bibliography {
    /// Build a database from entries. Later duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut bib = Bibliography::new();
        for entry in iter {
            let _ = bib.insert(entry);
        }
        bib
    }
}
