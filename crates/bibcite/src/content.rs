/*
 * content.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The contract between citation processing and the host's documents.
 */

//! Host documents.
//!
//! Citation processing only needs a name for log messages, a metadata
//! lookup and read/write access to the rendered text. Hosts implement
//! [`ContentItem`] for whatever page or article type they carry.

/// Metadata keys that declare a document's own bibliography file.
pub const PUBLICATIONS_SRC_KEYS: &[&str] = &["publications_src", "publications-src"];

/// A document the host has rendered and will write out.
pub trait ContentItem {
    /// Identity used in log messages, typically the source path.
    fn source_name(&self) -> &str;

    /// A scalar metadata value declared by the document.
    fn metadata(&self, key: &str) -> Option<&str>;

    /// Rendered text.
    fn content(&self) -> &str;

    /// Replace the rendered text.
    fn set_content(&mut self, content: String);
}

/// The bibliography path a document declares for itself, if any.
pub fn local_publications_src(item: &dyn ContentItem) -> Option<&str> {
    PUBLICATIONS_SRC_KEYS.iter().find_map(|key| {
        item.metadata(key)
            .map(str::trim)
            .filter(|path| !path.is_empty())
    })
}
