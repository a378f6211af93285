/*
 * resolve.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Citation resolution: markers to labels, plus an appended bibliography.
 */

//! The citation resolution pass.
//!
//! Resolution runs in three steps over one document:
//!
//! 1. scan the text for markers and count occurrences per key
//! 2. format only the cited entries and build the bibliography section,
//!    giving each entry one back-link per citation
//! 3. rewrite each marker as a link to its entry
//!
//! Counting must finish before rewriting: the n-th citation of a key is
//! anchored at `ref-<anchor>-<n>` and the entry needs all of those targets.
//!
//! ## Output Structure
//!
//! ```html
//! See <a href="#smith2020" id="ref-smith2020-1">[1]</a> for details.
//! <h3>Bibliography</h3>
//! <p id="smith2020">Jane Smith. A study. 2020. <a href="#ref-smith2020-1" title="Jump back to reference 1">↩ 1</a></p>
//! ```

use std::collections::HashMap;

use bibcite_bibtex::{Bibliography, Entry};
use bibcite_style::{Backend, BibliographyStyle, HtmlBackend, PlainStyle, escape_html};
use tracing::{debug, warn};

use crate::anchor::{AnchorIds, citation_anchor};
use crate::citation::{OccurrenceTable, scan};
use crate::error::CitationWarning;

/// Default heading placed above the bibliography.
pub const DEFAULT_HEADING: &str = "Bibliography";

/// Glyph on the first back-link of an entry.
const RETURN_GLYPH: &str = "\u{21a9}";

/// Result of resolving one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Rewritten text, with the bibliography appended when anything was cited.
    pub content: String,
    /// Number of entries in the appended bibliography.
    pub entries: usize,
    /// Problems that were skipped over.
    pub warnings: Vec<CitationWarning>,
}

impl Resolution {
    fn unchanged(text: &str) -> Self {
        Self {
            content: text.to_string(),
            entries: 0,
            warnings: Vec::new(),
        }
    }
}

/// Rewrites citation markers using a formatting style and a backend.
pub struct Resolver {
    style: Box<dyn BibliographyStyle>,
    backend: Box<dyn Backend>,
    heading: String,
}

impl Resolver {
    /// Resolver with the default `Bibliography` heading.
    pub fn new(style: impl BibliographyStyle + 'static, backend: impl Backend + 'static) -> Self {
        Self {
            style: Box::new(style),
            backend: Box::new(backend),
            heading: DEFAULT_HEADING.to_string(),
        }
    }

    /// Set the bibliography heading text.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    /// Heading text above the appended bibliography.
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Resolve the citation markers in `text`.
    ///
    /// With no database, or an empty one, the text is returned unchanged.
    /// Markers whose key is not in the database are kept verbatim and
    /// reported as [`CitationWarning::MissingKey`].
    pub fn resolve(&self, text: &str, database: Option<&Bibliography>) -> Resolution {
        let Some(database) = database.filter(|db| !db.is_empty()) else {
            return Resolution::unchanged(text);
        };

        let citations = scan(text);
        if citations.is_empty() {
            return Resolution::unchanged(text);
        }
        let occurrences: OccurrenceTable = citations.iter().collect();

        let cited: Vec<&Entry> = database
            .iter()
            .filter(|entry| occurrences.contains(&entry.key))
            .collect();
        let formatted = self.style.format_entries(&cited);

        let anchors = AnchorIds::allocate(
            formatted
                .iter()
                .map(|entry| (entry.key.as_str(), occurrences.count(&entry.key))),
        );
        let mut labels: HashMap<&str, &str> = HashMap::new();
        let mut section = String::new();
        if !formatted.is_empty() {
            section.push_str(&format!("<h3>{}</h3>\n", escape_html(&self.heading)));
        }
        for entry in &formatted {
            let Some(anchor) = anchors.get(&entry.key) else {
                continue;
            };
            let body = self.backend.render(&entry.text);
            section.push_str(&bibliography_paragraph(
                anchor,
                &body,
                occurrences.count(&entry.key),
            ));
            labels.insert(entry.key.as_str(), entry.label.as_str());
        }

        let mut content = String::with_capacity(text.len() + section.len());
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut warnings = Vec::new();
        let mut last = 0;

        for citation in &citations {
            content.push_str(&text[last..citation.range.start]);
            let key = citation.key.as_str();
            match (labels.get(key), anchors.get(key)) {
                (Some(label), Some(anchor)) => {
                    let occurrence = seen.entry(key).or_insert(0);
                    *occurrence += 1;
                    content.push_str(&label_markup(anchor, *occurrence, label));
                }
                _ => {
                    warn!(key = %key, "No BibTeX entry found for citation key");
                    content.push_str(&text[citation.range.clone()]);
                    warnings.push(CitationWarning::MissingKey {
                        key: key.to_string(),
                    });
                }
            }
            last = citation.range.end;
        }
        content.push_str(&text[last..]);

        if !section.is_empty() {
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str(&section);
        }

        debug!(
            citations = citations.len(),
            entries = formatted.len(),
            style = self.style.name(),
            backend = self.backend.name(),
            "Resolved citations"
        );

        Resolution {
            content,
            entries: formatted.len(),
            warnings,
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(PlainStyle::new(), HtmlBackend::new())
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("style", &self.style.name())
            .field("backend", &self.backend.name())
            .field("heading", &self.heading)
            .finish()
    }
}

/// Link that replaces the `occurrence`-th marker of an entry.
fn label_markup(anchor: &str, occurrence: usize, label: &str) -> String {
    let anchor = escape_html(anchor);
    format!(
        "<a href=\"#{}\" id=\"{}\">[{}]</a>",
        anchor,
        citation_anchor(&anchor, occurrence),
        escape_html(label)
    )
}

/// `<p id="anchor">body ↩ 1, 2, 3</p>` with one back-link per citation.
fn bibliography_paragraph(anchor: &str, body: &str, citations: usize) -> String {
    let anchor = escape_html(anchor);
    let back_links: Vec<String> = (1..=citations)
        .map(|i| {
            let text = if i == 1 {
                format!("{} {}", RETURN_GLYPH, i)
            } else {
                i.to_string()
            };
            format!(
                "<a href=\"#{}\" title=\"Jump back to reference {}\">{}</a>",
                citation_anchor(&anchor, i),
                i,
                text
            )
        })
        .collect();

    format!("<p id=\"{}\">{} {}</p>\n", anchor, body, back_links.join(", "))
}
