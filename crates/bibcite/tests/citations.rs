/*
 * citations.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests for citation processing over a small site.
 */

#![cfg(feature = "bibtex")]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bibcite::{
    CitationWarning, CiteSettings, ContentItem, OccurrenceTable, Resolver, add_citations, scan,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const GLOBAL_BIB: &str = r#"
@misc{smith2020,
  author = {Jane Smith},
  title = {A study of things},
  year = 2020,
}
"#;

const THREE_BIB: &str = r#"
@misc{a, author = {Ann Able}, title = {First}, year = 2001}
@misc{b, author = {Ben Baker}, title = {Second}, year = 2002}
@misc{c, author = {Cat Cole}, title = {Third}, year = 2003}
"#;

struct Page {
    name: String,
    meta: HashMap<String, String>,
    text: String,
}

impl Page {
    fn new(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            meta: HashMap::new(),
            text: text.to_string(),
        }
    }

    fn with_meta(mut self, key: &str, value: &str) -> Self {
        self.meta.insert(key.to_string(), value.to_string());
        self
    }
}

impl ContentItem for Page {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn metadata(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    fn content(&self) -> &str {
        &self.text
    }

    fn set_content(&mut self, content: String) {
        self.text = content;
    }
}

fn site(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, body) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, body).unwrap();
    }
    dir
}

fn settings(root: &Path, default: Option<&str>) -> CiteSettings {
    let settings = CiteSettings::default().with_root(root);
    match default {
        Some(path) => settings.with_publications_src(path),
        None => settings,
    }
}

#[test]
fn test_smith2020_end_to_end() {
    let dir = site(&[("refs/global.bib", GLOBAL_BIB)]);
    let mut pages = vec![Page::new("index.html", "See [@smith2020] for details.")];

    let report = add_citations(&settings(dir.path(), Some("refs/global.bib")), pages.iter_mut());

    assert_eq!(
        pages[0].text,
        "See <a href=\"#smith2020\" id=\"ref-smith2020-1\">[1]</a> for details.\n\
         <h3>Bibliography</h3>\n\
         <p id=\"smith2020\">Jane Smith. A study of things. 2020. \
         <a href=\"#ref-smith2020-1\" title=\"Jump back to reference 1\">\u{21a9} 1</a></p>\n"
    );
    assert_eq!(report.documents, 1);
    assert_eq!(report.rewritten, 1);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_no_database_leaves_text_alone() {
    let text = "See [@smith2020] for details.";
    assert_eq!(Resolver::default().resolve(text, None).content, text);

    let dir = site(&[]);
    let mut pages = vec![Page::new("index.html", text)];
    let report = add_citations(&settings(dir.path(), None), pages.iter_mut());

    assert_eq!(pages[0].text, text);
    assert_eq!(report.rewritten, 0);
}

#[test]
fn test_occurrences_counted_regardless_of_order() {
    for text in ["[@a] [@b] [@a] [@a]", "[@b] [@a] [@a] [@a]", "[@a] [@a] [@a] [@b]"] {
        let table: OccurrenceTable = scan(text).iter().collect();
        assert_eq!(table.count("a"), 3, "{}", text);
        assert_eq!(table.count("b"), 1, "{}", text);
    }
}

#[test]
fn test_only_cited_entries_listed() {
    let database = bibcite_bibtex::parse(THREE_BIB).unwrap();
    let resolution = Resolver::default().resolve("Only [@a] here.", Some(&database));

    assert_eq!(resolution.entries, 1);
    assert_eq!(resolution.content.matches("<p id=").count(), 1);
    assert!(resolution.content.contains("<p id=\"a\">Ann Able. First. 2001."));
}

#[test]
fn test_back_links_match_citation_count() {
    let database = bibcite_bibtex::parse(THREE_BIB).unwrap();
    let resolution = Resolver::default().resolve("[@b], [@b], [@b] and [@b].", Some(&database));
    let content = &resolution.content;

    assert_eq!(content.matches("title=\"Jump back to reference").count(), 4);
    for i in 1..=4 {
        assert!(content.contains(&format!("id=\"ref-b-{}\">[1]</a>", i)), "{}", content);
        assert!(
            content.contains(&format!(
                "<a href=\"#ref-b-{i}\" title=\"Jump back to reference {i}\">"
            )),
            "{}",
            content
        );
    }
}

#[test]
fn test_missing_key_is_reported_per_document() {
    let dir = site(&[("refs.bib", THREE_BIB)]);
    let mut pages = vec![
        Page::new("one.html", "[@missing]"),
        Page::new("two.html", "[@a]"),
    ];

    let report = add_citations(&settings(dir.path(), Some("refs.bib")), pages.iter_mut());

    assert_eq!(pages[0].text, "[@missing]");
    assert!(!pages[0].text.contains("<h3>"));
    assert_eq!(report.rewritten, 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].document, "one.html");
    assert_eq!(
        report.warnings[0].warning,
        CitationWarning::MissingKey {
            key: "missing".to_string()
        }
    );
}

#[test]
fn test_second_run_changes_nothing() {
    let dir = site(&[("refs.bib", THREE_BIB)]);
    let settings = settings(dir.path(), Some("refs.bib"));
    let mut pages = vec![Page::new("page.html", "[@a] then [@c] then [@a] and [@zzz].")];

    add_citations(&settings, pages.iter_mut());
    let first = pages[0].text.clone();
    let report = add_citations(&settings, pages.iter_mut());

    assert_eq!(pages[0].text, first);
    assert_eq!(report.rewritten, 0);
    assert_eq!(pages[0].text.matches("<h3>Bibliography</h3>").count(), 1);
}

#[test]
fn test_local_bibliography_shadows_default() {
    let dir = site(&[
        ("refs/global.bib", GLOBAL_BIB),
        ("posts/local.bib", THREE_BIB),
    ]);
    let mut pages = vec![
        Page::new("post.html", "[@a] and [@smith2020]")
            .with_meta("publications_src", "posts/local.bib"),
    ];

    let report = add_citations(&settings(dir.path(), Some("refs/global.bib")), pages.iter_mut());

    assert!(pages[0].text.contains("<p id=\"a\">"));
    assert!(pages[0].text.contains("[@smith2020]"));
    assert_eq!(
        report.warnings[0].warning,
        CitationWarning::MissingKey {
            key: "smith2020".to_string()
        }
    );
}

#[test]
fn test_broken_local_bibliography_falls_back_to_default() {
    let dir = site(&[
        ("refs/global.bib", GLOBAL_BIB),
        ("broken.bib", "@misc{oops, title = {never closed"),
    ]);
    let mut pages = vec![
        Page::new("post.html", "See [@smith2020].").with_meta("publications-src", "broken.bib"),
    ];

    let report = add_citations(&settings(dir.path(), Some("refs/global.bib")), pages.iter_mut());

    assert!(pages[0].text.contains("<p id=\"smith2020\">"));
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        report.warnings[0].warning,
        CitationWarning::LocalBibliography { .. }
    ));
}

#[test]
fn test_broken_default_bibliography_does_not_fail() {
    let dir = site(&[("refs.bib", "@misc{a, title = {x}}\n@misc{a, title = {y}}")]);
    let mut pages = vec![Page::new("page.html", "[@a]")];

    let report = add_citations(&settings(dir.path(), Some("refs.bib")), pages.iter_mut());

    assert_eq!(pages[0].text, "[@a]");
    assert_eq!(report.documents, 1);
    assert_eq!(report.rewritten, 0);
}
