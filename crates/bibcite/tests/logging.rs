/*
 * logging.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Log output seen by a host running at the default `bibcite=info` level.
 */

#![cfg(feature = "bibtex")]

use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

use bibcite::{CiteSettings, ContentItem, add_citations};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Collects everything the fmt layer writes.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct Page {
    name: String,
    text: String,
}

impl ContentItem for Page {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn metadata(&self, _key: &str) -> Option<&str> {
        None
    }

    fn content(&self) -> &str {
        &self.text
    }

    fn set_content(&mut self, content: String) {
        self.text = content;
    }
}

#[test]
fn test_missing_key_warning_names_document_at_info_level() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("refs.bib"), "@misc{known, title = {Known}}").unwrap();
    let settings = CiteSettings::default()
        .with_root(dir.path())
        .with_publications_src("refs.bib");

    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("bibcite=info"))
        .with_writer(captured.clone())
        .with_ansi(false)
        .finish();

    let mut pages = vec![Page {
        name: "posts/unique-doc-name.html".to_string(),
        text: "See [@missing].".to_string(),
    }];
    tracing::subscriber::with_default(subscriber, || {
        add_citations(&settings, pages.iter_mut());
    });

    let logs = captured.text();
    let line = logs
        .lines()
        .find(|line| line.contains("WARN") && line.contains("missing"))
        .unwrap_or_else(|| panic!("no missing-key warning in:\n{}", logs));
    assert!(line.contains("posts/unique-doc-name.html"), "{}", line);
    assert_eq!(pages[0].text, "See [@missing].");
}
