/*
 * plugin.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Entry point invoked by the host once all documents are rendered.
 */

//! Citation processing for a whole build.
//!
//! [`Citations`] owns the default bibliography, loaded once from the
//! settings, and the resolver. Hosts either call [`add_citations`] with all
//! of their documents or hold a [`Citations`] and call
//! [`Citations::process`] themselves.

use std::path::PathBuf;

use bibcite_bibtex::Bibliography;
use tracing::{debug, info, info_span, warn};

use crate::config::CiteSettings;
use crate::content::ContentItem;
use crate::error::{CitationWarning, CiteError};
use crate::resolve::Resolver;
use crate::source::{BibliographySource, load_bibliography, reader_available};

/// A warning together with the document it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentWarning {
    pub document: String,
    pub warning: CitationWarning,
}

/// Summary of one [`add_citations`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationReport {
    /// Documents looked at.
    pub documents: usize,
    /// Documents whose text changed.
    pub rewritten: usize,
    /// Recoverable problems, in document order.
    pub warnings: Vec<DocumentWarning>,
    /// Processing was skipped because BibTeX support is not compiled in.
    pub disabled: bool,
}

/// Citation state shared by every document of a build.
#[derive(Debug)]
pub struct Citations {
    default: Option<Bibliography>,
    root: PathBuf,
    resolver: Resolver,
}

impl Citations {
    /// Build from settings, loading the default bibliography if configured.
    ///
    /// A default bibliography that fails to load is logged and left unset;
    /// documents can still declare their own.
    pub fn from_settings(settings: &CiteSettings) -> Self {
        let default = settings.default_bibliography().and_then(|path| {
            match load_bibliography(&path) {
                Ok(database) => {
                    debug!(
                        path = %path.display(),
                        entries = database.len(),
                        "Loaded default bibliography"
                    );
                    Some(database)
                }
                Err(err) => {
                    warn!("Could not load default bibliography: {}", err);
                    None
                }
            }
        });

        Self {
            default,
            root: settings.root.clone(),
            resolver: Resolver::default().with_heading(settings.bibliography_heading.clone()),
        }
    }

    /// Replace the default bibliography.
    pub fn with_default(mut self, database: Bibliography) -> Self {
        self.default = Some(database);
        self
    }

    pub fn default_database(&self) -> Option<&Bibliography> {
        self.default.as_ref()
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolve the citations of one document in place.
    pub fn process(&self, item: &mut dyn ContentItem) -> Vec<CitationWarning> {
        self.process_item(item).1
    }

    fn process_item(&self, item: &mut dyn ContentItem) -> (bool, Vec<CitationWarning>) {
        let span = info_span!("citations", document = %item.source_name());
        let _enter = span.enter();

        let mut warnings = Vec::new();
        let source = BibliographySource::new(self.default.as_ref(), &self.root);
        let Some(database) = source.select(&*item, &mut warnings) else {
            return (false, warnings);
        };

        let resolution = self.resolver.resolve(item.content(), Some(&*database));
        warnings.extend(resolution.warnings);

        let rewritten = resolution.content != item.content();
        if rewritten {
            item.set_content(resolution.content);
        }
        (rewritten, warnings)
    }
}

/// Resolve citations in every document of a build.
///
/// Documents are processed in order. Nothing here fails the build: every
/// problem is logged and collected in the returned report.
pub fn add_citations<'a, T, I>(settings: &CiteSettings, items: I) -> CitationReport
where
    T: ContentItem + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    if !reader_available() {
        warn!(
            "{}; citations will not be processed",
            CiteError::MissingDependency {
                dependency: "bibtex"
            }
        );
        return CitationReport {
            disabled: true,
            ..CitationReport::default()
        };
    }

    let citations = Citations::from_settings(settings);
    let mut report = CitationReport::default();

    for item in items {
        let (rewritten, warnings) = citations.process_item(&mut *item);
        report.documents += 1;
        if rewritten {
            report.rewritten += 1;
        }
        report
            .warnings
            .extend(warnings.into_iter().map(|warning| DocumentWarning {
                document: item.source_name().to_string(),
                warning,
            }));
    }

    info!(
        documents = report.documents,
        rewritten = report.rewritten,
        warnings = report.warnings.len(),
        "Processed citations"
    );
    report
}


#[cfg(all(test, not(feature = "bibtex")))]
mod without_reader_tests {
    use super::*;

    struct Page {
        text: String,
    }

    impl ContentItem for Page {
        fn source_name(&self) -> &str {
            "page.md"
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
    fn test_add_citations_is_disabled() {
        let settings = CiteSettings::default().with_publications_src("refs.bib");
        let mut pages = vec![Page {
            text: "See [@a].".to_string(),
        }];

        let report = add_citations(&settings, pages.iter_mut());

        assert!(report.disabled);
        assert_eq!(report.documents, 0);
        assert!(report.warnings.is_empty());
        assert_eq!(pages[0].text, "See [@a].");
    }

    #[test]
    fn test_load_bibliography_reports_missing_dependency() {
        let err = load_bibliography(std::path::Path::new("refs.bib")).unwrap_err();
        assert!(matches!(
            err,
            CiteError::MissingDependency {
                dependency: "bibtex"
            }
        ));
    }
}
