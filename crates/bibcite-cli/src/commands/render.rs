/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render command implementation
 */

//! Render command implementation.
//!
//! `bibcite render [SITE]` reads every document of a site, resolves its
//! citations and writes the result under the output directory, mirroring
//! the site layout.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bibcite::{CitationReport, add_citations};
use tracing::{debug, info, warn};

use crate::document::Document;
use crate::site::{SiteConfig, discover_documents};

/// Arguments for the render command
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Site root directory
    pub site: PathBuf,
    /// Output directory, overriding `output-dir` from the config
    pub output_dir: Option<PathBuf>,
    /// Suppress the summary line
    pub quiet: bool,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    let report = render_site(&args)?;

    if report.disabled {
        warn!("Documents were copied without resolving citations");
    }
    if !args.quiet {
        info!(
            "Resolved citations in {} of {} documents ({} warnings)",
            report.rewritten,
            report.documents,
            report.warnings.len()
        );
    }
    Ok(())
}

/// Resolve citations across the site and write every document out.
pub fn render_site(args: &RenderArgs) -> Result<CitationReport> {
    let site = &args.site;
    if !site.is_dir() {
        anyhow::bail!("Site directory does not exist: {}", site.display());
    }

    let mut config = SiteConfig::load(site)?;
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    let output_root = config.output_path();

    let paths = discover_documents(site, &output_root)?;
    let mut documents = paths
        .iter()
        .map(|relative| {
            Document::read(site, relative)
                .with_context(|| format!("Failed to read {}", site.join(relative).display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let report = add_citations(&config.cite, documents.iter_mut());

    for document in &documents {
        let output = output_root.join(&document.path);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
        fs::write(&output, document.to_output())
            .with_context(|| format!("Failed to write {}", output.display()))?;
        debug!("Wrote {}", output.display());
    }

    Ok(report)
}
