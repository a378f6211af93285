/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Site driver for `bibcite`.
//!
//! Finds the documents of a site, reads their front matter, runs citation
//! resolution over all of them and writes the results to the output
//! directory.

pub mod commands;
pub mod document;
pub mod site;

pub use document::Document;
pub use site::SiteConfig;
