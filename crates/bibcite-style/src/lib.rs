/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Bibliography formatting for bibcite.
//!
//! Formatting happens in two steps:
//!
//! ```text
//! &[&Entry] ──BibliographyStyle──▶ Vec<FormattedEntry { key, label, text: Text }>
//!                                                             │
//!                                                   Backend ──┘──▶ markup
//! ```
//!
//! A style decides labels, ordering and the layout of each entry as a
//! backend-independent [`Text`] tree. A backend renders that tree.
//!
//! This crate ships [`PlainStyle`] and [`HtmlBackend`].

pub mod backend;
pub mod latex;
pub mod plain;
pub mod style;
pub mod text;

pub use backend::{Backend, HtmlBackend, escape_html};
pub use plain::PlainStyle;
pub use style::{BibliographyStyle, FormattedEntry};
pub use text::{Markup, Text};
