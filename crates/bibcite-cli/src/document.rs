/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Site documents with optional YAML front matter.
 */

//! Site documents.
//!
//! A document is a text file that may open with a YAML front matter block:
//!
//! ```text
//! ---
//! title: Notes
//! publications_src: notes.bib
//! ---
//! Body text citing [@key].
//! ```
//!
//! Scalar front matter values become the document's metadata. The block
//! itself is written back out unchanged; only the body is rewritten.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bibcite::ContentItem;
use serde_yaml::Value;
use tracing::warn;

const DELIMITER: &str = "---";

/// A document read from the site.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Path relative to the site root.
    pub path: PathBuf,
    name: String,
    front_matter: Option<String>,
    metadata: HashMap<String, String>,
    body: String,
}

impl Document {
    /// Split `text` into front matter and body.
    ///
    /// Front matter that is not a YAML mapping is kept in the output but
    /// contributes no metadata.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        let path = path.into();
        let name = path.to_string_lossy().replace('\\', "/");

        let (front_matter, yaml, body) = match split_front_matter(text) {
            Some((block, yaml, body)) => (Some(block.to_string()), Some(yaml), body),
            None => (None, None, text),
        };

        let metadata = match yaml {
            Some(yaml) => scalar_metadata(yaml).unwrap_or_else(|err| {
                warn!(document = %name, "Ignoring unreadable front matter: {}", err);
                HashMap::new()
            }),
            None => HashMap::new(),
        };

        Self {
            path,
            name,
            front_matter,
            metadata,
            body: body.to_string(),
        }
    }

    /// Read the document at `root/relative`.
    pub fn read(root: &Path, relative: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(root.join(relative))?;
        Ok(Self::parse(relative, &text))
    }

    /// Front matter block, delimiters included.
    pub fn front_matter(&self) -> Option<&str> {
        self.front_matter.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Full text to write out.
    pub fn to_output(&self) -> String {
        match &self.front_matter {
            Some(block) => format!("{}{}", block, self.body),
            None => self.body.clone(),
        }
    }
}

impl ContentItem for Document {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    fn content(&self) -> &str {
        &self.body
    }

    fn set_content(&mut self, content: String) {
        self.body = content;
    }
}

/// Returns `(block, yaml, body)` when `text` opens with front matter.
fn split_front_matter(text: &str) -> Option<(&str, &str, &str)> {
    let first_end = text.find('\n')?;
    if text[..first_end].trim_end() != DELIMITER {
        return None;
    }

    let yaml_start = first_end + 1;
    let mut line_start = yaml_start;
    while line_start <= text.len() {
        let line_end = text[line_start..]
            .find('\n')
            .map_or(text.len(), |i| line_start + i);
        if text[line_start..line_end].trim_end() == DELIMITER {
            let block_end = (line_end + 1).min(text.len());
            return Some((
                &text[..block_end],
                &text[yaml_start..line_start],
                &text[block_end..],
            ));
        }
        if line_end == text.len() {
            break;
        }
        line_start = line_end + 1;
    }
    None
}

fn scalar_metadata(yaml: &str) -> Result<HashMap<String, String>, serde_yaml::Error> {
    let value: Value = serde_yaml::from_str(yaml)?;
    let Value::Mapping(mapping) = value else {
        return Ok(HashMap::new());
    };

    Ok(mapping
        .into_iter()
        .filter_map(|(key, value)| {
            let key = key.as_str()?.to_string();
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key, value))
        })
        .collect())
}
