/*
 * text.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Backend-independent rich text produced by formatting styles.
 */

//! Rich text for formatted entries.
//!
//! Styles build a [`Text`] tree; a [`Backend`](crate::Backend) turns it into
//! markup. Constructors drop empty children so that optional parts of a
//! template vanish without leaving stray delimiters behind.

/// Inline markup applied to a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Emph,
    Strong,
}

/// A tree of formatted text.
#[derive(Debug, Clone, PartialEq)]
pub enum Text {
    /// Literal text, not yet escaped.
    Literal(String),
    /// Children with markup applied.
    Styled { markup: Markup, children: Vec<Text> },
    /// A hyperlink wrapping children.
    Linked { url: String, children: Vec<Text> },
    /// Children rendered one after another.
    Sequence(Vec<Text>),
    /// Nothing.
    Null,
}

impl Text {
    /// Create a literal text node. Empty strings become [`Text::Null`].
    pub fn literal(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            Text::Null
        } else {
            Text::Literal(s)
        }
    }

    /// Create a styled node.
    pub fn styled(markup: Markup, children: Vec<Text>) -> Self {
        let children = non_null(children);
        if children.is_empty() {
            Text::Null
        } else {
            Text::Styled { markup, children }
        }
    }

    /// Emphasised text.
    pub fn emph(child: Text) -> Self {
        Self::styled(Markup::Emph, vec![child])
    }

    /// Create a link node.
    pub fn linked(url: impl Into<String>, children: Vec<Text>) -> Self {
        let children = non_null(children);
        if children.is_empty() {
            Text::Null
        } else {
            Text::Linked {
                url: url.into(),
                children,
            }
        }
    }

    /// Create a sequence, unwrapping single children.
    pub fn sequence(children: Vec<Text>) -> Self {
        let mut children = non_null(children);
        match children.len() {
            0 => Text::Null,
            1 => children.remove(0),
            _ => Text::Sequence(children),
        }
    }

    /// Join children with a delimiter, skipping empty ones.
    pub fn join(children: Vec<Text>, delimiter: &str) -> Self {
        let mut parts = Vec::new();
        for child in non_null(children) {
            if !parts.is_empty() && !delimiter.is_empty() {
                parts.push(Text::Literal(delimiter.to_string()));
            }
            parts.push(child);
        }
        Self::sequence(parts)
    }

    /// Join parts with ", " and terminate with a period.
    pub fn sentence(parts: Vec<Text>) -> Self {
        Self::join(parts, ", ").add_period()
    }

    /// Append a period unless the text already ends with terminal punctuation.
    pub fn add_period(self) -> Self {
        let plain = self.to_plain();
        match plain.trim_end().chars().last() {
            None => Text::Null,
            Some('.' | '?' | '!') => self,
            Some(_) => Text::sequence(vec![self, Text::Literal(".".to_string())]),
        }
    }

    /// True when the node renders to nothing.
    pub fn is_null(&self) -> bool {
        match self {
            Text::Null => true,
            Text::Literal(s) => s.is_empty(),
            Text::Styled { children, .. }
            | Text::Linked { children, .. }
            | Text::Sequence(children) => children.iter().all(Text::is_null),
        }
    }

    /// Render without any markup.
    pub fn to_plain(&self) -> String {
        match self {
            Text::Null => String::new(),
            Text::Literal(s) => s.clone(),
            Text::Styled { children, .. }
            | Text::Linked { children, .. }
            | Text::Sequence(children) => children.iter().map(Text::to_plain).collect(),
        }
    }
}

fn non_null(children: Vec<Text>) -> Vec<Text> {
    children.into_iter().filter(|c| !c.is_null()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_empty_is_null() {
        assert!(Text::literal("").is_null());
        assert!(!Text::literal("x").is_null());
    }

    #[test]
    fn test_join_skips_null() {
        let text = Text::join(
            vec![Text::literal("A"), Text::Null, Text::literal("B")],
            ", ",
        );
        assert_eq!(text.to_plain(), "A, B");
    }

    #[test]
    fn test_sequence_single_unwraps() {
        let text = Text::sequence(vec![Text::Null, Text::literal("only")]);
        assert_eq!(text, Text::Literal("only".to_string()));
    }

    #[test]
    fn test_sentence_adds_period() {
        let text = Text::sentence(vec![Text::literal("Publisher"), Text::literal("2020")]);
        assert_eq!(text.to_plain(), "Publisher, 2020.");
    }

    #[test]
    fn test_sentence_keeps_existing_punctuation() {
        let text = Text::sentence(vec![Text::literal("Is this a title?")]);
        assert_eq!(text.to_plain(), "Is this a title?");
    }

    #[test]
    fn test_empty_sentence_is_null() {
        assert!(Text::sentence(vec![Text::Null, Text::literal("")]).is_null());
    }

    #[test]
    fn test_styled_all_null_is_null() {
        assert!(Text::emph(Text::Null).is_null());
        assert!(Text::linked("https://example.com", vec![]).is_null());
    }
}
