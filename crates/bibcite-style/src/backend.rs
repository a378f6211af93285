/*
 * backend.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Markup backends for rich text.
 */

//! Markup backends.

use crate::text::{Markup, Text};

/// Turns [`Text`] into output markup.
pub trait Backend: Send + Sync {
    /// Backend name, used in logs.
    fn name(&self) -> &str;

    /// Render rich text.
    fn render(&self, text: &Text) -> String;
}

/// Renders rich text as an HTML fragment.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBackend;

impl HtmlBackend {
    pub fn new() -> Self {
        Self
    }

    fn render_into(&self, text: &Text, out: &mut String) {
        match text {
            Text::Null => {}
            Text::Literal(s) => out.push_str(&escape_html(s)),
            Text::Styled { markup, children } => {
                let tag = match markup {
                    Markup::Emph => "em",
                    Markup::Strong => "strong",
                };
                out.push('<');
                out.push_str(tag);
                out.push('>');
                for child in children {
                    self.render_into(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            Text::Linked { url, children } => {
                out.push_str("<a href=\"");
                out.push_str(&escape_html(url));
                out.push_str("\">");
                for child in children {
                    self.render_into(child, out);
                }
                out.push_str("</a>");
            }
            Text::Sequence(children) => {
                for child in children {
                    self.render_into(child, out);
                }
            }
        }
    }
}

impl Backend for HtmlBackend {
    fn name(&self) -> &str {
        "html"
    }

    fn render(&self, text: &Text) -> String {
        let mut out = String::new();
        self.render_into(text, &mut out);
        out
    }
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_literal_is_escaped() {
        let html = HtmlBackend.render(&Text::literal("Smith & <Sons>"));
        assert_eq!(html, "Smith &amp; &lt;Sons&gt;");
    }

    #[test]
    fn test_render_emph() {
        let text = Text::sequence(vec![
            Text::emph(Text::literal("Journal")),
            Text::literal(", 2020."),
        ]);
        assert_eq!(HtmlBackend.render(&text), "<em>Journal</em>, 2020.");
    }

    #[test]
    fn test_render_link() {
        let text = Text::linked(
            "https://example.com/?a=1&b=2",
            vec![Text::literal("example")],
        );
        assert_eq!(
            HtmlBackend.render(&text),
            "<a href=\"https://example.com/?a=1&amp;b=2\">example</a>"
        );
    }

    #[test]
    fn test_render_null_is_empty() {
        assert_eq!(HtmlBackend.render(&Text::Null), "");
    }
}
