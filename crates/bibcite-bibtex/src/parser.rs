/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Recursive-descent reader for BibTeX databases.
 */

//! BibTeX reader.
//!
//! Supported syntax:
//!
//! - Entries: `@type{key, field = value, ...}` or `@type(key, ...)`
//! - Values: `{braced}`, `"quoted"`, bare numbers, macro names, joined with `#`
//! - `@string{name = value}` macro definitions (month abbreviations are predefined)
//! - `@preamble{...}` blocks
//! - `@comment` blocks and any text outside entries, which is ignored
//!
//! Whitespace runs inside field values are collapsed to a single space.

use std::collections::HashMap;

use crate::database::{Bibliography, Entry};
use crate::error::{Error, Result};

const MONTHS: &[(&str, &str)] = &[
    ("jan", "January"),
    ("feb", "February"),
    ("mar", "March"),
    ("apr", "April"),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "August"),
    ("sep", "September"),
    ("oct", "October"),
    ("nov", "November"),
    ("dec", "December"),
];

/// Parse BibTeX source text into a [`Bibliography`].
pub fn parse(source: &str) -> Result<Bibliography> {
    Parser::new(source).parse()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    macros: HashMap<String, String>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        let macros = MONTHS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            src,
            pos: 0,
            line: 1,
            macros,
        }
    }

    fn parse(mut self) -> Result<Bibliography> {
        let mut bib = Bibliography::new();

        while self.skip_to_at() {
            let start_line = self.line;
            self.bump(); // '@'
            self.skip_ws();
            let kind = self.identifier()?.to_lowercase();
            self.skip_ws();

            if kind == "comment" {
                self.skip_comment()?;
                continue;
            }

            let close = self.open_delimiter()?;
            match kind.as_str() {
                "string" => self.string_definition(close)?,
                "preamble" => {
                    self.skip_ws();
                    let text = self.value()?;
                    self.skip_ws();
                    self.expect(close)?;
                    bib.push_preamble(text);
                }
                _ => {
                    let entry = self.entry_body(kind, close)?;
                    if let Err(entry) = bib.insert(entry) {
                        return Err(Error::DuplicateKey {
                            key: entry.key,
                            line: start_line,
                        });
                    }
                }
            }
        }

        Ok(bib)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Advance to the next `@`, returning false at end of input.
    fn skip_to_at(&mut self) -> bool {
        while let Some(c) = self.peek() {
            if c == '@' {
                return true;
            }
            self.bump();
        }
        false
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(Error::syntax(
                self.line,
                format!("expected '{}', found '{}'", expected, c),
            )),
            None => Err(Error::syntax(
                self.line,
                format!("expected '{}', found end of input", expected),
            )),
        }
    }

    /// Consume `{` or `(` and return the matching closing delimiter.
    fn open_delimiter(&mut self) -> Result<char> {
        match self.bump() {
            Some('{') => Ok('}'),
            Some('(') => Ok(')'),
            Some(c) => Err(Error::syntax(
                self.line,
                format!("expected '{{' or '(' after entry type, found '{}'", c),
            )),
            None => Err(Error::syntax(self.line, "unexpected end of input")),
        }
    }

    fn identifier(&mut self) -> Result<&'a str> {
        let start = self.pos;
        while self.peek().is_some_and(is_identifier_char) {
            self.bump();
        }
        if self.pos == start {
            return Err(Error::syntax(self.line, "expected an identifier"));
        }
        let src = self.src;
        Ok(&src[start..self.pos])
    }

    fn skip_comment(&mut self) -> Result<()> {
        match self.peek() {
            Some('{') => {
                self.bump();
                self.braced_text().map(|_| ())
            }
            Some('(') => {
                while let Some(c) = self.bump() {
                    if c == ')' {
                        return Ok(());
                    }
                }
                Err(Error::syntax(self.line, "unterminated @comment"))
            }
            _ => Ok(()),
        }
    }

    fn string_definition(&mut self, close: char) -> Result<()> {
        self.skip_ws();
        let name = self.identifier()?.to_lowercase();
        self.skip_ws();
        self.expect('=')?;
        self.skip_ws();
        let value = self.value()?;
        self.skip_ws();
        self.expect(close)?;
        self.macros.insert(name, value);
        Ok(())
    }

    fn entry_body(&mut self, kind: String, close: char) -> Result<Entry> {
        self.skip_ws();
        let src = self.src;
        let key_start = self.pos;
        while let Some(c) = self.peek() {
            if c == ',' || c == close {
                break;
            }
            self.bump();
        }
        let key = src[key_start..self.pos].trim();
        if key.is_empty() {
            return Err(Error::syntax(self.line, "entry has no citation key"));
        }
        let mut entry = Entry::new(key, kind);

        loop {
            self.skip_ws();
            match self.bump() {
                Some(c) if c == close => return Ok(entry),
                Some(',') => {}
                Some(c) => {
                    return Err(Error::syntax(
                        self.line,
                        format!("expected ',' or '{}' in entry '{}', found '{}'", close, key, c),
                    ));
                }
                None => {
                    return Err(Error::syntax(
                        self.line,
                        format!("unterminated entry '{}'", key),
                    ));
                }
            }

            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(entry);
            }

            let name = self.identifier()?;
            self.skip_ws();
            self.expect('=')?;
            self.skip_ws();
            let value = self.value()?;
            entry.set_field(name, value);
        }
    }

    /// Parse a value: pieces joined with `#`.
    fn value(&mut self) -> Result<String> {
        let mut out = self.value_piece()?;
        loop {
            self.skip_ws();
            if self.peek() != Some('#') {
                break;
            }
            self.bump();
            self.skip_ws();
            out.push_str(&self.value_piece()?);
        }
        Ok(collapse_whitespace(&out))
    }

    fn value_piece(&mut self) -> Result<String> {
        match self.peek() {
            Some('{') => {
                self.bump();
                self.braced_text()
            }
            Some('"') => {
                self.bump();
                self.quoted_text()
            }
            Some(c) if c.is_ascii_digit() => {
                let start = self.pos;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.bump();
                }
                Ok(self.src[start..self.pos].to_string())
            }
            Some(c) if is_identifier_char(c) => {
                let line = self.line;
                let name = self.identifier()?.to_lowercase();
                self.macros
                    .get(&name)
                    .cloned()
                    .ok_or(Error::UndefinedMacro { name, line })
            }
            Some(c) => Err(Error::syntax(
                self.line,
                format!("unexpected '{}' at start of field value", c),
            )),
            None => Err(Error::syntax(self.line, "expected a field value")),
        }
    }

    /// Text after an opening brace up to its matching close. Inner braces
    /// are kept.
    fn braced_text(&mut self) -> Result<String> {
        let start_line = self.line;
        let start = self.pos;
        let mut depth = 1usize;
        while let Some(c) = self.bump() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(self.src[start..self.pos - 1].to_string());
                    }
                }
                _ => {}
            }
        }
        Err(Error::syntax(start_line, "unbalanced braces"))
    }

    /// Text after an opening quote up to the closing quote at brace depth 0.
    fn quoted_text(&mut self) -> Result<String> {
        let start_line = self.line;
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(c) = self.bump() {
            match c {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                '"' if depth == 0 => {
                    return Ok(self.src[start..self.pos - 1].to_string());
                }
                _ => {}
            }
        }
        Err(Error::syntax(start_line, "unterminated quoted value"))
    }
}

fn is_identifier_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '{' | '}' | '(' | ')' | ',' | '=' | '"' | '#' | '@' | '%')
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
