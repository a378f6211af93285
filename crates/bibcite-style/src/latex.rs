/*
 * latex.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Conversion of BibTeX field values to display text.
 */

//! TeX markup in field values.
//!
//! Field values keep their TeX: protective braces, escaped specials, accent
//! commands and ligature dashes. [`to_plain`] turns them into Unicode display
//! text; [`sentence_case`] lowers a title while leaving braced words alone.

use std::iter::Peekable;
use std::str::Chars;

/// Convert a TeX-flavoured field value to display text.
pub fn to_plain(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' | '}' => {}
            '\\' => command(&mut chars, &mut out),
            '~' => out.push('\u{a0}'),
            '-' => {
                let mut run = 1;
                while chars.peek() == Some(&'-') {
                    chars.next();
                    run += 1;
                }
                match run {
                    1 => out.push('-'),
                    2 => out.push('\u{2013}'),
                    _ => out.push('\u{2014}'),
                }
            }
            '`' if chars.peek() == Some(&'`') => {
                chars.next();
                out.push('\u{201c}');
            }
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push('\u{201d}');
            }
            c => out.push(c),
        }
    }

    out
}

/// Lower-case a title except for its first letter and anything in braces.
pub fn sentence_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    let mut seen_letter = false;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                depth += 1;
                seen_letter = true;
                out.push(c);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                out.push(c);
            }
            '\\' => {
                out.push(c);
                while let Some(&next) = chars.peek() {
                    if !next.is_alphabetic() {
                        break;
                    }
                    out.push(next);
                    chars.next();
                }
            }
            c if depth == 0 && c.is_alphabetic() => {
                if seen_letter {
                    out.extend(c.to_lowercase());
                } else {
                    out.extend(c.to_uppercase());
                    seen_letter = true;
                }
            }
            c => out.push(c),
        }
    }

    out
}

fn command(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    let Some(&first) = chars.peek() else {
        out.push('\\');
        return;
    };

    if first.is_ascii_alphabetic() {
        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            name.push(c);
            chars.next();
        }
        if let Some(mark) = letter_accent(&name) {
            push_accented(chars, out, mark);
            return;
        }
        // A control word swallows the space that follows it.
        if chars.peek() == Some(&' ') {
            chars.next();
        }
        if let Some(symbol) = named_symbol(&name) {
            out.push_str(symbol);
        }
        return;
    }

    chars.next();
    match first {
        '&' | '%' | '$' | '#' | '_' | '{' | '}' => out.push(first),
        '\\' | ' ' => out.push(' '),
        c => match symbol_accent(c) {
            Some(mark) => push_accented(chars, out, mark),
            None => out.push(c),
        },
    }
}

fn push_accented(chars: &mut Peekable<Chars<'_>>, out: &mut String, mark: char) {
    while chars.peek() == Some(&' ') {
        chars.next();
    }
    let braced = chars.peek() == Some(&'{');
    if braced {
        chars.next();
    }
    let base = match chars.next() {
        Some('\\') => chars.next(),
        other => other,
    };
    if braced && chars.peek() == Some(&'}') {
        chars.next();
    }
    if let Some(base) = base {
        out.push(base);
    }
    out.push(mark);
}

fn symbol_accent(c: char) -> Option<char> {
    match c {
        '\'' => Some('\u{301}'),
        '`' => Some('\u{300}'),
        '^' => Some('\u{302}'),
        '"' => Some('\u{308}'),
        '~' => Some('\u{303}'),
        '=' => Some('\u{304}'),
        '.' => Some('\u{307}'),
        _ => None,
    }
}

fn letter_accent(name: &str) -> Option<char> {
    match name {
        "c" => Some('\u{327}'),
        "v" => Some('\u{30c}'),
        "u" => Some('\u{306}'),
        "H" => Some('\u{30b}'),
        _ => None,
    }
}

fn named_symbol(name: &str) -> Option<&'static str> {
    match name {
        "ss" => Some("ß"),
        "o" => Some("ø"),
        "O" => Some("Ø"),
        "ae" => Some("æ"),
        "AE" => Some("Æ"),
        "oe" => Some("œ"),
        "OE" => Some("Œ"),
        "aa" => Some("å"),
        "AA" => Some("Å"),
        "l" => Some("ł"),
        "L" => Some("Ł"),
        "i" => Some("ı"),
        "TeX" => Some("TeX"),
        "LaTeX" => Some("LaTeX"),
        "BibTeX" => Some("BibTeX"),
        "ldots" | "dots" => Some("\u{2026}"),
        _ => None,
    }
}
