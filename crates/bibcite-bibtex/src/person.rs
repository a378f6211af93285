/*
 * person.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * BibTeX name parsing.
 */

//! BibTeX name parsing.
//!
//! Name lists are separated by the word `and` at brace depth zero. Each name
//! is read in one of the three BibTeX forms:
//!
//! - `First von Last`
//! - `von Last, First`
//! - `von Last, Jr, First`
//!
//! A word belongs to the "von" part when its first letter is lower case.
//! Braced words are treated as a unit and never count as lower case.

/// A parsed personal name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub first: Vec<String>,
    pub von: Vec<String>,
    pub last: Vec<String>,
    pub jr: Vec<String>,
}

impl Person {
    /// Parse an `author`/`editor` value into its names.
    pub fn parse_list(value: &str) -> Vec<Person> {
        let mut people = Vec::new();
        let mut current: Vec<String> = Vec::new();
        for word in split_top_level(value, char::is_whitespace) {
            if word.eq_ignore_ascii_case("and") {
                if !current.is_empty() {
                    people.push(Person::parse(&current.join(" ")));
                    current.clear();
                }
            } else {
                current.push(word);
            }
        }
        if !current.is_empty() {
            people.push(Person::parse(&current.join(" ")));
        }
        people
    }

    /// Parse a single name.
    pub fn parse(name: &str) -> Person {
        let parts: Vec<Vec<String>> = split_top_level(name, |c| c == ',')
            .iter()
            .map(|part| split_top_level(part, char::is_whitespace))
            .collect();

        match parts.as_slice() {
            [] => Person::default(),
            [words] => Self::from_first_von_last(words),
            [von_last, rest @ ..] => {
                let (von, last) = split_von_last(von_last);
                let (jr, first) = match rest {
                    [first] => (Vec::new(), first.clone()),
                    [jr, first @ ..] => (jr.clone(), first.concat()),
                    [] => (Vec::new(), Vec::new()),
                };
                Person {
                    first,
                    von,
                    last,
                    jr,
                }
            }
        }
    }

    fn from_first_von_last(words: &[String]) -> Person {
        let Some((last_word, init)) = words.split_last() else {
            return Person::default();
        };
        match init.iter().position(|w| is_lowercase_word(w)) {
            Some(von_start) => {
                let von_end = init
                    .iter()
                    .rposition(|w| is_lowercase_word(w))
                    .unwrap_or(von_start);
                let mut last = init[von_end + 1..].to_vec();
                last.push(last_word.clone());
                Person {
                    first: init[..von_start].to_vec(),
                    von: init[von_start..=von_end].to_vec(),
                    last,
                    jr: Vec::new(),
                }
            }
            None => Person {
                first: init.to_vec(),
                von: Vec::new(),
                last: vec![last_word.clone()],
                jr: Vec::new(),
            },
        }
    }

    /// True for the literal `others` placeholder (rendered as "et al.").
    pub fn is_others(&self) -> bool {
        self.first.is_empty()
            && self.von.is_empty()
            && self.jr.is_empty()
            && self.last.len() == 1
            && self.last[0] == "others"
    }
}

/// Split `von Last` words: leading lower-case words are "von", keeping at
/// least one word for the last name.
fn split_von_last(words: &[String]) -> (Vec<String>, Vec<String>) {
    if words.len() < 2 {
        return (Vec::new(), words.to_vec());
    }
    let von_len = words[..words.len() - 1]
        .iter()
        .rposition(|w| is_lowercase_word(w))
        .map(|i| i + 1)
        .unwrap_or(0);
    (words[..von_len].to_vec(), words[von_len..].to_vec())
}

fn is_lowercase_word(word: &str) -> bool {
    word.chars()
        .find(|c| c.is_alphabetic() || *c == '{')
        .is_some_and(|c| c.is_lowercase())
}

/// Split on separator characters that are not inside braces. Empty pieces
/// are dropped and pieces are trimmed.
fn split_top_level(text: &str, is_sep: impl Fn(char) -> bool) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '{' => {
                depth += 1;
                current.push(c);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if depth == 0 && is_sep(c) => {
                let piece = current.trim();
                if !piece.is_empty() {
                    pieces.push(piece.to_string());
                }
                current.clear();
            }
            c => current.push(c),
        }
    }
    let piece = current.trim();
    if !piece.is_empty() {
        pieces.push(piece.to_string());
    }
    pieces
}
