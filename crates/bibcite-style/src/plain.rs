/*
 * plain.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The "plain" bibliography style.
 */

//! The plain style.
//!
//! Modelled on BibTeX's `plain.bst`:
//!
//! - entries are sorted by author (or editor), then year, then title
//! - labels are sequential numbers in that order
//! - each entry is a run of sentences, e.g.
//!   `Jane Smith and John Doe. A study of things. <em>Journal of Stuff</em>, 12(3):45–67, 2020.`
//!
//! Missing fields are skipped rather than reported.

use bibcite_bibtex::{Entry, Person};

use crate::latex::{sentence_case, to_plain};
use crate::style::{BibliographyStyle, FormattedEntry};
use crate::text::Text;

/// Numeric, author/year/title sorted style.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl PlainStyle {
    pub fn new() -> Self {
        Self
    }

    /// Format the body of a single entry.
    pub fn format_entry(&self, entry: &Entry) -> Text {
        match entry.entry_type.as_str() {
            "article" => article(entry),
            "book" | "booklet" => book(entry),
            "inproceedings" | "conference" => inproceedings(entry),
            "incollection" | "inbook" => incollection(entry),
            "phdthesis" => thesis(entry, "PhD thesis", true),
            "mastersthesis" => thesis(entry, "Master's thesis", false),
            "techreport" => techreport(entry),
            "unpublished" => unpublished(entry),
            _ => misc(entry),
        }
    }
}

impl BibliographyStyle for PlainStyle {
    fn name(&self) -> &str {
        "plain"
    }

    fn format_entries(&self, entries: &[&Entry]) -> Vec<FormattedEntry> {
        let mut sorted = entries.to_vec();
        sorted.sort_by_cached_key(|entry| sort_key(entry));

        sorted
            .into_iter()
            .enumerate()
            .map(|(i, entry)| FormattedEntry {
                key: entry.key.clone(),
                label: (i + 1).to_string(),
                text: self.format_entry(entry),
            })
            .collect()
    }
}

// =============================================================================
// Entry templates
// =============================================================================

fn toplevel(sentences: Vec<Text>) -> Text {
    Text::join(sentences, " ")
}

fn article(entry: &Entry) -> Text {
    toplevel(vec![
        Text::sentence(vec![authors(entry)]),
        Text::sentence(vec![title(entry)]),
        Text::sentence(vec![
            Text::emph(field(entry, "journal")),
            volume_and_pages(entry),
            date(entry),
        ]),
        Text::sentence(vec![field(entry, "note")]),
        web_refs(entry),
    ])
}

fn book(entry: &Entry) -> Text {
    let creators = if entry.persons("author").is_empty() {
        editors(entry)
    } else {
        authors(entry)
    };
    toplevel(vec![
        Text::sentence(vec![creators]),
        Text::sentence(vec![Text::emph(field(entry, "title"))]),
        Text::sentence(vec![volume_and_series(entry)]),
        Text::sentence(vec![
            field(entry, "publisher"),
            field(entry, "address"),
            edition(entry),
            date(entry),
        ]),
        Text::sentence(vec![prefixed("ISBN ", field(entry, "isbn"))]),
        Text::sentence(vec![field(entry, "note")]),
        web_refs(entry),
    ])
}

fn inproceedings(entry: &Entry) -> Text {
    toplevel(vec![
        Text::sentence(vec![authors(entry)]),
        Text::sentence(vec![title(entry)]),
        Text::sentence(vec![prefixed(
            "In ",
            Text::join(
                vec![
                    editors(entry),
                    Text::emph(field(entry, "booktitle")),
                    volume_and_series(entry),
                    pages(entry),
                ],
                ", ",
            ),
        )]),
        Text::sentence(vec![
            field(entry, "organization"),
            field(entry, "publisher"),
            field(entry, "address"),
            date(entry),
        ]),
        Text::sentence(vec![field(entry, "note")]),
        web_refs(entry),
    ])
}

fn incollection(entry: &Entry) -> Text {
    toplevel(vec![
        Text::sentence(vec![authors(entry)]),
        Text::sentence(vec![title(entry)]),
        Text::sentence(vec![prefixed(
            "In ",
            Text::join(
                vec![
                    editors(entry),
                    Text::emph(field(entry, "booktitle")),
                    volume_and_series(entry),
                    prefixed("chapter ", field(entry, "chapter")),
                    pages(entry),
                ],
                ", ",
            ),
        )]),
        Text::sentence(vec![
            field(entry, "publisher"),
            field(entry, "address"),
            edition(entry),
            date(entry),
        ]),
        Text::sentence(vec![field(entry, "note")]),
        web_refs(entry),
    ])
}

fn thesis(entry: &Entry, kind: &str, emph_title: bool) -> Text {
    let title = if emph_title {
        Text::emph(field(entry, "title"))
    } else {
        title(entry)
    };
    toplevel(vec![
        Text::sentence(vec![authors(entry)]),
        Text::sentence(vec![title]),
        Text::sentence(vec![
            Text::literal(kind),
            field(entry, "school"),
            field(entry, "address"),
            date(entry),
        ]),
        Text::sentence(vec![field(entry, "note")]),
        web_refs(entry),
    ])
}

fn techreport(entry: &Entry) -> Text {
    let kind = match entry.field("type") {
        Some(_) => field(entry, "type"),
        None => Text::literal("Technical Report"),
    };
    toplevel(vec![
        Text::sentence(vec![authors(entry)]),
        Text::sentence(vec![title(entry)]),
        Text::sentence(vec![
            Text::join(vec![kind, field(entry, "number")], " "),
            field(entry, "institution"),
            field(entry, "address"),
            date(entry),
        ]),
        Text::sentence(vec![field(entry, "note")]),
        web_refs(entry),
    ])
}

fn unpublished(entry: &Entry) -> Text {
    toplevel(vec![
        Text::sentence(vec![authors(entry)]),
        Text::sentence(vec![title(entry)]),
        Text::sentence(vec![field(entry, "note"), date(entry)]),
        web_refs(entry),
    ])
}

fn misc(entry: &Entry) -> Text {
    toplevel(vec![
        Text::sentence(vec![authors(entry)]),
        Text::sentence(vec![title(entry)]),
        Text::sentence(vec![field(entry, "howpublished"), date(entry)]),
        Text::sentence(vec![field(entry, "note")]),
        web_refs(entry),
    ])
}

// =============================================================================
// Field helpers
// =============================================================================

fn field(entry: &Entry, name: &str) -> Text {
    entry
        .field(name)
        .map(|v| Text::literal(to_plain(v)))
        .unwrap_or(Text::Null)
}

/// `prefix` followed by `text`, or nothing when `text` is empty.
fn prefixed(prefix: &str, text: Text) -> Text {
    if text.is_null() {
        Text::Null
    } else {
        Text::sequence(vec![Text::literal(prefix), text])
    }
}

fn title(entry: &Entry) -> Text {
    entry
        .field("title")
        .map(|v| Text::literal(to_plain(&sentence_case(v))))
        .unwrap_or(Text::Null)
}

fn date(entry: &Entry) -> Text {
    if entry.field("year").is_none() {
        return Text::Null;
    }
    Text::join(vec![field(entry, "month"), field(entry, "year")], " ")
}

fn edition(entry: &Entry) -> Text {
    entry
        .field("edition")
        .map(|v| Text::literal(format!("{} edition", to_plain(v).to_lowercase())))
        .unwrap_or(Text::Null)
}

fn pages(entry: &Entry) -> Text {
    match entry.field("pages") {
        Some(p) if p.contains(['-', ',', '+']) => Text::literal(format!("pages {}", to_plain(p))),
        Some(p) => Text::literal(format!("page {}", to_plain(p))),
        None => Text::Null,
    }
}

/// `12(3):45–67`, `12(3)`, or `pages 45–67`.
fn volume_and_pages(entry: &Entry) -> Text {
    let volume = field(entry, "volume");
    if volume.is_null() {
        return pages(entry);
    }
    let number = field(entry, "number");
    let number = if number.is_null() {
        Text::Null
    } else {
        Text::sequence(vec![Text::literal("("), number, Text::literal(")")])
    };
    Text::sequence(vec![volume, number, prefixed(":", field(entry, "pages"))])
}

/// `volume 3 of <em>Series</em>`, or just the series.
fn volume_and_series(entry: &Entry) -> Text {
    let series = Text::emph(field(entry, "series"));
    match entry.field("volume") {
        Some(_) if !series.is_null() => Text::sequence(vec![
            Text::literal("volume "),
            field(entry, "volume"),
            Text::literal(" of "),
            series,
        ]),
        _ => series,
    }
}

fn web_refs(entry: &Entry) -> Text {
    let url = entry
        .field("url")
        .map(|url| {
            Text::sequence(vec![
                Text::literal("URL: "),
                Text::linked(url, vec![Text::literal(url)]),
            ])
        })
        .unwrap_or(Text::Null);
    let doi = entry
        .field("doi")
        .map(|doi| {
            Text::sequence(vec![
                Text::literal("doi:"),
                Text::linked(
                    format!("https://doi.org/{}", doi),
                    vec![Text::literal(doi)],
                ),
            ])
        })
        .unwrap_or(Text::Null);
    Text::sentence(vec![url, doi])
}

// =============================================================================
// Names
// =============================================================================

fn authors(entry: &Entry) -> Text {
    Text::literal(format_names(entry.persons("author")))
}

fn editors(entry: &Entry) -> Text {
    let people = entry.persons("editor");
    let names = format_names(people);
    if names.is_empty() {
        return Text::Null;
    }
    let role = if people.len() > 1 { "editors" } else { "editor" };
    Text::literal(format!("{}, {}", names, role))
}

/// `A`, `A and B`, `A, B, and C`, with a trailing `others` as "et al.".
fn format_names(people: &[Person]) -> String {
    let (people, others) = match people.split_last() {
        Some((last, rest)) if last.is_others() => (rest, true),
        _ => (people, false),
    };
    let names: Vec<String> = people.iter().map(format_person).collect();

    let joined = match names.as_slice() {
        [] => return String::new(),
        [one] => one.clone(),
        [a, b] if !others => format!("{} and {}", a, b),
        [init @ .., last] if !others => format!("{}, and {}", init.join(", "), last),
        all => all.join(", "),
    };

    match (others, names.len()) {
        (false, _) => joined,
        (true, 1) => format!("{} et al.", joined),
        (true, _) => format!("{}, et al.", joined),
    }
}

fn format_person(person: &Person) -> String {
    let mut name = [&person.first, &person.von, &person.last]
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.join(" "))
        .collect::<Vec<_>>()
        .join(" ");
    if !person.jr.is_empty() {
        name.push_str(", ");
        name.push_str(&person.jr.join(" "));
    }
    to_plain(&name)
}

fn sort_key(entry: &Entry) -> (String, String, String) {
    let people = match entry.persons("author") {
        [] => entry.persons("editor"),
        authors => authors,
    };
    let people_key = people
        .iter()
        .map(|p| {
            [&p.von, &p.last, &p.first, &p.jr]
                .iter()
                .flat_map(|part| part.iter())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("   ");

    (
        to_plain(&people_key).to_lowercase(),
        entry.field("year").unwrap_or_default().to_string(),
        to_plain(entry.field("title").unwrap_or_default()).to_lowercase(),
    )
}
