/*
 * render_integration.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for the render command.
 */

//! Integration tests for `bibcite render`.
//!
//! Each test lays out a small site in a temporary directory, runs the
//! render command on it and inspects the files written to the output
//! directory.

use std::fs;
use std::path::Path;

use bibcite_cli::commands::render::{RenderArgs, render_site};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const REFS: &str = r#"
@book{knuth1984,
  author = {Donald E. Knuth},
  title = {The {TeX}book},
  publisher = {Addison-Wesley},
  year = 1984,
}

@article{smith2020,
  author = {Smith, Jane and Doe, John},
  title = {A Study of Things},
  journal = {Journal of Stuff},
  volume = 12,
  number = 3,
  pages = {45--67},
  year = 2020,
}
"#;

fn write(root: &Path, name: &str, text: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
    fs::write(path, text).expect("write fixture");
}

fn site_with_config(config: &str) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    write(temp.path(), "_bibcite.yml", config);
    write(temp.path(), "refs.bib", REFS);
    temp
}

fn args(root: &Path) -> RenderArgs {
    RenderArgs {
        site: root.to_path_buf(),
        output_dir: None,
        quiet: true,
    }
}

fn output(root: &Path, name: &str) -> String {
    fs::read_to_string(root.join("_site").join(name)).expect("Failed to read output")
}

#[test]
fn test_render_resolves_citations() {
    let temp = site_with_config("publications-src: refs.bib\n");
    write(
        temp.path(),
        "index.html",
        "<p>See [@knuth1984] and [@smith2020], again [@knuth1984].</p>",
    );

    let report = render_site(&args(temp.path())).expect("render succeeds");
    let html = output(temp.path(), "index.html");

    assert_eq!(report.documents, 1);
    assert_eq!(report.rewritten, 1);
    assert!(report.warnings.is_empty());

    assert!(html.starts_with(
        "<p>See <a href=\"#knuth1984\" id=\"ref-knuth1984-1\">[1]</a> and \
         <a href=\"#smith2020\" id=\"ref-smith2020-1\">[2]</a>, again \
         <a href=\"#knuth1984\" id=\"ref-knuth1984-2\">[1]</a>.</p>\n<h3>Bibliography</h3>\n"
    ));
    assert!(html.contains(
        "<p id=\"knuth1984\">Donald E. Knuth. <em>The TeXbook</em>. Addison-Wesley, 1984. \
         <a href=\"#ref-knuth1984-1\" title=\"Jump back to reference 1\">\u{21a9} 1</a>, \
         <a href=\"#ref-knuth1984-2\" title=\"Jump back to reference 2\">2</a></p>"
    ));
    assert!(html.contains("<p id=\"smith2020\">Jane Smith and John Doe."));
}

#[test]
fn test_render_preserves_front_matter() {
    let temp = site_with_config("publications-src: refs.bib\n");
    let front_matter = "---\ntitle: Notes\n---\n";
    write(
        temp.path(),
        "posts/notes.md",
        &format!("{}Cited [@smith2020].\n", front_matter),
    );

    render_site(&args(temp.path())).expect("render succeeds");
    let text = output(temp.path(), "posts/notes.md");

    assert!(text.starts_with(front_matter));
    assert!(text.contains("<a href=\"#smith2020\" id=\"ref-smith2020-1\">[1]</a>"));
}

#[test]
fn test_render_uses_local_bibliography() {
    let temp = site_with_config("publications-src: refs.bib\n");
    write(
        temp.path(),
        "posts/local.bib",
        "@misc{local1, author = {Lou Local}, title = {Local notes}, year = 2021}",
    );
    write(
        temp.path(),
        "posts/page.md",
        "---\npublications_src: posts/local.bib\n---\n[@local1] [@knuth1984]\n",
    );

    let report = render_site(&args(temp.path())).expect("render succeeds");
    let text = output(temp.path(), "posts/page.md");

    assert!(text.contains("<p id=\"local1\">Lou Local. Local notes. 2021."));
    assert!(text.contains("[@knuth1984]"));
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].document, "posts/page.md");
}

#[test]
fn test_render_without_bibliography_copies_documents() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    write(temp.path(), "index.html", "See [@knuth1984].");

    let report = render_site(&args(temp.path())).expect("render succeeds");

    assert_eq!(output(temp.path(), "index.html"), "See [@knuth1984].");
    assert_eq!(report.documents, 1);
    assert_eq!(report.rewritten, 0);
}

#[test]
fn test_render_custom_heading_and_output_dir() {
    let temp = site_with_config(
        "publications-src: refs.bib\nbibliography-heading: References\noutput-dir: public\n",
    );
    write(temp.path(), "index.html", "[@knuth1984]");

    render_site(&args(temp.path())).expect("render succeeds");
    let html = fs::read_to_string(temp.path().join("public/index.html")).expect("output");

    assert!(html.contains("<h3>References</h3>"));
    assert!(!temp.path().join("_site").exists());
}

#[test]
fn test_render_output_dir_argument_wins() {
    let temp = site_with_config("publications-src: refs.bib\n");
    write(temp.path(), "index.html", "[@knuth1984]");

    let mut args = args(temp.path());
    args.output_dir = Some("out".into());
    render_site(&args).expect("render succeeds");

    assert!(temp.path().join("out/index.html").exists());
}

#[test]
fn test_render_is_repeatable() {
    let temp = site_with_config("publications-src: refs.bib\n");
    write(temp.path(), "index.html", "[@smith2020]");

    render_site(&args(temp.path())).expect("first render");
    let first = output(temp.path(), "index.html");
    render_site(&args(temp.path())).expect("second render");

    assert_eq!(output(temp.path(), "index.html"), first);
}

#[test]
fn test_render_missing_site_fails() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let result = render_site(&args(&temp.path().join("missing")));

    let err = result.expect_err("missing site is an error");
    assert!(err.to_string().contains("Site directory does not exist"));
}

#[test]
fn test_render_bad_config_fails() {
    let temp = site_with_config("output-dir: [unclosed\n");
    write(temp.path(), "index.html", "[@knuth1984]");

    let err = render_site(&args(temp.path())).expect_err("bad config is an error");
    assert!(format!("{:#}", err).contains("_bibcite.yml"));
}
