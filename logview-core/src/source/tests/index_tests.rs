use crate::source::{IndexSource, LineSource, SourceKind, sizeof_fmt};
use http::header;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn human_sizes() {
    assert_eq!(sizeof_fmt(0), "0.0B");
    assert_eq!(sizeof_fmt(1023), "1023.0B");
    assert_eq!(sizeof_fmt(284_058), "277.4KB");
    assert_eq!(sizeof_fmt(5 * 1024 * 1024), "5.0MB");
}

#[test]
fn index_lists_entries_sorted_with_dirs_marked() {
    // Arrange
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), "b").unwrap();
    fs::write(dir.path().join("a <x>.txt"), "a").unwrap();
    fs::create_dir(dir.path().join("c")).unwrap();

    // Act
    let index = IndexSource::scan("logs", dir.path()).unwrap();

    // Assert
    assert_eq!(index.kind(), SourceKind::Index);
    assert_eq!(index.headers()[header::CONTENT_TYPE], "text/html");

    let page: String = Box::new(index)
        .into_lines()
        .map(|l| String::from_utf8(l.to_vec()).unwrap())
        .collect();
    let a = page.find("a &lt;x&gt;.txt</a>").unwrap();
    let b = page.find(">b.txt</a>").unwrap();
    let c = page.find("<a href=\"/logs/c/\">c/</a>").unwrap();
    assert!(a < b && b < c);
    assert!(page.contains("href=\"/logs/a%20%3Cx%3E.txt\""));
    assert!(page.contains("<td style=\"text-align: right\">1.0B</td>"));
}

#[test]
fn empty_directory_has_no_index() {
    let dir = tempdir().unwrap();

    assert!(IndexSource::scan("empty", dir.path()).is_none());
}
