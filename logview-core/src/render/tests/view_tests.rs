use super::{collect, filtered};
use crate::pipeline::{FilterKind, FilterOptions, Severity};
use crate::render::{ViewKind, render};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, header};
use pretty_assertions::assert_eq;

fn source_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/x-tar"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("42"));
    headers
}

#[test]
fn text_view_joins_date_and_body() {
    let lines = filtered(
        FilterKind::Severity,
        "screen-n-cpu.txt",
        "2013-09-27 18:22:11.248 INFO nova x\ncontinued\n",
        FilterOptions::default(),
    );

    let view = render(ViewKind::Text, lines, &HeaderMap::new());

    assert_eq!(view.headers[header::CONTENT_TYPE], "text/plain");
    assert_eq!(
        collect(view.chunks),
        "2013-09-27 18:22:11.248 INFO nova x\ncontinued\n"
    );
}

#[test]
fn text_view_filters_by_level() {
    let lines = filtered(
        FilterKind::Severity,
        "screen-n-cpu.txt",
        "2013-09-27 18:22:11.248 DEBUG a\n2013-09-27 18:22:11.249 ERROR b\n",
        FilterOptions {
            min_severity: Severity::Warning,
            ..Default::default()
        },
    );

    let view = render(ViewKind::Text, lines, &HeaderMap::new());

    assert_eq!(collect(view.chunks), "2013-09-27 18:22:11.249 ERROR b\n");
}

#[test]
fn passthrough_forwards_raw_bytes_and_headers() {
    let raw = vec![
        Bytes::from_static(b"\x00\x01\xff\n"),
        Bytes::from_static(b"tail"),
    ];
    let lines = FilterKind::None.apply("blob.tar", raw.into_iter(), &FilterOptions::default());

    let view = render(ViewKind::Passthrough, lines, &source_headers());
    let body: Vec<u8> = view.chunks.flat_map(|c| c.to_vec()).collect();

    assert_eq!(view.headers, source_headers());
    assert_eq!(body, b"\x00\x01\xff\ntail".to_vec());
}

#[test]
fn passthrough_keeps_the_date_of_classified_lines() {
    let log = "2013-09-27 18:22:11.249 1234 ERROR nova.compute.manager [-] b\n";
    let lines = filtered(
        FilterKind::Severity,
        "screen-n-cpu.txt",
        log,
        FilterOptions::default(),
    );

    let view = render(ViewKind::Passthrough, lines, &source_headers());

    assert_eq!(collect(view.chunks), log);
}

#[test]
fn passthrough_drops_length_after_lossy_filter() {
    let lines = filtered(
        FilterKind::Severity,
        "screen-n-cpu.txt",
        "a\nb\n",
        FilterOptions::default(),
    );

    let view = render(ViewKind::Passthrough, lines, &source_headers());

    assert!(view.headers.get(header::CONTENT_LENGTH).is_none());
    assert_eq!(view.headers[header::CONTENT_TYPE], "application/x-tar");
}

#[test]
fn view_names_resolve() {
    assert_eq!(ViewKind::from_name("HTML", true), Some(ViewKind::Html));
    assert_eq!(ViewKind::from_name("htmlview", false), None);
    assert_eq!(ViewKind::from_name("textview", false), Some(ViewKind::Text));
    assert_eq!(
        ViewKind::from_name("passthrough", false),
        Some(ViewKind::Passthrough)
    );
    assert!(!ViewKind::is_known_name("jsonview"));
}
