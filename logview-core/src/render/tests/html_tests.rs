use super::{collect, filtered};
use crate::pipeline::{FilterKind, FilterOptions};
use crate::render::templates::{HTML_FOOTER, HTML_HEADER, HTML_HEADER_BODY, HTML_HEADER_SEV};
use crate::render::{HtmlView, escape_html};
use pretty_assertions::assert_eq;

fn html(name: &str, text: &str) -> String {
    collect(HtmlView::new(filtered(
        FilterKind::Severity,
        name,
        text,
        FilterOptions::default(),
    )))
}

#[test]
fn dated_line_gets_anchor_span() {
    // Arrange
    let text = "2013-09-27 18:22:11.248 INFO nova.osapi <x>\n";

    // Act
    let out = html("screen-n-api.txt", text);

    // Assert
    let expected_line = "<span class='INFO _2013-09-27_18_22_11_248'>\
<a name='_2013-09-27_18_22_11_248' class='date' href='#_2013-09-27_18_22_11_248'>\
2013-09-27 18:22:11.248</a> INFO nova.osapi &lt;x&gt;\n</span>";
    assert_eq!(
        out,
        format!("{HTML_HEADER}{HTML_HEADER_SEV}{HTML_HEADER_BODY}{expected_line}{HTML_FOOTER}")
    );
}

#[test]
fn severity_selector_only_for_supported_logs() {
    let out = html("console.html", "plain line\n");

    assert!(!out.contains("id='selector'"));
    assert!(out.starts_with(HTML_HEADER));
    assert!(out.contains("<span class='NONE'>plain line\n</span>"));
}

#[test]
fn continuation_line_uses_carried_class() {
    let out = html(
        "screen-n-cpu.txt",
        "2013-09-27 18:22:11.249 ERROR nova [-] boom\n  File \"x.py\"\n",
    );

    assert!(out.contains("<span class='ERROR'>  File &quot;x.py&quot;\n</span>"));
}

#[test]
fn empty_input_renders_nothing() {
    assert_eq!(html("screen-n-cpu.txt", ""), "");
    assert_eq!(html("screen-n-cpu.txt", "\n\n"), "");
}

#[test]
fn leading_blank_lines_are_skipped() {
    let out = html("console.html", "\n\nfirst\n");

    assert_eq!(
        out,
        format!("{HTML_HEADER}{HTML_HEADER_BODY}<span class='NONE'>first\n</span>{HTML_FOOTER}")
    );
}

#[test]
fn whole_document_is_not_wrapped() {
    let text = "<!DOCTYPE html>\n<p>a & b</p>\n";
    let mut view = HtmlView::new(filtered(
        FilterKind::None,
        "report.html",
        text,
        FilterOptions::default(),
    ));

    let out = collect(view.by_ref());

    assert!(view.state().is_whole_document);
    assert_eq!(
        out,
        "<span class='NONE'><!DOCTYPE html>\n</span><span class='NONE'><p>a & b</p>\n</span>"
    );
}

#[test]
fn whole_document_detection_is_case_insensitive() {
    let out = html("index.html", "<HTML><body>\n");

    assert!(!out.contains("<style>"));
}

#[test]
fn pre_blocks_disable_escaping_until_outer_close() {
    let text = "a<b\n<pre>\nx<y\n<pre>\ninner<i>\n</pre>\nstill<raw>\n</pre>\nc<d\n";

    let out = html("console.html", text);

    let body = out
        .strip_prefix(&format!("{HTML_HEADER}{HTML_HEADER_BODY}"))
        .and_then(|s| s.strip_suffix(HTML_FOOTER))
        .expect("wrapped document");
    assert_eq!(
        body,
        "<span class='NONE'>a&lt;b\n</span>\
<span class='NONE'>x<y\n</span>\
<span class='NONE'>inner<i>\n</span>\
<span class='NONE'>still<raw>\n</span>\
<span class='NONE'>c&lt;d\n</span>"
    );
}

#[test]
fn unbalanced_close_does_not_underflow() {
    let text = "</pre>\n</pre>\n<pre>\nraw<b>\n</pre>\nesc<b>\n";

    let out = html("console.html", text);

    assert!(out.contains("<span class='NONE'>raw<b>\n</span>"));
    assert!(out.contains("<span class='NONE'>esc&lt;b&gt;\n</span>"));
}

#[test]
fn limit_bounds_body_lines() {
    let text = (0..10)
        .map(|i| format!("2013-09-27 18:22:11.{i:03} INFO nova line {i}\n"))
        .collect::<String>();
    let opts = FilterOptions {
        limit: Some(3),
        ..Default::default()
    };

    let out = collect(HtmlView::new(filtered(
        FilterKind::Severity,
        "screen-n-cpu.txt",
        &text,
        opts,
    )));

    assert_eq!(out.matches("<span class='INFO").count(), 3);
    assert!(out.ends_with(HTML_FOOTER));
}

#[test]
fn escape_covers_markup_and_quotes() {
    assert_eq!(
        escape_html(r#"<a href="x">&'"#),
        "&lt;a href=&quot;x&quot;&gt;&amp;'"
    );
}
