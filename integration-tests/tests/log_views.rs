use integration_tests::harness::{NOVA_LOG, TestServer};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, RANGE};

#[test]
fn browsers_get_html() {
    let srv = TestServer::start();

    let res = srv
        .get("/logs/screen-n-cpu.txt")
        .header(ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "text/html");
    let body = res.text().unwrap();
    assert!(body.starts_with("<html>\n<head>"), "unexpected body: {body}");
    assert!(body.contains("spawn failed &lt;timeout&gt;"));
    assert!(body.contains("<span class='ERROR'>Traceback (most recent call last):\n</span>"));
    assert!(body.trim_end().ends_with("</html>"));
}

#[test]
fn plain_clients_get_text() {
    let srv = TestServer::start();

    let res = srv.get("/logs/screen-n-cpu.txt").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "text/plain");
    assert_eq!(res.text().unwrap(), NOVA_LOG);
}

#[test]
fn level_query_filters_lines() {
    let srv = TestServer::start();

    let res = srv
        .get("/htmlify/logs/screen-n-cpu.txt?level=ERROR")
        .send()
        .unwrap();

    let body = res.text().unwrap();
    assert!(body.contains("spawn failed"));
    assert!(body.contains("Traceback"));
    assert!(!body.contains("polling instances"));
    assert!(!body.contains("retrying"));
}

#[test]
fn range_requests_slice_the_rendered_body() {
    let srv = TestServer::start();

    let res = srv
        .get("/logs/screen-n-cpu.txt")
        .header(RANGE, "bytes=0-9")
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::PARTIAL_CONTENT);
    assert!(res.headers().get(CONTENT_LENGTH).is_none_or(|v| v == "10"));
    assert_eq!(res.text().unwrap(), &NOVA_LOG[..10]);
}

#[test]
fn malformed_range_is_rejected() {
    let srv = TestServer::start();

    let res = srv
        .get("/logs/screen-n-cpu.txt")
        .header(RANGE, "bytes=9-1")
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().unwrap(), "Invalid Range");
}

#[test]
fn gzip_logs_are_decompressed() {
    let srv = TestServer::start();

    let res = srv.get("/logs/syslog.txt.gz?level=INFO").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().unwrap();
    assert!(body.contains("session opened"));
    assert!(!body.contains("chatter"));
}

#[test]
fn whole_html_documents_are_not_escaped() {
    let srv = TestServer::start();

    let res = srv
        .get("/logs/job-output.html")
        .header(ACCEPT, "text/html")
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().unwrap();
    assert!(!body.contains("<head>"), "header template added: {body}");
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("<p>done</p>"));
    assert!(!body.contains("&lt;"));
}

#[test]
fn head_returns_headers_only() {
    let srv = TestServer::start();

    let res = srv.head("/logs/screen-n-cpu.txt").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "text/plain");
    assert!(res.text().unwrap().is_empty());
}
