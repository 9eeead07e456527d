use integration_tests::harness::{CapturedEvent, TestServer};
use reqwest::StatusCode;
use std::thread;
use std::time::{Duration, Instant};

/// The logging hook runs after the response is finished, so poll for it.
fn wait_for_event(srv: &TestServer, matches: impl Fn(&CapturedEvent) -> bool) -> CapturedEvent {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        if let Some(event) = srv.events().into_iter().find(|e| matches(e)) {
            return event;
        }
        assert!(Instant::now() < deadline, "expected event was not captured");
        thread::sleep(Duration::from_millis(20));
    }
}

#[test]
fn served_requests_are_logged_with_a_request_id() {
    let srv = TestServer::start();

    let res = srv.get("/logs/screen-n-cpu.txt?marker=served").send().unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let _ = res.text().unwrap();

    let served = wait_for_event(&srv, |e| {
        e.message() == "request served" && e.field("status") == Some("200")
    });

    assert_eq!(served.level, tracing::Level::INFO);
    assert_eq!(served.field("path"), Some("/logs/screen-n-cpu.txt"));
    assert!(served.field("request_id").is_some_and(|id| id.len() == 36));
}

#[test]
fn not_found_is_logged_with_its_status() {
    let srv = TestServer::start();

    let res = srv.get("/logs/absent-for-tracing.txt").send().unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let _ = res.text().unwrap();

    wait_for_event(&srv, |e| {
        e.message() == "request served"
            && e.field("path") == Some("/logs/absent-for-tracing.txt")
            && e.field("status") == Some("404")
    });
}
