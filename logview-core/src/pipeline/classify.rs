use crate::pipeline::{FORMAT_PRIORITY, LineParts, Severity};
use bytes::Bytes;

/// One classified input line.
///
/// `raw` keeps the exact bytes read from the source (terminator included) so
/// passthrough rendering never has to reconstruct them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub date: String,
    pub severity: Severity,
    pub body: String,
    pub pid: Option<String>,
    pub host: Option<String>,
    pub service: Option<String>,
    pub raw: Bytes,
}

impl LogLine {
    /// An undated line that keeps its text untouched apart from the line
    /// terminator.
    pub fn unclassified(raw: Bytes) -> Self {
        let text = decode(&raw);
        Self {
            date: String::new(),
            severity: Severity::None,
            body: strip_terminator(&text).to_string(),
            pid: None,
            host: None,
            service: None,
            raw,
        }
    }

    pub fn has_date(&self) -> bool {
        !self.date.is_empty()
    }

    /// HTML id derived from the date, e.g. `_2013-09-27_18_22_11_248`.
    pub fn anchor(&self) -> String {
        anchor_for(&self.date)
    }
}

pub fn anchor_for(date: &str) -> String {
    let mut anchor = String::with_capacity(date.len() + 1);
    anchor.push('_');
    anchor.extend(date.chars().map(|c| {
        if c.is_whitespace() || matches!(c, ':' | '.' | ',') {
            '_'
        } else {
            c
        }
    }));
    anchor
}

/// Classify a raw line. Never fails: a line no format recognises keeps
/// `prior` as its severity and its right-trimmed text as the body.
pub fn classify(raw: Bytes, prior: Severity) -> LogLine {
    let text = decode(&raw);
    let line = strip_terminator(&text);

    let parts = FORMAT_PRIORITY
        .iter()
        .find_map(|format| format.match_line(line, prior))
        .unwrap_or_else(|| LineParts {
            date: String::new(),
            body: line.trim_end().to_string(),
            severity: prior,
            pid: None,
            host: None,
            service: None,
        });

    LogLine {
        date: parts.date,
        severity: parts.severity,
        body: parts.body,
        pid: parts.pid,
        host: parts.host,
        service: parts.service,
        raw,
    }
}

fn decode(raw: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(raw)
}

fn strip_terminator(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}
