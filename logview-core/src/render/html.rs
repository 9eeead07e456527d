use crate::pipeline::{FilteredLines, LogLine};
use crate::render::headers::HeaderBuilder;
use crate::render::templates::{HTML_FOOTER, HTML_HEADER, HTML_HEADER_BODY, HTML_HEADER_SEV};
use bytes::Bytes;
use http::HeaderMap;
use once_cell::sync::Lazy;
use regex::Regex;

static WHOLE_DOCUMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^<(!doctype )?html").expect("html document pattern must compile")
});

const PRE_OPEN: &str = "<pre>";
const PRE_CLOSE: &str = "</pre>";

/// Escaping state carried from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub should_escape: bool,
    pub pre_depth: usize,
    pub is_whole_document: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            should_escape: true,
            pre_depth: 0,
            is_whole_document: false,
        }
    }
}

impl RenderState {
    fn discover_document(&mut self, first_body: &str) {
        if WHOLE_DOCUMENT_RE.is_match(first_body) {
            self.is_whole_document = true;
            self.should_escape = false;
        }
    }

    /// Track `<pre>` nesting. Returns true when the line is a bare tag
    /// line that must not be emitted.
    fn track_pre(&mut self, body: &str) -> bool {
        if body.starts_with(PRE_OPEN) {
            self.should_escape = false;
            self.pre_depth += 1;
            true
        } else if body.starts_with(PRE_CLOSE) {
            self.pre_depth = self.pre_depth.saturating_sub(1);
            if self.pre_depth == 0 && !self.is_whole_document {
                self.should_escape = true;
            }
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Body,
    Done,
}

/// Severity-colored HTML rendering of a log.
///
/// The first non-empty line decides whether the log is already a complete
/// HTML document. If it is, no header or footer is added and bodies are
/// never escaped.
pub struct HtmlView {
    lines: FilteredLines,
    state: RenderState,
    phase: Phase,
    pending: Option<LogLine>,
}

impl HtmlView {
    pub fn new(lines: FilteredLines) -> Self {
        Self {
            lines,
            state: RenderState::default(),
            phase: Phase::Start,
            pending: None,
        }
    }

    pub fn headers() -> HeaderMap {
        let mut headers = HeaderBuilder::default();
        headers.content_type("text/html");
        headers.build()
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    fn header(&self) -> String {
        let mut header = String::from(HTML_HEADER);
        if self.lines.supports_severity() {
            header.push_str(HTML_HEADER_SEV);
        }
        header.push_str(HTML_HEADER_BODY);
        header
    }

    fn render_line(&mut self, line: &LogLine) -> Option<String> {
        if self.state.track_pre(&line.body) {
            return None;
        }

        let body = if self.state.should_escape {
            escape_html(&line.body)
        } else {
            line.body.clone()
        };

        let fragment = if line.has_date() {
            let anchor = line.anchor();
            format!(
                "<span class='{sev} {anchor}'><a name='{anchor}' class='date' href='#{anchor}'>{date}</a>{body}\n</span>",
                sev = line.severity,
                date = line.date,
            )
        } else {
            format!("<span class='{}'>{}\n</span>", line.severity, body)
        };
        Some(fragment)
    }
}

impl Iterator for HtmlView {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.phase {
                Phase::Start => {
                    let Some(first) = self.lines.by_ref().find(|l| !l.body.is_empty()) else {
                        self.phase = Phase::Done;
                        return None;
                    };
                    self.state.discover_document(&first.body);
                    self.pending = Some(first);
                    self.phase = Phase::Body;
                    if !self.state.is_whole_document {
                        return Some(Bytes::from(self.header()));
                    }
                }
                Phase::Body => {
                    let Some(line) = self.pending.take().or_else(|| self.lines.next()) else {
                        self.phase = Phase::Done;
                        if self.state.is_whole_document {
                            return None;
                        }
                        return Some(Bytes::from_static(HTML_FOOTER.as_bytes()));
                    };
                    if let Some(fragment) = self.render_line(&line) {
                        return Some(Bytes::from(fragment));
                    }
                }
                Phase::Done => return None,
            }
        }
    }
}

/// Escape the characters that would otherwise be read as markup.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
