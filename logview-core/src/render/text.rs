use crate::pipeline::FilteredLines;
use crate::render::headers::HeaderBuilder;
use bytes::Bytes;
use http::HeaderMap;

/// Plain text: each line's date followed by its body.
pub struct TextView {
    lines: FilteredLines,
}

impl TextView {
    pub fn new(lines: FilteredLines) -> Self {
        Self { lines }
    }

    pub fn headers() -> HeaderMap {
        let mut headers = HeaderBuilder::default();
        headers.content_type("text/plain");
        headers.build()
    }
}

impl Iterator for TextView {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        let mut out = String::with_capacity(line.date.len() + line.body.len() + 1);
        out.push_str(&line.date);
        out.push_str(&line.body);
        out.push('\n');
        Some(Bytes::from(out))
    }
}
