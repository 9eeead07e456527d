use crate::pipeline::FilteredLines;
use crate::render::headers::HeaderBuilder;
use bytes::Bytes;
use http::{HeaderMap, header};

/// Forwards each line's original bytes together with the source headers.
pub struct PassthroughView {
    lines: FilteredLines,
}

impl PassthroughView {
    pub fn new(lines: FilteredLines) -> Self {
        Self { lines }
    }

    /// The source headers, minus `content-length` when the filter may have
    /// changed the number of bytes.
    pub fn headers(source_headers: &HeaderMap, lossless: bool) -> HeaderMap {
        let mut headers = HeaderBuilder::from_map(source_headers.clone());
        if !lossless {
            headers.remove(header::CONTENT_LENGTH);
        }
        headers.build()
    }
}

impl Iterator for PassthroughView {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|line| line.raw)
    }
}
