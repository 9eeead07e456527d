use bytes::Bytes;
use std::io::{BufRead, Read};
use tracing::warn;

/// Longest chunk handed on as one line. Longer lines arrive as several
/// chunks, only the last of which carries the `\n`.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Splits a reader into lines, keeping each `\n`.
///
/// A read error ends the sequence. The lines read so far have already been
/// handed on, so there is nobody left to report the error to but the log.
pub struct RawLines<R> {
    reader: R,
    name: String,
    done: bool,
}

impl<R: BufRead> RawLines<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for RawLines<R> {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = Vec::new();
        match (&mut self.reader)
            .take(MAX_LINE_LEN as u64)
            .read_until(b'\n', &mut buf)
        {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => Some(Bytes::from(buf)),
            Err(e) => {
                warn!(log_name = %self.name, error = %e, "read failed, ending stream");
                self.done = true;
                None
            }
        }
    }
}
