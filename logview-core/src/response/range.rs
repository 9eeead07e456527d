use bytes::Bytes;
use std::collections::VecDeque;
use std::str::FromStr;

/// A single byte range over the rendered output. Offsets are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// `start-end`
    FromTo { start: u64, end: u64 },
    /// `start-`
    From { start: u64 },
    /// `-len`: the last `len` bytes.
    Suffix { len: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("invalid range specifier '{0}'")]
    Invalid(String),
}

impl FromStr for ByteRange {
    type Err = RangeError;

    /// Accepts the raw `Range` header value, with or without the `bytes=`
    /// unit prefix.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || RangeError::Invalid(value.to_string());

        let value = value.trim();
        let spec = value.strip_prefix("bytes=").unwrap_or(value);
        let (start, end) = spec.split_once('-').ok_or_else(invalid)?;
        let (start, end) = (start.trim(), end.trim());

        let parse = |side: &str| -> Result<Option<u64>, RangeError> {
            if side.is_empty() {
                Ok(None)
            } else {
                side.parse::<u64>().map(Some).map_err(|_| invalid())
            }
        };

        match (parse(start)?, parse(end)?) {
            (None, None) => Err(invalid()),
            (None, Some(len)) => Ok(ByteRange::Suffix { len }),
            (Some(start), None) => Ok(ByteRange::From { start }),
            (Some(start), Some(end)) if start > end => Err(invalid()),
            (Some(start), Some(end)) => Ok(ByteRange::FromTo { start, end }),
        }
    }
}

/// Slices a stream of chunks down to one byte range without collecting it.
///
/// Absolute ranges stop pulling upstream once the end offset is reached.
/// Suffix ranges have to see the end of the stream first, so they hold on to
/// the trailing `len` bytes until upstream is exhausted.
pub struct RangeSlicer<I> {
    chunks: I,
    range: ByteRange,
    position: u64,
    finished: bool,
    tail: Option<VecDeque<Bytes>>,
}

impl<I> RangeSlicer<I>
where
    I: Iterator<Item = Bytes>,
{
    pub fn new(chunks: I, range: ByteRange) -> Self {
        Self {
            chunks,
            range,
            position: 0,
            finished: false,
            tail: None,
        }
    }

    fn next_absolute(&mut self, start: u64, end: Option<u64>) -> Option<Bytes> {
        loop {
            if self.finished {
                return None;
            }

            let chunk = self.chunks.next()?;
            let chunk_start = self.position;
            let chunk_len = chunk.len() as u64;
            self.position += chunk_len;

            // Chunk lies entirely before the range.
            if self.position <= start {
                continue;
            }

            let lo = start.saturating_sub(chunk_start);
            let hi = match end {
                Some(end) if end < self.position => {
                    self.finished = true;
                    end + 1 - chunk_start
                }
                _ => chunk_len,
            };

            if lo < hi {
                return Some(chunk.slice(lo as usize..hi as usize));
            }
        }
    }

    fn fill_tail(&mut self, len: u64) -> VecDeque<Bytes> {
        let mut tail = VecDeque::new();
        let mut held = 0u64;

        for chunk in self.chunks.by_ref() {
            held += chunk.len() as u64;
            tail.push_back(chunk);

            while let Some(front) = tail.front() {
                let front_len = front.len() as u64;
                if held - front_len >= len {
                    held -= front_len;
                    tail.pop_front();
                } else {
                    break;
                }
            }
        }

        if held > len {
            if let Some(front) = tail.front_mut() {
                let excess = (held - len) as usize;
                *front = front.slice(excess..);
            }
        }
        tail.retain(|chunk| !chunk.is_empty());
        tail
    }
}

impl<I> Iterator for RangeSlicer<I>
where
    I: Iterator<Item = Bytes>,
{
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        match self.range {
            ByteRange::FromTo { start, end } => self.next_absolute(start, Some(end)),
            ByteRange::From { start } => self.next_absolute(start, None),
            ByteRange::Suffix { len } => {
                if self.tail.is_none() {
                    let tail = self.fill_tail(len);
                    self.tail = Some(tail);
                }
                self.tail.as_mut()?.pop_front()
            }
        }
    }
}
