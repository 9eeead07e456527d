use crate::pipeline::{LogLine, Severity, classify};
use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Log names whose lines carry a severity worth filtering on. Matched
/// against the final path segment only, from its first character.
static SUPPORTS_SEVERITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"(screen-)?(n-|c-|g-|h-|ir-|ironic-|m-|o-|df-|placement-api|",
        r"q-|neutron-|",
        r"ceil|key|sah|des|tr)",
        r"|devstack@",
        r"|(keystone|tempest)\.txt",
        r"|syslog",
        r")"
    ))
    .expect("severity allow-list pattern must compile")
});

static ANSI_COLOR_RE: Lazy<regex::bytes::Regex> = Lazy::new(|| {
    regex::bytes::Regex::new(r"\x1b\[(([03]\d)|;)+m").expect("ansi color pattern must compile")
});

/// Does the log named `logical_name` carry severities we can filter on?
pub fn supports_severity(logical_name: &str) -> bool {
    let file_name = logical_name
        .rsplit('/')
        .next()
        .unwrap_or(logical_name);
    SUPPORTS_SEVERITY_RE.is_match(file_name)
}

/// Remove ANSI color sequences from a console-colored line.
pub fn strip_control(line: &[u8]) -> Cow<'_, [u8]> {
    ANSI_COLOR_RE.replace_all(line, &b""[..])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Severity,
    None,
}

impl FilterKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sevfilter" | "sev" => Some(FilterKind::Severity),
            "nofilter" | "no" => Some(FilterKind::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Severity => "sevfilter",
            FilterKind::None => "nofilter",
        }
    }

    pub fn apply<I>(self, logical_name: &str, lines: I, opts: &FilterOptions) -> FilteredLines
    where
        I: Iterator<Item = Bytes> + Send + 'static,
    {
        match self {
            FilterKind::Severity => {
                let filter = SevFilter::new(lines, logical_name, opts);
                FilteredLines {
                    supports_severity: filter.supports_severity(),
                    lossless: false,
                    lines: Box::new(filter),
                }
            }
            FilterKind::None => FilteredLines {
                supports_severity: false,
                lossless: true,
                lines: Box::new(NoFilter::new(lines)),
            },
        }
    }
}

/// Per-request filter settings.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub min_severity: Severity,
    pub limit: Option<usize>,
    pub strip_control: bool,
}

/// The output of either filter, erased so renderers take one type.
pub struct FilteredLines {
    supports_severity: bool,
    lossless: bool,
    lines: Box<dyn Iterator<Item = LogLine> + Send>,
}

impl FilteredLines {
    pub fn supports_severity(&self) -> bool {
        self.supports_severity
    }

    /// True when every source line comes through byte-for-byte, so size
    /// metadata describing the source also describes the output.
    pub fn is_lossless(&self) -> bool {
        self.lossless
    }
}

impl Iterator for FilteredLines {
    type Item = LogLine;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}

/// Classifies lines, carries severity forward across continuation lines and
/// drops lines below the requested minimum.
pub struct SevFilter<I> {
    lines: I,
    min_severity: Severity,
    limit: Option<usize>,
    strip_control: bool,
    supports_severity: bool,
    carry: Severity,
    emitted: usize,
}

impl<I> SevFilter<I>
where
    I: Iterator<Item = Bytes>,
{
    pub fn new(lines: I, logical_name: &str, opts: &FilterOptions) -> Self {
        Self {
            lines,
            min_severity: opts.min_severity,
            limit: opts.limit,
            strip_control: opts.strip_control,
            supports_severity: supports_severity(logical_name),
            carry: Severity::None,
            emitted: 0,
        }
    }

    pub fn supports_severity(&self) -> bool {
        self.supports_severity
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.emitted >= limit)
    }

    fn skip_by_severity(&self, severity: Severity) -> bool {
        self.supports_severity && severity < self.min_severity
    }
}

impl<I> Iterator for SevFilter<I>
where
    I: Iterator<Item = Bytes>,
{
    type Item = LogLine;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Checked before pulling so a reached limit reads nothing more.
            if self.limit_reached() {
                return None;
            }

            let mut raw = self.lines.next()?;
            if self.strip_control {
                if let Cow::Owned(stripped) = strip_control(&raw) {
                    raw = Bytes::from(stripped);
                }
            }

            let mut line = classify(raw, self.carry);

            if line.severity.is_none() {
                line.severity = self.carry;
            } else {
                self.carry = line.severity;
            }

            if self.skip_by_severity(line.severity) {
                continue;
            }

            self.emitted += 1;
            return Some(line);
        }
    }
}

/// Wraps every raw line as an undated `NONE` line.
pub struct NoFilter<I> {
    lines: I,
}

impl<I> NoFilter<I> {
    pub fn new(lines: I) -> Self {
        Self { lines }
    }
}

impl<I> Iterator for NoFilter<I>
where
    I: Iterator<Item = Bytes>,
{
    type Item = LogLine;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(LogLine::unclassified)
    }
}
