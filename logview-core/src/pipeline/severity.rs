use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Ordered log severity. `None` is the weakest and doubles as "unknown".
///
/// The derived `Ord` follows declaration order, which is the order used for
/// threshold comparisons.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    #[default]
    None,
    Debug,
    Info,
    Audit,
    Trace,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 8] = [
        Severity::None,
        Severity::Debug,
        Severity::Info,
        Severity::Audit,
        Severity::Trace,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "NONE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Audit => "AUDIT",
            Severity::Trace => "TRACE",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Parse a severity name, treating anything unrecognised as `None`.
    pub fn parse_lossy(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Severity::None)
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}'")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSeverity(s.to_string()))
    }
}
