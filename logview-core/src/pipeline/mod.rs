//! Line classification and severity filtering.
//!
//! Raw lines are classified one at a time against an ordered list of log
//! dialects ([`FORMAT_PRIORITY`]) and then filtered by severity. Every stage
//! is a plain iterator: nothing is read from the source until the renderer
//! pulls the next line.

mod classify;
mod filter;
mod formats;
mod severity;


pub use classify::{LogLine, anchor_for, classify};
pub use filter::{
    FilterKind, FilterOptions, FilteredLines, NoFilter, SevFilter, strip_control,
    supports_severity,
};
pub use formats::{FORMAT_PRIORITY, LineParts, LogFormat};
pub use severity::{Severity, UnknownSeverity};
