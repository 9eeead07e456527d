use crate::pipeline::Severity;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const SYSLOG_DATE: &str = r"\w+\s+\d+\s+\d{2}:\d{2}:\d{2}([.,]\d{3,6})?";
const ISO_DATE: &str = r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}([.,]\d{3,6})?";
const STATUS: &str = r"(DEBUG|INFO|WARNING|ERROR|TRACE|AUDIT|CRITICAL)";

static OSLO_RE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"^(?P<date>{ISO_DATE})(?P<body>(?P<pid> \d+)? (?P<status>{STATUS}).*)"
    ))
});

static SYSTEMD_RE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"^(?P<date>{SYSLOG_DATE})(?P<body> (?P<host>\S+) \S+\[\d+\]: (?P<status>{STATUS})?.*)"
    ))
});

static CONSOLE_RE: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^(?P<date>{ISO_DATE})(?P<body>.*)")));

static SYSLOG_RE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"^(?P<date>{SYSLOG_DATE})(?P<body> (?P<host>[\w-]+) (?P<service>[^\[\s]+):.*)"
    ))
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in log format pattern must compile")
}

/// Syslog services whose chatter is demoted to DEBUG.
const DEBUG_SERVICES: [&str; 2] = ["tgtd", "proxy-server"];

/// A recognised log dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `2013-09-27 18:22:11.248 1234 INFO nova.api ...`
    Oslo,
    /// `Mar 28 12:20:42.377230 host unit[123]: WARNING ...`
    Systemd,
    /// `2013-09-27 18:07:11.860 | anything`
    Console,
    /// `Sep 27 18:22:11 host service: ...`
    Syslog,
}

/// Order in which formats are tried. The first match wins.
pub const FORMAT_PRIORITY: [LogFormat; 4] = [
    LogFormat::Oslo,
    LogFormat::Systemd,
    LogFormat::Console,
    LogFormat::Syslog,
];

/// Fields captured by a successful format match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineParts {
    pub date: String,
    pub body: String,
    pub severity: Severity,
    pub pid: Option<String>,
    pub host: Option<String>,
    pub service: Option<String>,
}

impl LogFormat {
    pub fn name(&self) -> &'static str {
        match self {
            LogFormat::Oslo => "oslo",
            LogFormat::Systemd => "systemd",
            LogFormat::Console => "console",
            LogFormat::Syslog => "syslog",
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            LogFormat::Oslo => &OSLO_RE,
            LogFormat::Systemd => &SYSTEMD_RE,
            LogFormat::Console => &CONSOLE_RE,
            LogFormat::Syslog => &SYSLOG_RE,
        }
    }

    /// Match `line` from its first byte. `prior` is the carried severity,
    /// used by formats that carry no level of their own.
    pub fn match_line(&self, line: &str, prior: Severity) -> Option<LineParts> {
        let caps = self.regex().captures(line)?;

        let severity = match self {
            LogFormat::Oslo | LogFormat::Systemd => caps
                .name("status")
                .map(|m| Severity::parse_lossy(m.as_str()))
                .unwrap_or_default(),
            LogFormat::Console => prior,
            LogFormat::Syslog => syslog_severity(group(&caps, "service").as_deref()),
        };

        Some(LineParts {
            date: group(&caps, "date").unwrap_or_default(),
            body: group(&caps, "body").unwrap_or_default(),
            severity,
            pid: caps.name("pid").map(|m| m.as_str().trim_start().to_string()),
            host: group(&caps, "host"),
            service: group(&caps, "service"),
        })
    }
}

fn group(caps: &Captures<'_>, name: &str) -> Option<String> {
    caps.name(name).map(|m| m.as_str().to_string())
}

fn syslog_severity(service: Option<&str>) -> Severity {
    match service {
        Some(s) if DEBUG_SERVICES.contains(&s) => Severity::Debug,
        _ => Severity::Info,
    }
}
