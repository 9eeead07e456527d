use crate::pipeline::{FilterKind, FilterOptions, Severity};
use crate::render::ViewKind;
use crate::render::headers::FILENAME;
use crate::source::{Compression, SourceKind};
use http::{HeaderMap, header};
use std::path::Path;
use tracing::warn;

/// Decoded query string. Repeated keys keep their first value.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let pairs = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        Self { pairs }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// `level`, defaulting to `NONE`. Unknown names are the weakest level.
    pub fn min_severity(&self) -> Severity {
        self.get("level")
            .map(Severity::parse_lossy)
            .unwrap_or_default()
    }

    /// `limit`, ignored with a warning when it is not an unsigned integer.
    pub fn limit(&self) -> Option<usize> {
        let raw = self.get("limit")?;
        match raw.trim().parse::<usize>() {
            Ok(limit) => Some(limit),
            Err(e) => {
                warn!(limit = %raw, error = %e, "ignoring unparsable limit");
                None
            }
        }
    }

    pub fn wants_object_store(&self) -> bool {
        self.get("source") == Some("object-store")
    }

    pub fn filter_options(&self, strip_control: bool) -> FilterOptions {
        FilterOptions {
            min_severity: self.min_severity(),
            limit: self.limit(),
            strip_control,
        }
    }
}

/// HTML when the client accepts it and has not asked for plain text with
/// `?content-type=text/plain`.
pub fn should_be_html(accept: Option<&str>, params: &QueryParams) -> bool {
    let accepts_html = accept.is_some_and(|a| a.contains("text/html"));
    let text_override = params.get("content-type") == Some("text/plain");
    accepts_html && !text_override
}

/// Guess whether content should be forwarded untouched instead of being
/// formatted as a log.
pub fn use_passthrough(source_headers: &HeaderMap) -> bool {
    let Some(content_type) = source_headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = content_type.split(';').next().unwrap_or_default().trim();
    match essence {
        "text/plain" | "text/html" => false,
        "application/x-gzip" | "application/gzip" | "application/x-bzip2" | "application/x-bzip" => {
            !compressed_text(source_headers)
        }
        _ => true,
    }
}

/// Compressed logs are formatted when the name under the compression
/// extension is a text or html file.
fn compressed_text(source_headers: &HeaderMap) -> bool {
    let filename = source_headers
        .get(FILENAME)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let inner = Compression::strip_extension(filename);
    matches!(
        Path::new(inner).extension().and_then(|e| e.to_str()),
        Some("txt" | "html")
    )
}

/// Pick the filter. `selected` is the first configured name that applies
/// (file condition, then `general.filter`); unknown names fall through to
/// guessing.
pub fn select_filter(
    kind: SourceKind,
    selected: Option<&str>,
    source_headers: &HeaderMap,
) -> FilterKind {
    if kind == SourceKind::Index {
        return FilterKind::None;
    }

    if let Some(filter) = selected.and_then(FilterKind::from_name) {
        return filter;
    }

    if use_passthrough(source_headers) {
        FilterKind::None
    } else {
        FilterKind::Severity
    }
}

pub fn select_view(
    kind: SourceKind,
    selected: Option<&str>,
    supports_html: bool,
    source_headers: &HeaderMap,
) -> ViewKind {
    if kind == SourceKind::Index {
        return ViewKind::Passthrough;
    }

    if let Some(view) = selected.and_then(|name| ViewKind::from_name(name, supports_html)) {
        return view;
    }

    if use_passthrough(source_headers) {
        ViewKind::Passthrough
    } else if supports_html {
        ViewKind::Html
    } else {
        ViewKind::Text
    }
}
