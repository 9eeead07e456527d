use crate::render::{ChunkIter, render};
use crate::response::negotiate::{QueryParams, select_filter, select_view, should_be_html};
use crate::response::range::{ByteRange, RangeSlicer};
use crate::server::RuntimeState;
use crate::source::{SourceError, SourceOptions, log_name, open_source};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode, header};
use tracing::{debug, warn};

pub const INVALID_FILE_URL: &str = "Invalid file url";
pub const FILE_NOT_FOUND: &str = "File Not Found";
pub const INVALID_RANGE: &str = "Invalid Range";

/// The parts of an HTTP request the handler looks at.
#[derive(Debug, Clone, Default)]
pub struct LogRequest {
    /// Raw (still percent-encoded) request path.
    pub path: String,
    pub query: Option<String>,
    pub accept: Option<String>,
    /// Raw `Range` header value.
    pub range: Option<String>,
}

pub struct LogResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ChunkIter,
}

impl LogResponse {
    /// A short `text/plain` response.
    pub fn text(status: StatusCode, body: &'static str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        Self {
            status,
            headers,
            body: Box::new(std::iter::once(Bytes::from_static(body.as_bytes()))),
        }
    }

    fn from_source_error(err: &SourceError) -> Self {
        match err {
            SourceError::UnsafePath(_) => Self::text(StatusCode::BAD_REQUEST, INVALID_FILE_URL),
            SourceError::NoSuchFile(_) => Self::text(StatusCode::NOT_FOUND, FILE_NOT_FOUND),
            SourceError::Io { .. } => {
                warn!(error = %err, "failed to open log");
                Self::text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

/// Resolve, filter and render one log request.
///
/// Nothing is read from the source here beyond what opening it needs: the
/// returned body pulls lines on demand.
pub fn handle_log_request(state: &RuntimeState, request: &LogRequest) -> LogResponse {
    let params = QueryParams::parse(request.query.as_deref());

    let name = match log_name(&request.path) {
        Ok(name) => name,
        Err(e) => return LogResponse::from_source_error(&e),
    };

    let opts = SourceOptions {
        generate_folder_index: state.general.generate_folder_index,
        object_store: state.object_store.as_ref(),
        prefer_object_store: params.wants_object_store(),
    };

    let source = match open_source(&state.root_path, &name, &opts) {
        Ok(source) => source,
        Err(e) => {
            debug!(log_name = %name, error = %e, "cannot serve log");
            return LogResponse::from_source_error(&e);
        }
    };

    let range = match request.range.as_deref().map(str::parse::<ByteRange>).transpose() {
        Ok(range) => range,
        Err(e) => {
            debug!(log_name = %name, error = %e, "rejecting range");
            return LogResponse::text(StatusCode::BAD_REQUEST, INVALID_RANGE);
        }
    };

    let kind = source.kind();
    let source_headers = source.headers().clone();
    let supports_html = should_be_html(request.accept.as_deref(), &params);

    let filter_name = state
        .conditions
        .filter_for(&name)
        .or(state.general.filter.as_deref());
    let view_name = state
        .conditions
        .view_for(&name)
        .or(state.general.view.as_deref());

    let filter = select_filter(kind, filter_name, &source_headers);
    let view = select_view(kind, view_name, supports_html, &source_headers);

    debug!(
        log_name = %name,
        filter = filter.as_str(),
        view = view.as_str(),
        range = ?range,
        "serving log"
    );

    let lines = filter.apply(
        &name,
        source.into_lines(),
        &params.filter_options(state.general.strip_control),
    );
    let rendered = render(view, lines, &source_headers);

    match range {
        None => LogResponse {
            status: StatusCode::OK,
            headers: rendered.headers,
            body: rendered.chunks,
        },
        Some(range) => {
            let mut headers = rendered.headers;
            // Describes the unsliced body.
            headers.remove(header::CONTENT_LENGTH);
            LogResponse {
                status: StatusCode::PARTIAL_CONTENT,
                headers,
                body: Box::new(RangeSlicer::new(rendered.chunks, range)),
            }
        }
    }
}
