use crate::response::{LogRequest, LogResponse, handle_log_request};
use crate::server::RequestId;
use crate::server::runtime::RuntimeState;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, header};
use pingora::prelude::{HttpPeer, ProxyHttp, Session};
use pingora::{Custom, Error};
use pingora_http::ResponseHeader;
use std::sync::Arc;
use tokio::sync::mpsc;

enum ResponseFrame {
    Head { status: StatusCode, headers: HeaderMap },
    Chunk(Bytes),
}

/// Terminal gateway: every request is answered by the log handler and
/// nothing is ever proxied upstream.
pub struct LogGateway {
    pub state: Arc<ArcSwap<RuntimeState>>,
}

impl LogGateway {
    pub fn new(state: Arc<ArcSwap<RuntimeState>>) -> Self {
        Self { state }
    }

    fn log_request(session: &Session) -> LogRequest {
        let req = session.req_header();
        let header_str = |name: header::HeaderName| {
            req.headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };

        LogRequest {
            path: req.uri.path().to_owned(),
            query: req.uri.query().map(str::to_owned),
            accept: header_str(header::ACCEPT),
            range: header_str(header::RANGE),
        }
    }
}

/// Runs the pipeline on the blocking pool. The channel holds a single frame,
/// so the pipeline is only advanced as fast as the client reads.
fn produce(
    state: Arc<RuntimeState>,
    request: LogRequest,
    head_only: bool,
    request_id: RequestId,
    tx: mpsc::Sender<ResponseFrame>,
) {
    let span = tracing::debug_span!("render", request_id = %request_id, path = %request.path);
    let _guard = span.enter();

    let LogResponse {
        status,
        headers,
        body,
    } = handle_log_request(&state, &request);

    if tx.blocking_send(ResponseFrame::Head { status, headers }).is_err() || head_only {
        return;
    }

    for chunk in body {
        if chunk.is_empty() {
            continue;
        }
        if tx.blocking_send(ResponseFrame::Chunk(chunk)).is_err() {
            tracing::debug!("client went away, dropping pipeline");
            return;
        }
    }
}

/// Response header carrying every value of every header, repeated names
/// included.
pub(crate) fn response_header(
    status: StatusCode,
    headers: &HeaderMap,
) -> pingora::Result<ResponseHeader> {
    let mut resp = ResponseHeader::build(status, Some(headers.len()))?;
    for (name, value) in headers.iter() {
        resp.append_header(name.clone(), value.clone())?;
    }
    Ok(resp)
}

#[async_trait]
impl ProxyHttp for LogGateway {
    type CTX = RequestId;

    fn new_ctx(&self) -> Self::CTX {
        RequestId::default()
    }

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<Box<HttpPeer>> {
        Err(Error::new(Custom("LogGateway attempted to proxy upstream (bug)")))
    }

    async fn request_filter(
        &self,
        session: &mut Session,
        ctx: &mut Self::CTX,
    ) -> pingora::Result<bool> {
        let request = Self::log_request(session);
        let head_only = session.req_header().method == Method::HEAD;
        let state = self.state.load_full();

        let (tx, mut rx) = mpsc::channel(1);
        let request_id = ctx.clone();
        tokio::task::spawn_blocking(move || produce(state, request, head_only, request_id, tx));

        let Some(ResponseFrame::Head { status, headers }) = rx.recv().await else {
            return Err(Error::new(Custom("log worker ended without a response")));
        };

        let resp = response_header(status, &headers)?;

        // Write headers (not end-of-stream yet)
        session.write_response_header(Box::new(resp), false).await?;

        if !head_only {
            while let Some(frame) = rx.recv().await {
                if let ResponseFrame::Chunk(chunk) = frame {
                    session.write_response_body(Some(chunk), false).await?;
                }
            }
        }

        session.write_response_body(None, true).await?;

        Ok(true)
    }

    async fn logging(&self, session: &mut Session, e: Option<&Error>, ctx: &mut Self::CTX)
    where
        Self::CTX: Send + Sync,
    {
        let req = session.req_header();
        let status = session
            .response_written()
            .map(|resp| resp.status.as_u16())
            .unwrap_or_default();

        match e {
            Some(err) => tracing::warn!(
                request_id = %ctx,
                method = %req.method,
                path = %req.uri.path(),
                status,
                error = %err,
                "request failed"
            ),
            None => tracing::info!(
                request_id = %ctx,
                method = %req.method,
                path = %req.uri.path(),
                status,
                "request served"
            ),
        }
    }
}
