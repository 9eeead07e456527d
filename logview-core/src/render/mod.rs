//! Views that turn filtered lines into response chunks.

pub(crate) mod headers;
mod html;
mod passthrough;
mod templates;
mod text;

#[cfg(test)]
mod tests;

pub use html::{HtmlView, RenderState, escape_html};
pub use passthrough::PassthroughView;
pub use text::TextView;

use crate::pipeline::FilteredLines;
use bytes::Bytes;
use http::HeaderMap;

/// A boxed, lazily produced sequence of body chunks.
pub type ChunkIter = Box<dyn Iterator<Item = Bytes> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Html,
    Text,
    Passthrough,
}

impl ViewKind {
    /// Resolve a configured view name. `htmlview` only resolves when the
    /// client accepts HTML, so callers fall through to guessing otherwise.
    pub fn from_name(name: &str, supports_html: bool) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "htmlview" | "html" if supports_html => Some(ViewKind::Html),
            "textview" | "text" => Some(ViewKind::Text),
            "passthroughview" | "passthrough" => Some(ViewKind::Passthrough),
            _ => None,
        }
    }

    /// Whether `name` is any view name, regardless of client support.
    pub fn is_known_name(name: &str) -> bool {
        ViewKind::from_name(name, true).is_some()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Html => "htmlview",
            ViewKind::Text => "textview",
            ViewKind::Passthrough => "passthroughview",
        }
    }
}

/// Response headers plus the lazy body of a rendered view.
pub struct RenderedView {
    pub headers: HeaderMap,
    pub chunks: ChunkIter,
}

/// Build the requested view over `lines`. `source_headers` are only used by
/// the passthrough view, which forwards them.
pub fn render(kind: ViewKind, lines: FilteredLines, source_headers: &HeaderMap) -> RenderedView {
    match kind {
        ViewKind::Html => RenderedView {
            headers: HtmlView::headers(),
            chunks: Box::new(HtmlView::new(lines)),
        },
        ViewKind::Text => RenderedView {
            headers: TextView::headers(),
            chunks: Box::new(TextView::new(lines)),
        },
        ViewKind::Passthrough => RenderedView {
            headers: PassthroughView::headers(source_headers, lines.is_lossless()),
            chunks: Box::new(PassthroughView::new(lines)),
        },
    }
}
