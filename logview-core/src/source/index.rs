use crate::render::escape_html;
use crate::render::headers::HeaderBuilder;
use crate::source::{LineIter, LineSource, SourceKind};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::HeaderMap;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::path::Path;
use tracing::warn;

const HREF: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%');

#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexEntry {
    link: String,
    name: String,
    mtime: String,
    size: String,
}

/// Generated HTML listing of a directory under the root.
pub struct IndexSource {
    name: String,
    headers: HeaderMap,
    page: String,
}

impl IndexSource {
    /// Returns `None` for unreadable or empty directories.
    pub fn scan(name: &str, dir: &Path) -> Option<Self> {
        let entries = match list_entries(name, dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cannot list directory");
                return None;
            }
        };

        if entries.is_empty() {
            return None;
        }

        let mut headers = HeaderBuilder::default();
        headers.content_type("text/html");

        Some(Self {
            name: name.to_string(),
            headers: headers.build(),
            page: render_index(name, &entries),
        })
    }
}

impl LineSource for IndexSource {
    fn logical_name(&self) -> &str {
        &self.name
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Index
    }

    fn into_lines(self: Box<Self>) -> LineIter {
        let lines: Vec<Bytes> = self
            .page
            .split_inclusive('\n')
            .map(|line| Bytes::copy_from_slice(line.as_bytes()))
            .collect();
        Box::new(lines.into_iter())
    }
}

fn list_entries(name: &str, dir: &Path) -> std::io::Result<Vec<IndexEntry>> {
    let base = name.trim_matches('/');
    let mut entries = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;

        let mut file_name = entry.file_name().to_string_lossy().into_owned();
        if metadata.is_dir() && !file_name.ends_with('/') {
            file_name.push('/');
        }

        let link = if base.is_empty() {
            format!("/{file_name}")
        } else {
            format!("/{base}/{file_name}")
        };

        let mtime = metadata
            .modified()
            .map(|t| DateTime::<Utc>::from(t).format("%Y-%m-%dT%H:%M:%S").to_string())
            .unwrap_or_default();

        entries.push(IndexEntry {
            link,
            name: file_name,
            mtime,
            size: sizeof_fmt(metadata.len()),
        });
    }

    entries.sort_by(|a, b| a.link.cmp(&b.link));
    Ok(entries)
}

fn render_index(name: &str, entries: &[IndexEntry]) -> String {
    let title = escape_html(&format!("/{}", name.trim_matches('/')));
    let mut html = String::with_capacity(256 + entries.len() * 128);

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>Index of {title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>Index of {title}</h1>\n"));
    html.push_str("<table>\n");
    html.push_str(
        "<tr><th>Name</th><th>Last Modified</th><th style=\"text-align: right\">Size</th></tr>\n",
    );

    for entry in entries {
        html.push_str(&format!(
            "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td style=\"text-align: right\">{}</td></tr>\n",
            utf8_percent_encode(&entry.link, HREF),
            escape_html(&entry.name),
            entry.mtime,
            entry.size,
        ));
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

/// Human readable size, e.g. `277.4KB`.
pub fn sizeof_fmt(num: u64) -> String {
    let mut num = num as f64;
    for unit in ["", "K", "M", "G", "T", "P", "E", "Z"] {
        if num.abs() < 1024.0 {
            return format!("{num:3.1}{unit}B");
        }
        num /= 1024.0;
    }
    format!("{num:.1}YB")
}
