use crate::render::headers::HeaderBuilder;
use crate::source::{Compression, LineIter, LineSource, RawLines, SourceError};
use http::HeaderMap;
use httpdate::fmt_http_date;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const SNIFF_LEN: usize = 512;

/// A log file under the root directory.
pub struct DiskSource {
    name: String,
    path: PathBuf,
    headers: HeaderMap,
    reader: Box<dyn BufRead + Send>,
}

impl DiskSource {
    pub fn open(name: &str, path: &Path) -> Result<Self, SourceError> {
        let io_err = |source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let metadata = file.metadata().map_err(io_err)?;
        let modified = metadata.modified().ok();
        let compression = Compression::from_name(&path.to_string_lossy());

        let mut headers = HeaderBuilder::default();
        headers.filename(name);
        headers.content_type(&guess_content_type(path));
        // Decompressed size is unknown up front.
        if compression.is_none() {
            headers.content_length(metadata.len());
        }
        headers.accept_ranges();
        if let Some(modified) = modified {
            headers.last_modified(&fmt_http_date(modified));
        }
        headers.etag(&generate_etag(metadata.len(), modified));
        headers.date(&fmt_http_date(SystemTime::now()));

        let reader: Box<dyn BufRead + Send> = match compression {
            Some(compression) => compression.decoder(file),
            None => Box::new(BufReader::new(file)),
        };

        Ok(Self {
            name: name.to_string(),
            path: path.to_path_buf(),
            headers: headers.build(),
            reader,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for DiskSource {
    fn logical_name(&self) -> &str {
        &self.name
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn into_lines(self: Box<Self>) -> LineIter {
        let DiskSource { name, reader, .. } = *self;
        Box::new(RawLines::new(reader, name))
    }
}

/// Content type from the file name, falling back to a look at the first
/// bytes for names `mime_guess` does not know.
pub fn guess_content_type(path: &Path) -> String {
    if let Some(mime) = mime_guess::from_path(path).first() {
        return mime.essence_str().to_string();
    }
    sniff_content_type(path).to_string()
}

fn sniff_content_type(path: &Path) -> &'static str {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    let read = File::open(path).and_then(|f| f.take(SNIFF_LEN as u64).read_to_end(&mut head));
    if read.is_err() {
        return "application/octet-stream";
    }

    let text = match std::str::from_utf8(&head) {
        Ok(_) => true,
        // A multi-byte character cut off by the sniff window is still text.
        Err(e) => e.error_len().is_none(),
    };

    if text && !head.contains(&0) {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

/// Weak ETag from file size and modification time.
pub fn generate_etag(size: u64, modified: Option<SystemTime>) -> String {
    let mtime_secs = modified
        .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("W/\"{:x}-{:x}\"", size, mtime_secs)
}
