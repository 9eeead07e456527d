//! Where raw lines come from: files under the log root, a remote object
//! store, or a generated directory index.

mod compression;
mod disk;
mod index;
mod lines;
mod object_store;
mod resolve;

#[cfg(test)]
mod tests;

pub use compression::Compression;
pub use disk::{DiskSource, generate_etag, guess_content_type};
pub use index::{IndexSource, sizeof_fmt};
pub use lines::{MAX_LINE_LEN, RawLines};
pub use object_store::{ObjectSource, ObjectStore, ObjectStoreError};
pub use resolve::{Resolved, log_name, safe_path};

use bytes::Bytes;
use http::HeaderMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A boxed, forward-only sequence of raw lines (terminators included).
pub type LineIter = Box<dyn Iterator<Item = Bytes> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Index,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("unsafe path '{0}'")]
    UnsafePath(String),

    #[error("no such file '{0}'")]
    NoSuchFile(String),

    #[error("failed to open '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait LineSource: Send {
    /// Name used for severity support and file condition matching.
    fn logical_name(&self) -> &str;

    /// Lower-case header names describing the source content.
    fn headers(&self) -> &HeaderMap;

    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn into_lines(self: Box<Self>) -> LineIter;
}

/// Per-request knobs for [`open_source`].
#[derive(Default)]
pub struct SourceOptions<'a> {
    pub generate_folder_index: bool,
    pub object_store: Option<&'a ObjectStore>,
    /// Ask the object store before looking on disk.
    pub prefer_object_store: bool,
}

/// Open the source behind `name`: a file on disk, then the object store,
/// then a directory index. With `prefer_object_store` the store is asked
/// first and the disk file is still served when it has nothing.
pub fn open_source(
    root: &Path,
    name: &str,
    opts: &SourceOptions<'_>,
) -> Result<Box<dyn LineSource>, SourceError> {
    let resolved = safe_path(root, name)?;
    let fetch = |store: &ObjectStore| store.fetch(name);

    if opts.prefer_object_store {
        if let Some(object) = opts.object_store.and_then(fetch) {
            return Ok(Box::new(object));
        }
    }

    if let Resolved::File(path) = &resolved {
        return Ok(Box::new(DiskSource::open(name, path)?));
    }

    if !opts.prefer_object_store {
        if let Some(object) = opts.object_store.and_then(fetch) {
            return Ok(Box::new(object));
        }
    }

    if let Resolved::Directory(dir) = &resolved {
        if opts.generate_folder_index {
            if let Some(index) = IndexSource::scan(name, dir) {
                return Ok(Box::new(index));
            }
        }
    }

    debug!(log_name = %name, "no source found");
    Err(SourceError::NoSuchFile(name.to_string()))
}
