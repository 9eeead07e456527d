use crate::source::SourceError;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    File(PathBuf),
    Directory(PathBuf),
    /// Nothing on disk. The path is still safe to look up elsewhere.
    Missing(PathBuf),
}

/// Logical log name for a request path: everything after the first
/// `htmlify/` if present, otherwise the path without its leading `/`.
pub fn log_name(request_path: &str) -> Result<String, SourceError> {
    let path = request_path.strip_prefix('/').unwrap_or(request_path);
    let raw = match path.find("htmlify/") {
        Some(idx) => &path[idx + "htmlify/".len()..],
        None => path,
    };

    // Percent-decode ONCE
    percent_encoding::percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| SourceError::UnsafePath(raw.to_string()))
}

/// Resolve `name` under `root`, refusing anything that could end up
/// outside of it.
pub fn safe_path(root: &Path, name: &str) -> Result<Resolved, SourceError> {
    let unsafe_path = || SourceError::UnsafePath(name.to_string());
    let relative = PathBuf::from(name);

    for component in relative.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            // ParentDir, RootDir, Prefix (Windows)
            _ => return Err(unsafe_path()),
        }
    }

    let full_path = root.join(&relative);

    let Ok(target) = full_path.canonicalize() else {
        return Ok(Resolved::Missing(full_path));
    };

    let root = root.canonicalize().map_err(|_| unsafe_path())?;

    // Symlinks may still point outside the root.
    if !target.starts_with(&root) {
        return Err(unsafe_path());
    }

    if target.is_dir() {
        Ok(Resolved::Directory(target))
    } else if target.is_file() {
        Ok(Resolved::File(target))
    } else {
        Ok(Resolved::Missing(target))
    }
}
