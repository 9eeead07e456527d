use crate::pipeline::{FilterKind, FilterOptions};
use crate::render::{ViewKind, render};
use crate::source::RawLines;
use anyhow::{Context, Result};
use http::HeaderMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Render a file (or stdin) as HTML without filtering. Handy for checking
/// what the server would send for a log.
pub fn htmlify(path: Option<&Path>) -> Result<()> {
    let (reader, name): (Box<dyn BufRead + Send>, String) = match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            (Box::new(BufReader::new(file)), path.display().to_string())
        }
        None => (Box::new(BufReader::new(io::stdin())), "-".to_string()),
    };

    let lines = FilterKind::None.apply(
        &name,
        RawLines::new(reader, name.clone()),
        &FilterOptions::default(),
    );
    let view = render(ViewKind::Html, lines, &HeaderMap::new());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for chunk in view.chunks {
        out.write_all(&chunk).context("failed to write to stdout")?;
    }
    out.flush().context("failed to flush stdout")?;
    Ok(())
}
