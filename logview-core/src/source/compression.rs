use bzip2_rs::DecoderReader as Bz2DecoderReader;
use flate2::read::MultiGzDecoder;
use std::io::{BufRead, BufReader, Read};

/// Compressed log formats that are decompressed on the fly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Bzip2,
}

impl Compression {
    /// Detect compression from a log name's extension.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.ends_with(".gz") {
            Some(Compression::Gzip)
        } else if name.ends_with(".bz2") {
            Some(Compression::Bzip2)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Compression::Gzip => ".gz",
            Compression::Bzip2 => ".bz2",
        }
    }

    /// The name without its compression extension, if it had one.
    pub fn strip_extension(name: &str) -> &str {
        Compression::from_name(name)
            .and_then(|c| name.strip_suffix(c.extension()))
            .unwrap_or(name)
    }

    pub fn decoder<R>(self, reader: R) -> Box<dyn BufRead + Send>
    where
        R: Read + Send + 'static,
    {
        match self {
            // Concatenated gzip members are common in rotated logs.
            Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(reader))),
            Compression::Bzip2 => Box::new(BufReader::new(Bz2DecoderReader::new(reader))),
        }
    }
}
