use http::{HeaderMap, HeaderName, HeaderValue, header};

/// `filename` is not a registered header, but clients of the log server
/// rely on it to name downloads.
pub(crate) const FILENAME: HeaderName = HeaderName::from_static("filename");

#[derive(Debug, Default)]
pub(crate) struct HeaderBuilder {
    headers: HeaderMap,
}

impl HeaderBuilder {
    pub(crate) fn from_map(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Inserts (or removes) a header from the header map.
    ///
    /// A value that cannot be represented as a `HeaderValue`, or an empty
    /// value, removes the header instead.
    pub(crate) fn insert(&mut self, header_name: HeaderName, value: &str) {
        let header_value = HeaderValue::from_str(value).unwrap_or(HeaderValue::from_static(""));
        if header_value.is_empty() {
            self.headers.remove(header_name);
        } else {
            self.headers.insert(header_name, header_value);
        }
    }

    pub(crate) fn remove(&mut self, header_name: HeaderName) {
        self.headers.remove(header_name);
    }

    pub(crate) fn accept_ranges(&mut self) {
        self.insert(header::ACCEPT_RANGES, "bytes");
    }

    pub(crate) fn content_type(&mut self, value: &str) {
        self.insert(header::CONTENT_TYPE, value);
    }

    pub(crate) fn content_length(&mut self, value: u64) {
        self.insert(header::CONTENT_LENGTH, &value.to_string());
    }

    pub(crate) fn etag(&mut self, value: &str) {
        self.insert(header::ETAG, value);
    }

    pub(crate) fn last_modified(&mut self, value: &str) {
        self.insert(header::LAST_MODIFIED, value);
    }

    pub(crate) fn date(&mut self, value: &str) {
        self.insert(header::DATE, value);
    }

    pub(crate) fn filename(&mut self, value: &str) {
        self.insert(FILENAME, value);
    }

    pub(crate) fn build(self) -> HeaderMap {
        self.headers
    }
}
