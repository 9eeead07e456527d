use crate::conf::ObjectStoreConfig;
use crate::render::headers::HeaderBuilder;
use crate::source::{Compression, LineIter, LineSource, RawLines};
use http::{HeaderMap, header};
use reqwest::blocking::Client;
use std::io::{BufRead, BufReader};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const HOP_BY_HOP: [header::HeaderName; 6] = [
    header::CONNECTION,
    header::TRANSFER_ENCODING,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
    header::PROXY_AUTHENTICATE,
];

#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    #[error("object store base url '{0}' cannot carry a path")]
    BaseUrl(String),

    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Blocking client for a container in a Swift-style object store.
///
/// The underlying HTTP client pools its connections and is shared by
/// every request that falls back to the store.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    client: Client,
    base_url: Url,
    container: String,
}

impl ObjectStore {
    pub fn new(config: &ObjectStoreConfig) -> Result<Self, ObjectStoreError> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ObjectStoreError::BaseUrl(config.base_url.clone()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            container: config.container.clone(),
        })
    }

    /// `<base_url>/<container>/<name>`
    pub fn object_url(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&self.container)
                .extend(name.split('/').filter(|s| !s.is_empty()));
        }
        url
    }

    /// Fetch an object. Missing objects and transport failures both come
    /// back as `None`.
    pub fn fetch(&self, name: &str) -> Option<ObjectSource> {
        let url = self.object_url(name);

        let response = match self.client.get(url.clone()).send() {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "object store request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(url = %url, status = %response.status(), "object not available");
            return None;
        }

        let compression = Compression::from_name(name);

        let mut headers = HeaderBuilder::from_map(response.headers().clone());
        for hop in HOP_BY_HOP {
            headers.remove(hop);
        }
        if compression.is_some() {
            headers.remove(header::CONTENT_LENGTH);
            headers.remove(header::CONTENT_ENCODING);
        }
        headers.filename(name);

        let body: Box<dyn BufRead + Send> = match compression {
            Some(compression) => compression.decoder(response),
            None => Box::new(BufReader::new(response)),
        };

        Some(ObjectSource {
            name: name.to_string(),
            headers: headers.build(),
            body,
        })
    }
}

/// An object streamed from the store.
pub struct ObjectSource {
    name: String,
    headers: HeaderMap,
    body: Box<dyn BufRead + Send>,
}

impl LineSource for ObjectSource {
    fn logical_name(&self) -> &str {
        &self.name
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn into_lines(self: Box<Self>) -> LineIter {
        let ObjectSource { name, body, .. } = *self;
        Box::new(RawLines::new(body, name))
    }
}
