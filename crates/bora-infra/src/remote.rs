//! Remote file access for the version check

use std::time::Duration;

use bora_types::{Error, Result};
use tracing::debug;

/// Source of remotely published files
pub trait RemoteSource {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;

    fn fetch_text(&self, url: &str) -> Result<String> {
        let bytes = self.fetch_bytes(url)?;
        String::from_utf8(bytes).map_err(|e| Error::Network(format!("{}: {}", url, e)))
    }
}

/// Blocking HTTP client
pub struct HttpRemoteSource {
    client: reqwest::blocking::Client,
}

impl HttpRemoteSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

impl RemoteSource for HttpRemoteSource {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "fetching");
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Network(e.to_string()))?;
        let bytes = response
            .bytes()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
