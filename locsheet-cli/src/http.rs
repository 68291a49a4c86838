//! HTTP sheet fetcher over a blocking reqwest client.

use std::time::Duration;

use locsheet::{CancellationToken, Error, Fetcher};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads the published sheet CSV from a URL. Non-success status codes
/// are transport errors; cancellation is checked around the request (the
/// blocking transfer itself is bounded by the timeout).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    url: String,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        HttpFetcher { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, cancel: &CancellationToken) -> Result<String, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::fetch_error(e.to_string()))?;
        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| Error::fetch_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::fetch_error(format!(
                "HTTP status {} from {}",
                response.status(),
                self.url
            )));
        }
        let body = response
            .text()
            .map_err(|e| Error::fetch_error(e.to_string()))?;
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(body)
    }
}
