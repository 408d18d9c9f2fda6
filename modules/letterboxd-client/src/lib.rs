pub mod error;

pub use error::{ClientError, Result};

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Status and body of a completed GET. Non-2xx statuses are not errors here;
/// callers decide what a status means.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub status: u16,
    pub body: String,
}

impl RawPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct LetterboxdClient {
    client: reqwest::Client,
}

impl LetterboxdClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// GET a page with the given headers attached as-is.
    pub async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<RawPage> {
        let header_map = build_headers(headers)?;

        let resp = self.client.get(url).headers(header_map).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        tracing::debug!(url, status, bytes = body.len(), "Fetched page");

        Ok(RawPage { status, body })
    }
}

fn build_headers(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
        map.append(header_name, header_value);
    }
    Ok(map)
}
