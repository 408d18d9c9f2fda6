// Diary fetch: first page, then pages 2..N concurrently, merged by page number.
//
// The network sits behind the PageFetcher trait. Production wires in
// LetterboxdClient; tests use MockFetcher.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use letterboxd_client::{LetterboxdClient, RawPage};
use tracing::{debug, info, warn};

use crate::config::DiaryConfig;
use crate::error::{DiaryError, Result};
use crate::pagination::remaining_page_urls;
use crate::parser::parse_page;
use crate::types::{DiaryResult, PageBundle};

/// Fetch capability supplied by the host: one GET with headers attached as-is.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, headers: &[(String, String)]) -> anyhow::Result<RawPage>;
}

#[async_trait]
impl PageFetcher for LetterboxdClient {
    async fn fetch(&self, url: &str, headers: &[(String, String)]) -> anyhow::Result<RawPage> {
        Ok(self.get(url, headers).await?)
    }
}

pub struct DiaryFetcher {
    fetcher: Arc<dyn PageFetcher>,
    config: DiaryConfig,
}

impl DiaryFetcher {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: DiaryConfig) -> Self {
        Self { fetcher, config }
    }

    /// Build a fetcher backed by a real HTTP client.
    pub fn from_config(config: DiaryConfig) -> anyhow::Result<Self> {
        let client = LetterboxdClient::new(config.request_timeout)?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Fetch every page of a diary and merge the entries in page order.
    ///
    /// Any failed page fails the whole request; partial results are never
    /// returned.
    pub async fn fetch_all_entries(&self, profile_url: &str) -> Result<DiaryResult> {
        if !profile_url.starts_with(&self.config.allowed_origin) {
            warn!(url = profile_url, "Rejected profile URL outside allowed origin");
            return Err(DiaryError::DisallowedOrigin {
                url: profile_url.to_string(),
                allowed: self.config.allowed_origin.clone(),
            });
        }

        info!(url = profile_url, "Fetching diary");
        let headers = self.config.headers();

        let first = self.fetch_page(profile_url, 1, &headers).await?;
        let page_urls = remaining_page_urls(profile_url, first.page_count);
        info!(
            url = profile_url,
            page_count = first.page_count,
            "First page parsed, fetching remaining pages"
        );

        let mut rest: Vec<(usize, PageBundle)> = stream::iter(page_urls.iter().enumerate())
            .map(|(offset, url)| {
                let page = offset + 2;
                let headers = &headers;
                async move {
                    let bundle = self.fetch_page(url, page, headers).await?;
                    Ok::<_, DiaryError>((page, bundle))
                }
            })
            .buffer_unordered(self.config.max_concurrent_pages.max(1))
            .try_collect()
            .await?;

        // Completion order is arbitrary; page order is restored here.
        rest.sort_by_key(|(page, _)| *page);

        let mut entries = first.entries;
        for (_, bundle) in rest {
            entries.extend(bundle.entries);
        }

        info!(url = profile_url, entries = entries.len(), "Diary fetched");

        Ok(DiaryResult {
            entries,
            identity: first.identity,
        })
    }

    async fn fetch_page(
        &self,
        url: &str,
        page: usize,
        headers: &[(String, String)],
    ) -> Result<PageBundle> {
        let raw = self.fetcher.fetch(url, headers).await.map_err(|e| {
            warn!(url, page, error = %e, "Page fetch failed");
            DiaryError::Fetch {
                url: url.to_string(),
                message: format!("{e:#}"),
            }
        })?;

        if !raw.is_success() {
            warn!(url, page, status = raw.status, "Page fetch returned error status");
            return Err(DiaryError::Status {
                url: url.to_string(),
                status: raw.status,
            });
        }

        let bundle = parse_page(&raw.body);
        debug!(url, page, entries = bundle.entries.len(), "Parsed page");
        Ok(bundle)
    }
}

// ---------------------------------------------------------------------------
// MockFetcher (for tests)
// ---------------------------------------------------------------------------

enum MockResponse {
    Page { status: u16, body: String },
    Failure(String),
}

/// Serves canned pages by URL and records every request.
pub struct MockFetcher {
    responses: HashMap<String, MockResponse>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    completed: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(self, url: &str, body: impl Into<String>) -> Self {
        self.with_status(url, 200, body)
    }

    pub fn with_status(mut self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.responses.insert(
            url.to_string(),
            MockResponse::Page {
                status,
                body: body.into(),
            },
        );
        self
    }

    pub fn with_failure(mut self, url: &str, message: &str) -> Self {
        self.responses
            .insert(url.to_string(), MockResponse::Failure(message.to_string()));
        self
    }

    /// Hold the response for `url` back by `delay`.
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// Every request as (url, headers), in the order issued.
    pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|(url, _)| url).collect()
    }

    /// URLs in the order their responses were produced.
    pub fn completed_urls(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str, headers: &[(String, String)]) -> anyhow::Result<RawPage> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), headers.to_vec()));

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        self.completed.lock().unwrap().push(url.to_string());

        match self.responses.get(url) {
            Some(MockResponse::Page { status, body }) => Ok(RawPage {
                status: *status,
                body: body.clone(),
            }),
            Some(MockResponse::Failure(message)) => anyhow::bail!("{message}"),
            None => anyhow::bail!("no canned response for {url}"),
        }
    }
}
