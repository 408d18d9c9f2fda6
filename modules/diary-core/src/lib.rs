pub mod config;
pub mod error;
pub mod fetch;
pub mod pagination;
pub mod parser;
pub mod slug;
pub mod types;

pub use config::DiaryConfig;
pub use error::{DiaryError, Result};
pub use fetch::{DiaryFetcher, MockFetcher, PageFetcher};
pub use letterboxd_client::RawPage;
pub use pagination::remaining_page_urls;
pub use parser::{parse_page, parse_row};
pub use slug::strip_year_suffix;
pub use types::{DiaryResult, Entry, PageBundle, ProfileIdentity};

/// Fetch a whole diary with configuration from the environment.
pub async fn fetch_all_entries(profile_url: &str) -> anyhow::Result<DiaryResult> {
    let fetcher = DiaryFetcher::from_config(DiaryConfig::from_env())?;
    Ok(fetcher.fetch_all_entries(profile_url).await?)
}
