use std::env;
use std::time::Duration;

const DEFAULT_ALLOWED_ORIGIN: &str = "https://letterboxd.com/";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_CONCURRENT_PAGES: usize = 10;

/// Diary fetch configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DiaryConfig {
    /// Profile URLs must start with this prefix.
    pub allowed_origin: String,

    // Request headers
    pub user_agent: String,
    pub accept_language: String,

    // HTTP client
    pub request_timeout: Duration,
    pub max_concurrent_pages: usize,
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self {
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrent_pages: DEFAULT_MAX_CONCURRENT_PAGES,
        }
    }
}

impl DiaryConfig {
    /// Load `.env` if present, then read `DIARY_*` variables. Unset or
    /// unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            allowed_origin: lookup("DIARY_ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin),
            user_agent: lookup("DIARY_USER_AGENT").unwrap_or(defaults.user_agent),
            accept_language: lookup("DIARY_ACCEPT_LANGUAGE").unwrap_or(defaults.accept_language),
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DIARY_REQUEST_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            max_concurrent_pages: parse_or(
                &lookup,
                "DIARY_MAX_CONCURRENT_PAGES",
                DEFAULT_MAX_CONCURRENT_PAGES,
            )
            .max(1),
        }
    }

    /// Headers sent with every page request.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("Accept-Language".to_string(), self.accept_language.clone()),
        ]
    }

    pub fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  DIARY_ALLOWED_ORIGIN: {}", self.allowed_origin);
        tracing::info!("  DIARY_USER_AGENT: {}", self.user_agent);
        tracing::info!("  DIARY_ACCEPT_LANGUAGE: {}", self.accept_language);
        tracing::info!(
            "  DIARY_REQUEST_TIMEOUT_SECS: {}",
            self.request_timeout.as_secs()
        );
        tracing::info!(
            "  DIARY_MAX_CONCURRENT_PAGES: {}",
            self.max_concurrent_pages
        );
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = raw.as_str(), "Invalid number, using default");
            default
        }),
        None => default,
    }
}
