//! Request-level failures. Field-level problems never surface here; the
//! parser resolves them to absent values.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiaryError>;

#[derive(Debug, Error)]
pub enum DiaryError {
    /// Profile URL is outside the allowed origin. Raised before any request.
    #[error("URL must start with {allowed}: {url}")]
    DisallowedOrigin { url: String, allowed: String },

    /// A page request did not complete.
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// A page request completed with a non-success status.
    #[error("Fetching {url} returned status {status}")]
    Status { url: String, status: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        let err = DiaryError::DisallowedOrigin {
            url: "https://example.com/evil".to_string(),
            allowed: "https://letterboxd.com/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "URL must start with https://letterboxd.com/: https://example.com/evil"
        );

        let err = DiaryError::Status {
            url: "https://letterboxd.com/jane/films/diary/page/2/".to_string(),
            status: 503,
        };
        assert!(err.to_string().contains("503"));
    }
}
