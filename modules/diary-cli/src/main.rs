use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use diary_core::{DiaryConfig, DiaryFetcher};

/// Fetch a Letterboxd film diary and print it as JSON.
#[derive(Parser)]
#[command(name = "diary", version)]
struct Cli {
    /// Diary URL, e.g. https://letterboxd.com/jane/films/diary/
    profile_url: String,

    /// Avatar to report when the profile has none
    #[arg(long, env = "DIARY_AVATAR_PLACEHOLDER")]
    avatar_placeholder: Option<String>,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = DiaryConfig::from_env();
    config.log_redacted();

    let fetcher = DiaryFetcher::from_config(config)?;
    let mut result = fetcher.fetch_all_entries(&cli.profile_url).await?;

    if result.identity.avatar_url.is_none() {
        result.identity.avatar_url = cli.avatar_placeholder;
    }

    info!(
        entries = result.len(),
        name = result.identity.display_name.as_str(),
        "Diary ready"
    );

    let json = if cli.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{json}");

    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "diary=info,diary_core=info";

/// `RUST_LOG` wins when set and valid; otherwise the crate defaults apply.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_default_levels() {
        let filter = log_filter(Some("diary_core=debug")).to_string();
        assert!(filter.contains("diary_core=debug"), "got {filter}");
        assert!(!filter.contains("diary_core=info"), "got {filter}");
    }

    #[test]
    fn defaults_apply_without_rust_log() {
        let filter = log_filter(None).to_string();
        assert!(filter.contains("diary=info"), "got {filter}");
        assert!(filter.contains("diary_core=info"), "got {filter}");
    }

    #[test]
    fn invalid_rust_log_falls_back_to_defaults() {
        let filter = log_filter(Some("diary_core=loud")).to_string();
        assert!(filter.contains("diary_core=info"), "got {filter}");
    }
}
