//! Runtime configuration for meshfeed.
//!
//! Built once at startup from the parsed [`Cli`](crate::cli::Cli) (flags or
//! environment variables) and shared read-only by every component.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::cli::Cli;

/// Hard cap on a rendered mesh message, "N: " prefix included.
pub const MAX_MESSAGE_BYTES: usize = 235;

/// Default time between feed polls.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Where the feed is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(Url),
    Path(PathBuf),
}

impl FeedSource {
    /// Classify a raw `FEED_URL` value.
    ///
    /// `http`/`https` URLs are fetched over the network, `file://` URLs and
    /// anything that does not parse as a URL are treated as local paths.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingFeedUrl);
        }

        match Url::parse(raw) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Url(url)),
                "file" => url
                    .to_file_path()
                    .map(Self::Path)
                    .map_err(|_| ConfigError::InvalidFeedSource(raw.to_string())),
                // Windows drive letters parse as a one-letter scheme
                scheme if scheme.len() == 1 => Ok(Self::Path(PathBuf::from(raw))),
                _ => Err(ConfigError::InvalidFeedSource(raw.to_string())),
            },
            Err(_) => Ok(Self::Path(PathBuf::from(raw))),
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Settings for sending chunks over the mesh.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub host: String,
    pub channel_index: u32,
    /// Wait between attempts, and after each successful real send
    pub send_delay: Duration,
    pub max_retry_attempts: u32,
    pub demo_mode: bool,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            host: "10.14.0.3".to_string(),
            channel_index: 0,
            send_delay: Duration::from_secs(10),
            max_retry_attempts: 15,
            demo_mode: false,
        }
    }
}

/// Main configuration struct.
#[derive(Debug, Clone)]
pub struct Config {
    pub feed: FeedSource,
    pub seen_entries_file: PathBuf,
    pub sender: SenderConfig,
    pub meshtastic_bin: String,
    pub poll_interval: Duration,
    pub run_once: bool,
}

impl Config {
    /// Validate parsed arguments into a configuration.
    ///
    /// A missing feed URL is an error; no default feed is ever guessed.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let raw_feed = cli.feed_url.as_deref().ok_or(ConfigError::MissingFeedUrl)?;
        let feed = FeedSource::parse(raw_feed)?;

        if cli.max_retry_attempts == 0 {
            return Err(ConfigError::ZeroRetryAttempts);
        }

        let poll_interval =
            parse_interval(&cli.poll_interval).map_err(ConfigError::InvalidInterval)?;
        if poll_interval == 0 {
            return Err(ConfigError::InvalidInterval(
                "poll interval must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            feed,
            seen_entries_file: cli.seen_entries_file.clone(),
            sender: SenderConfig {
                host: cli.meshtastic_host.clone(),
                channel_index: cli.ch_index,
                send_delay: Duration::from_secs(cli.send_delay),
                max_retry_attempts: cli.max_retry_attempts,
                demo_mode: cli.demo_mode,
            },
            meshtastic_bin: cli.meshtastic_bin.clone(),
            poll_interval: Duration::from_secs(poll_interval),
            run_once: cli.once,
        })
    }
}

/// Parse interval string like "600", "10m", "1h", "1d" into seconds
pub fn parse_interval(s: &str) -> Result<u64, String> {
    let s = s.trim().to_lowercase();

    if let Some(hours) = s.strip_suffix('h') {
        scaled(hours, 3600, "hours")
    } else if let Some(minutes) = s.strip_suffix('m') {
        scaled(minutes, 60, "minutes")
    } else if let Some(days) = s.strip_suffix('d') {
        scaled(days, 86400, "days")
    } else if let Some(secs) = s.strip_suffix('s') {
        scaled(secs, 1, "seconds")
    } else {
        s.parse::<u64>()
            .map_err(|_| format!("Invalid interval: {}. Use format like '600', '10m', '1h'", s))
    }
}

fn scaled(value: &str, unit_secs: u64, unit: &str) -> Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|_| format!("Invalid {}: {}", unit, value))?
        .checked_mul(unit_secs)
        .ok_or_else(|| format!("Interval too large: {} {}", value, unit))
}

/// Format interval for display
pub fn format_interval(secs: u64) -> String {
    if secs >= 86400 && secs % 86400 == 0 {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("FEED_URL environment variable is not set")]
    MissingFeedUrl,

    #[error("Unsupported feed source: {0}")]
    InvalidFeedSource(String),

    #[error("Invalid poll interval: {0}")]
    InvalidInterval(String),

    #[error("MAX_RETRY_ATTEMPTS must be at least 1")]
    ZeroRetryAttempts,
}
