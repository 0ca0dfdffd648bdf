use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::DEFAULT_POLL_INTERVAL_SECS;

/// Every option can be given as a flag or through its environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "meshfeed")]
#[command(about = "Relay new RSS/Atom entries to a Meshtastic mesh", long_about = None)]
pub struct Cli {
    /// Feed URL or local file path to poll
    #[arg(long, env = "FEED_URL")]
    pub feed_url: Option<String>,

    /// File holding the identifiers of already relayed entries
    #[arg(long, env = "SEEN_ENTRIES_FILE", default_value = "seen_entries.json")]
    pub seen_entries_file: PathBuf,

    /// Address of the Meshtastic device
    #[arg(long, env = "MESHTASTIC_HOST", default_value = "10.14.0.3")]
    pub meshtastic_host: String,

    /// Channel index to send on
    #[arg(long = "ch-index", env = "MESHTASTIC_CH_INDEX", default_value_t = 0)]
    pub ch_index: u32,

    /// Seconds to wait between send attempts
    #[arg(long, env = "SEND_DELAY", default_value_t = 10)]
    pub send_delay: u64,

    /// Attempts per message chunk before giving up on it
    #[arg(long, env = "MAX_RETRY_ATTEMPTS", default_value_t = 15)]
    pub max_retry_attempts: u32,

    /// Log messages instead of sending them
    #[arg(
        long,
        env = "DEMOMODE",
        default_value = "false",
        default_missing_value = "true",
        num_args = 0..=1,
        action = ArgAction::Set,
        value_parser = parse_demo_mode
    )]
    pub demo_mode: bool,

    /// Time between feed polls (e.g., "600", "10m", "1h")
    #[arg(long, env = "POLL_INTERVAL", default_value_t = DEFAULT_POLL_INTERVAL_SECS.to_string())]
    pub poll_interval: String,

    /// Meshtastic CLI executable
    #[arg(long, env = "MESHTASTIC_BIN", default_value = "meshtastic")]
    pub meshtastic_bin: String,

    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,
}

/// Only a case-insensitive "true" enables demo mode.
fn parse_demo_mode(s: &str) -> Result<bool, String> {
    Ok(s.trim().eq_ignore_ascii_case("true"))
}
