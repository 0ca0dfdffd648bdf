//! # meshfeed
//!
//! Relays new RSS/Atom entries to a Meshtastic radio mesh.
//!
//! ## Architecture
//!
//! ```text
//! Daemon → Poller (Fetcher → Normalizer) → Dispatcher → Splitter → Sender → Store
//! ```
//!
//! Every poll cycle fetches the feed, relays each entry that is not in the
//! seen set as numbered messages of at most 235 bytes, and saves the seen set.
//!
//! ## Quick Start
//!
//! ```bash
//! FEED_URL=https://blog.rust-lang.org/feed.xml DEMOMODE=true meshfeed --once
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components
/// from one immutable [`Config`](config::Config).
pub mod app;

/// Command-line interface using clap.
///
/// Every option doubles as an environment variable (`FEED_URL`,
/// `MESHTASTIC_HOST`, `DEMOMODE`, ...).
pub mod cli;

/// Validated runtime configuration.
pub mod config;

/// The polling loop.
pub mod daemon;

/// Entry-to-messages orchestration.
pub mod dispatcher;

/// Core domain models.
///
/// - [`FeedEntry`](domain::FeedEntry): one relayable feed entry
/// - [`MessageChunk`](domain::MessageChunk): numbered message fragment
/// - [`SeenSet`](domain::SeenSet): ids of entries already relayed
pub mod domain;

/// Feed retrieval over HTTP (with conditional requests) or from disk.
pub mod fetcher;

/// Feed parsing and markup stripping.
pub mod normalizer;

/// New-entry detection.
pub mod poller;

/// Mesh transport and retrying chunk sender.
pub mod sender;

/// Shutdown flag with interruptible sleeps, triggered by SIGINT/SIGTERM.
pub mod shutdown;

/// Byte-bounded word wrapping.
pub mod splitter;

/// Seen-set persistence.
pub mod store;
