//! The polling loop: fetch, relay, persist, sleep, repeat.

use chrono::Utc;

use crate::app::AppContext;
use crate::config::format_interval;
use crate::domain::SeenSet;
use crate::store::SeenStore;

/// Totals for one poll cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub new_entries: usize,
    pub chunks_sent: usize,
    pub chunks_failed: usize,
    pub chunks_skipped: usize,
    /// Entries left unsent by a shutdown; they stay unseen
    pub entries_deferred: usize,
    pub poll_failed: bool,
}

/// Daemon runner
pub struct Daemon {
    ctx: AppContext,
}

impl Daemon {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Run until shutdown, or for a single cycle with `--once`.
    ///
    /// The seen set is loaded once here and saved at the end of every cycle.
    pub async fn run(&self) {
        let config = &self.ctx.config;
        let mut seen = self.ctx.store.load();

        tracing::info!(
            "meshfeed started (feed: {}, poll interval: {}, demo mode: {}, PID: {})",
            config.feed,
            format_interval(config.poll_interval.as_secs()),
            config.sender.demo_mode,
            std::process::id()
        );

        loop {
            self.run_cycle(&mut seen).await;

            if config.run_once || self.ctx.shutdown.is_triggered() {
                break;
            }

            if !self.ctx.shutdown.sleep(config.poll_interval).await {
                break;
            }
        }

        tracing::info!("meshfeed shutting down");
    }

    /// One cycle: poll, relay each new entry in order, then persist.
    ///
    /// A poll failure is logged and the cycle moves straight on to saving.
    pub async fn run_cycle(&self, seen: &mut SeenSet) -> CycleReport {
        let start = Utc::now();
        let mut report = CycleReport::default();

        match self.ctx.poller.poll(&self.ctx.config.feed, seen).await {
            Ok(entries) => {
                report.new_entries = entries.len();

                for (i, entry) in entries.iter().enumerate() {
                    if self.ctx.shutdown.is_triggered() {
                        // never attempted, so let the next run pick them up
                        for deferred in &entries[i..] {
                            seen.remove(&deferred.id);
                        }
                        report.entries_deferred = entries.len() - i;
                        tracing::warn!(
                            "Shutdown requested, deferring {} entries",
                            report.entries_deferred
                        );
                        break;
                    }

                    let dispatched = self.ctx.dispatcher.dispatch(entry).await;
                    report.chunks_sent += dispatched.sent;
                    report.chunks_failed += dispatched.failed;
                    report.chunks_skipped += dispatched.skipped;
                }
            }
            Err(e) => {
                report.poll_failed = true;
                tracing::error!("Failed to poll feed {}: {}", self.ctx.config.feed, e);
            }
        }

        if let Err(e) = self.ctx.store.save(seen) {
            tracing::error!(
                "Failed to save seen entries to {}: {}",
                self.ctx.store.path().display(),
                e
            );
        }

        let elapsed = Utc::now().signed_duration_since(start);
        tracing::info!(
            "Cycle complete: {} new entries, {} messages sent, {} failed ({:.1}s)",
            report.new_entries,
            report.chunks_sent,
            report.chunks_failed,
            elapsed.num_milliseconds() as f64 / 1000.0
        );

        report
    }
}
