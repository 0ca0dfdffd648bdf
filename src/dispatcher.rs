//! Turns one feed entry into numbered mesh messages.

use crate::domain::FeedEntry;
use crate::normalizer::strip_markup;
use crate::sender::MessageSender;
use crate::splitter::split_numbered;

/// Outcome of relaying one entry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub sent: usize,
    pub failed: usize,
    /// Chunks never attempted because shutdown was requested
    pub skipped: usize,
}

pub struct EntryDispatcher {
    sender: MessageSender,
}

impl EntryDispatcher {
    pub fn new(sender: MessageSender) -> Self {
        Self { sender }
    }

    /// Send the headline, then the plain-text description if there is one.
    ///
    /// Numbering starts at 1 for every entry and runs across both messages.
    /// A chunk that cannot be delivered does not stop the ones after it.
    pub async fn dispatch(&self, entry: &FeedEntry) -> DispatchReport {
        tracing::info!("Relaying entry: {}", entry.title);

        let mut report = DispatchReport::default();
        let next = self.send_message(&entry.headline(), 1, &mut report).await;

        if let Some(description) = entry.description.as_deref() {
            let plain = strip_markup(description);
            self.send_message(&plain, next, &mut report).await;
        }

        report
    }

    /// Returns the number the following message should start at.
    async fn send_message(&self, text: &str, start: usize, report: &mut DispatchReport) -> usize {
        let chunks = split_numbered(text, start);
        let next = start + chunks.len();

        for chunk in &chunks {
            if self.sender.is_shutting_down() {
                report.skipped += 1;
                continue;
            }

            if self.sender.send_chunk(chunk).await {
                report.sent += 1;
                self.sender.pace().await;
            } else {
                report.failed += 1;
            }
        }

        next
    }
}
