//! Fetches the feed and picks out entries not relayed before.

use std::sync::Arc;

use crate::app::Result;
use crate::config::FeedSource;
use crate::domain::{FeedEntry, SeenSet};
use crate::fetcher::{FetchResult, Fetcher};
use crate::normalizer::Normalizer;

pub struct FeedPoller {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
}

impl FeedPoller {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, normalizer: Normalizer) -> Self {
        Self {
            fetcher,
            normalizer,
        }
    }

    /// Fetch `source` and return its unseen entries in feed order.
    ///
    /// Returned ids are added to `seen` right away, before anything is sent,
    /// so an entry whose messages later fail is not picked up again.
    pub async fn poll(&self, source: &FeedSource, seen: &mut SeenSet) -> Result<Vec<FeedEntry>> {
        tracing::info!("Checking feed: {}", source);

        match self.fetcher.fetch(source).await? {
            FetchResult::NotModified => {
                tracing::debug!("Feed {} not modified", source);
                Ok(Vec::new())
            }
            FetchResult::Content { body } => {
                let entries = self.normalizer.normalize(&body)?;
                Ok(take_new(entries, seen))
            }
        }
    }
}

/// Keep entries whose id is not in `seen`, marking each one as seen.
pub fn take_new(entries: Vec<FeedEntry>, seen: &mut SeenSet) -> Vec<FeedEntry> {
    entries
        .into_iter()
        .filter(|entry| {
            let is_new = seen.insert(entry.id.as_str());
            if is_new {
                tracing::info!("New entry found: {}", entry.title);
            }
            is_new
        })
        .collect()
}
