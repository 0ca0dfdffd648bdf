use std::sync::Arc;

use crate::app::Result;
use crate::config::Config;
use crate::dispatcher::EntryDispatcher;
use crate::fetcher::{Fetcher, SourceFetcher};
use crate::normalizer::Normalizer;
use crate::poller::FeedPoller;
use crate::sender::{MeshtasticCli, MessageSender, Transport};
use crate::shutdown::Shutdown;
use crate::store::JsonSeenStore;

pub struct AppContext {
    pub config: Config,
    pub store: JsonSeenStore,
    pub poller: FeedPoller,
    pub dispatcher: EntryDispatcher,
    pub shutdown: Shutdown,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(SourceFetcher::new()?);
        let transport: Arc<dyn Transport + Send + Sync> =
            Arc::new(MeshtasticCli::new(config.meshtastic_bin.clone()));
        Ok(Self::with_parts(config, fetcher, transport))
    }

    /// Wire the components around the given fetcher and transport.
    pub fn with_parts(
        config: Config,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        transport: Arc<dyn Transport + Send + Sync>,
    ) -> Self {
        let shutdown = Shutdown::new();
        let store = JsonSeenStore::new(config.seen_entries_file.clone());
        let poller = FeedPoller::new(fetcher, Normalizer::new());
        let sender = MessageSender::new(transport, config.sender.clone(), shutdown.clone());
        let dispatcher = EntryDispatcher::new(sender);

        Self {
            config,
            store,
            poller,
            dispatcher,
            shutdown,
        }
    }
}
