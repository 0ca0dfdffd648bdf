pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::config::FeedSource;
use crate::fetcher::http_fetcher::HttpFetcher;

#[derive(Debug)]
pub enum FetchResult {
    /// New content fetched successfully
    Content { body: Vec<u8> },
    /// Content not modified since the last fetch (HTTP 304)
    NotModified,
}

#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, source: &FeedSource) -> Result<FetchResult>;
}

/// Reads URLs over HTTP and paths from the local filesystem.
pub struct SourceFetcher {
    http: HttpFetcher,
}

impl SourceFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new()?,
        })
    }
}

#[async_trait]
impl Fetcher for SourceFetcher {
    async fn fetch(&self, source: &FeedSource) -> Result<FetchResult> {
        match source {
            FeedSource::Url(url) => self.http.fetch(url.as_str()).await,
            FeedSource::Path(path) => {
                let body = tokio::fs::read(path).await?;
                Ok(FetchResult::Content { body })
            }
        }
    }
}
