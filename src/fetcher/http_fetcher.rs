use std::sync::Mutex;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, IF_MODIFIED_SINCE, IF_NONE_MATCH};
use reqwest::{Client, StatusCode};

use crate::app::Result;
use crate::fetcher::FetchResult;

const USER_AGENT: &str = concat!("meshfeed/", env!("CARGO_PKG_VERSION"));

/// Cache validators from the previous successful response.
#[derive(Debug, Default, Clone)]
struct Validators {
    etag: Option<String>,
    last_modified: Option<String>,
}

/// HTTP feed client that makes conditional requests.
///
/// Validators are kept in memory only; after a restart the first poll always
/// downloads the full feed.
pub struct HttpFetcher {
    client: Client,
    validators: Mutex<Validators>,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            validators: Mutex::new(Validators::default()),
        })
    }

    fn current_validators(&self) -> Validators {
        self.validators
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    fn remember(&self, validators: Validators) {
        if let Ok(mut guard) = self.validators.lock() {
            *guard = validators;
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchResult> {
        let previous = self.current_validators();
        let mut headers = HeaderMap::new();

        if let Some(etag) = previous.etag.as_deref() {
            if let Ok(value) = HeaderValue::from_str(etag) {
                headers.insert(IF_NONE_MATCH, value);
            }
        }

        if let Some(last_modified) = previous.last_modified.as_deref() {
            if let Ok(value) = HeaderValue::from_str(last_modified) {
                headers.insert(IF_MODIFIED_SINCE, value);
            }
        }

        let response = self.client.get(url).headers(headers).send().await?;

        if response.status() == StatusCode::NOT_MODIFIED {
            tracing::debug!("Feed {} not modified", url);
            return Ok(FetchResult::NotModified);
        }

        response.error_for_status_ref()?;

        let etag = response
            .headers()
            .get("etag")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let last_modified = response
            .headers()
            .get("last-modified")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response.bytes().await?.to_vec();

        self.remember(Validators {
            etag,
            last_modified,
        });

        Ok(FetchResult::Content { body })
    }
}
