// src/core/net.rs
// Fetch capability: URL in, raw HTML text out.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::config::options::ScrapeOptions;
use crate::error::{Error, FetchError, Result};

/// Anything that can turn a URL into page text.
/// `Sync` so one fetcher can serve every worker of a parallel scrape.
pub trait Fetch: Sync {
    fn fetch(&self, url: &Url) -> std::result::Result<String, FetchError>;
}

/// Blocking HTTP fetcher. Non-2xx statuses are errors; there is no retry.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(opts: &ScrapeOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &Url) -> std::result::Result<String, FetchError> {
        debug!(%url, "GET");
        let resp = self.client.get(url.as_str()).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16() });
        }
        Ok(resp.text()?)
    }
}

/// Serves pages from memory, keyed by absolute URL. Unknown URLs are errors.
/// Used for offline runs against saved pages.
#[derive(Clone, Debug, Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self { Self::default() }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert(url, html);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.insert(url.into(), html.into());
    }
}

impl Fetch for MemoryFetcher {
    fn fetch(&self, url: &Url) -> std::result::Result<String, FetchError> {
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| FetchError::Unavailable(format!("no page stored for {url}")))
    }
}
