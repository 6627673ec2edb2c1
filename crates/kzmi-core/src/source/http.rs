//! HTTP(S) source backed by libcurl.

use anyhow::Result;
use std::time::Duration;
use url::Url;

use super::{FetchError, MapSource, JSON_EXT};
use crate::config::KzmiConfig;
use crate::record::{records_from_slice, Record};
use crate::retry::{run_with_retry, RetryPolicy};

const USER_AGENT: &str = concat!("kzmi/", env!("CARGO_PKG_VERSION"));

/// Fetches category arrays from a remote root such as the kz-map-info raw
/// GitHub tree.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    connect_timeout: Duration,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HttpSource {
    /// `base_url` is treated as a directory: a missing trailing `/` is added.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        })
    }

    pub fn from_config(cfg: &KzmiConfig) -> Result<Self> {
        Ok(Self::new(&cfg.base_url)?
            .with_timeouts(cfg.connect_timeout(), cfg.timeout())
            .with_retry(cfg.retry_policy()?))
    }

    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Resolved location of `key`.
    pub fn url_for(&self, key: &str) -> Result<Url, FetchError> {
        Ok(self.base.join(&format!("{key}{JSON_EXT}"))?)
    }

    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(USER_AGENT)?;
        easy.accept_encoding("")?; // any encoding libcurl can decode
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http {
                url: url.to_string(),
                code,
            });
        }
        Ok(body)
    }
}

impl MapSource for HttpSource {
    fn fetch(&mut self, key: &str) -> Result<Option<Vec<Record>>, FetchError> {
        if key.is_empty() {
            return Ok(None);
        }
        let url = self.url_for(key)?;
        tracing::debug!(%url, "fetching category");

        let body = run_with_retry(&self.retry, FetchError::kind, || self.get(url.as_str()))?;
        tracing::debug!(%url, bytes = body.len(), "fetched category");

        let records = records_from_slice(&body).map_err(|source| FetchError::Decode {
            origin: url.to_string(),
            source,
        })?;
        Ok(Some(records))
    }
}
