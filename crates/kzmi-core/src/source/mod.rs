//! Where raw category arrays come from.
//!
//! [`HttpSource`] pulls `<base_url><key>.json` over HTTP(S) with libcurl;
//! [`DirSource`] reads the same layout from a local directory.

mod dir;
mod http;

pub use dir::{read_records, DirSource};
pub use http::HttpSource;

use std::path::PathBuf;
use thiserror::Error;

use crate::record::Record;
use crate::retry::{classify_curl_error, classify_http_status, ErrorKind};

/// File extension of every category resource.
pub const JSON_EXT: &str = ".json";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("curl: {0}")]
    Curl(#[from] curl::Error),

    #[error("GET {url} returned HTTP {code}")]
    Http { url: String, code: u32 },

    #[error("read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decode JSON from {origin}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Retry classification for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Curl(e) => classify_curl_error(e),
            FetchError::Http { code, .. } => classify_http_status(*code),
            FetchError::Url(_) | FetchError::Io { .. } | FetchError::Decode { .. } => {
                ErrorKind::Other
            }
        }
    }
}

/// Supplies the raw record list of a category.
pub trait MapSource {
    /// Fetches and decodes the array stored under `key`.
    ///
    /// Returns `Ok(None)` when `key` is empty (unmapped category).
    fn fetch(&mut self, key: &str) -> Result<Option<Vec<Record>>, FetchError>;
}
