//! Local directory source: `<dir>/<key>.json`.

use std::path::{Path, PathBuf};

use super::{FetchError, MapSource, JSON_EXT};
use crate::record::{records_from_slice, Record};

#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}{JSON_EXT}"))
    }
}

/// Reads and decodes a JSON array of records from a file.
pub fn read_records(path: &Path) -> Result<Vec<Record>, FetchError> {
    let bytes = std::fs::read(path).map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    records_from_slice(&bytes).map_err(|source| FetchError::Decode {
        origin: path.display().to_string(),
        source,
    })
}

impl MapSource for DirSource {
    fn fetch(&mut self, key: &str) -> Result<Option<Vec<Record>>, FetchError> {
        if key.is_empty() {
            return Ok(None);
        }
        let path = self.path_for(key);
        tracing::debug!(path = %path.display(), "reading category");
        read_records(&path).map(Some)
    }
}
