//! Filesystem sink with atomic replace.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{to_minified_json, to_pretty_json, MapSink, JSON_EXT, MIN_JSON_EXT};
use crate::record::Record;

/// Suffix of the in-progress file renamed over the final one.
pub const TEMP_SUFFIX: &str = ".part";

/// `maps.json` → `maps.json.part`.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes `contents` to a `.part` sibling, syncs it, then renames it over
/// `path`. Readers never observe a half-written artifact, and a failed write
/// leaves no `.part` behind.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = temp_path(path);
    let res = write_synced(&tmp, contents).and_then(|()| {
        fs::rename(&tmp, path)
            .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))
    });
    if res.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    res
}

fn write_synced(tmp: &Path, contents: &str) -> Result<()> {
    let mut f = fs::File::create(tmp).with_context(|| format!("create {}", tmp.display()))?;
    f.write_all(contents.as_bytes())
        .with_context(|| format!("write {}", tmp.display()))?;
    f.sync_all()
        .with_context(|| format!("sync {}", tmp.display()))?;
    Ok(())
}

/// Writes artifact pairs into one destination directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dest_dir: PathBuf,
}

impl FileSink {
    pub fn new(dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            dest_dir: dest_dir.into(),
        }
    }

    /// Paths of the (pretty, minified) artifacts for `name`.
    pub fn paths_for(&self, name: &str) -> (PathBuf, PathBuf) {
        (
            self.dest_dir.join(format!("{name}{JSON_EXT}")),
            self.dest_dir.join(format!("{name}{MIN_JSON_EXT}")),
        )
    }
}

impl MapSink for FileSink {
    fn write(&mut self, name: &str, records: &[Record]) -> Result<()> {
        if name.is_empty() || records.is_empty() {
            tracing::debug!(name, records = records.len(), "nothing to write");
            return Ok(());
        }

        fs::create_dir_all(&self.dest_dir)
            .with_context(|| format!("create {}", self.dest_dir.display()))?;
        let (pretty_path, min_path) = self.paths_for(name);

        let pretty = to_pretty_json(records).context("serialize pretty JSON")?;
        write_atomic(&pretty_path, &pretty)?;

        let min = to_minified_json(records).context("serialize minified JSON")?;
        write_atomic(&min_path, &min)?;

        tracing::info!(
            "wrote {} records to {} and {}",
            records.len(),
            pretty_path.display(),
            min_path.display()
        );
        Ok(())
    }
}
