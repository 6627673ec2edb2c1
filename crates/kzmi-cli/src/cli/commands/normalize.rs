//! Normalize command: one local file in, one artifact pair out.

use anyhow::{Context, Result};
use kzmi_core::config::KzmiConfig;
use kzmi_core::normalize::normalize_batch;
use kzmi_core::sink::{FileSink, MapSink};
use kzmi_core::source::read_records;
use std::path::{Path, PathBuf};

pub fn run_normalize(
    mut cfg: KzmiConfig,
    input: &Path,
    name: Option<&str>,
    dest: Option<PathBuf>,
    strict_urls: bool,
) -> Result<()> {
    if strict_urls {
        cfg.strict_urls = true;
    }
    let name = match name {
        Some(n) => n.to_string(),
        None => input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .with_context(|| format!("cannot derive a name from {}", input.display()))?,
    };
    let dest = dest.unwrap_or_else(|| cfg.dest_dir.clone());

    let mut records = read_records(input)?;
    normalize_batch(Some(records.as_mut_slice()), &cfg.normalize_options())
        .with_context(|| format!("normalize {}", input.display()))?;

    FileSink::new(dest).write(&name, &records)?;
    println!("{:<12} {:>6} maps", name, records.len());
    Ok(())
}
