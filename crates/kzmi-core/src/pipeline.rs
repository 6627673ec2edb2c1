//! Category driver: fetch → normalize → write, one category at a time.

use anyhow::{Context, Result};

use crate::config::{Category, KzmiConfig};
use crate::normalize::{normalize_batch, NormalizeOptions};
use crate::sink::MapSink;
use crate::source::MapSource;

/// What happened to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub key: String,
    pub name: String,
    /// Records fetched; `None` when the source had nothing for the key.
    pub records: Option<usize>,
}

/// Runs every configured category in order. The first failure aborts the run.
pub fn run<S, K>(cfg: &KzmiConfig, source: &mut S, sink: &mut K) -> Result<Vec<CategoryReport>>
where
    S: MapSource + ?Sized,
    K: MapSink + ?Sized,
{
    let opts = cfg.normalize_options();
    let mut reports = Vec::with_capacity(cfg.categories.len());
    for category in &cfg.categories {
        reports.push(process_category(category, &opts, source, sink)?);
    }
    Ok(reports)
}

/// Fetches, normalizes and writes a single category.
pub fn process_category<S, K>(
    category: &Category,
    opts: &NormalizeOptions,
    source: &mut S,
    sink: &mut K,
) -> Result<CategoryReport>
where
    S: MapSource + ?Sized,
    K: MapSink + ?Sized,
{
    let span = tracing::info_span!("category", key = %category.key, name = %category.name);
    let _enter = span.enter();

    let mut records = source
        .fetch(&category.key)
        .with_context(|| format!("fetch category {}", category.key))?;

    normalize_batch(records.as_deref_mut(), opts)
        .with_context(|| format!("normalize category {}", category.key))?;

    match records.as_deref() {
        Some(records) => {
            tracing::info!(records = records.len(), "normalized");
            sink.write(&category.name, records)
                .with_context(|| format!("write category {}", category.name))?;
        }
        None => tracing::warn!("source returned nothing; skipping"),
    }

    Ok(CategoryReport {
        key: category.key.clone(),
        name: category.name.clone(),
        records: records.as_ref().map(Vec::len),
    })
}
