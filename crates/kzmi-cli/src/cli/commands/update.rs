//! Update command: run the full pipeline over the configured categories.

use anyhow::{bail, Result};
use kzmi_core::config::KzmiConfig;
use kzmi_core::pipeline;
use kzmi_core::sink::FileSink;
use kzmi_core::source::{DirSource, HttpSource, MapSource};
use std::path::PathBuf;

/// Command-line overrides for `update`.
#[derive(Debug, Default)]
pub struct UpdateArgs {
    pub dest: Option<PathBuf>,
    pub base_url: Option<String>,
    pub from_dir: Option<PathBuf>,
    pub only: Vec<String>,
    pub strict_urls: bool,
}

/// Folds the overrides into the loaded config.
pub(crate) fn apply_overrides(mut cfg: KzmiConfig, args: &UpdateArgs) -> Result<KzmiConfig> {
    if let Some(dest) = &args.dest {
        cfg.dest_dir = dest.clone();
    }
    if let Some(base_url) = &args.base_url {
        cfg.base_url = base_url.clone();
    }
    if args.strict_urls {
        cfg.strict_urls = true;
    }
    if !args.only.is_empty() {
        cfg.categories
            .retain(|c| args.only.iter().any(|o| *o == c.key || *o == c.name));
        if cfg.categories.is_empty() {
            bail!("no configured category matches {:?}", args.only);
        }
    }
    Ok(cfg)
}

pub fn run_update(cfg: KzmiConfig, args: UpdateArgs) -> Result<()> {
    let cfg = apply_overrides(cfg, &args)?;

    let mut source: Box<dyn MapSource> = match &args.from_dir {
        Some(dir) => {
            tracing::info!("reading categories from {}", dir.display());
            Box::new(DirSource::new(dir))
        }
        None => {
            tracing::info!("fetching categories from {}", cfg.base_url);
            Box::new(HttpSource::from_config(&cfg)?)
        }
    };
    let mut sink = FileSink::new(&cfg.dest_dir);

    let reports = pipeline::run(&cfg, source.as_mut(), &mut sink)?;
    for r in reports {
        match r.records {
            Some(n) if n > 0 => println!("{:<12} {:>6} maps  ({})", r.name, n, r.key),
            _ => println!("{:<12} {:>6}        ({}, nothing written)", r.name, 0, r.key),
        }
    }
    Ok(())
}
