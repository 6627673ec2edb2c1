//! CLI for kzmi.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kzmi_core::config::{self, KzmiConfig};
use std::path::{Path, PathBuf};

use commands::{run_categories, run_normalize, run_update, UpdateArgs};

/// Top-level CLI for kzmi.
#[derive(Debug, Parser)]
#[command(name = "kzmi")]
#[command(about = "kzmi: fetch, normalize and publish KZ map-info JSON", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/kzmi/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every category, normalize it and write the JSON artifact pairs.
    Update {
        /// Output directory (overrides `dest_dir`).
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Remote root (overrides `base_url`).
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Read `<key>.json` files from a local directory instead of fetching.
        #[arg(long, value_name = "DIR", conflicts_with = "base_url")]
        from_dir: Option<PathBuf>,

        /// Only process these categories (by key or output name). Repeatable.
        #[arg(long, value_name = "NAME")]
        only: Vec<String>,

        /// Fail when a record lacks a URL field.
        #[arg(long)]
        strict_urls: bool,
    },

    /// Normalize a local JSON array file and write its artifact pair.
    Normalize {
        /// Input file holding a JSON array of map records.
        input: PathBuf,

        /// Output base name (defaults to the input file stem).
        #[arg(long)]
        name: Option<String>,

        /// Output directory (overrides `dest_dir`).
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Fail when a record lacks a URL field.
        #[arg(long)]
        strict_urls: bool,
    },

    /// Show the configured category table.
    Categories,
}

/// Explicit `--config` wins; otherwise the XDG config (created on first use).
fn load_config(path: Option<&Path>) -> Result<KzmiConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Update {
                dest,
                base_url,
                from_dir,
                only,
                strict_urls,
            } => run_update(
                cfg,
                UpdateArgs {
                    dest,
                    base_url,
                    from_dir,
                    only,
                    strict_urls,
                },
            )?,
            CliCommand::Normalize {
                input,
                name,
                dest,
                strict_urls,
            } => run_normalize(cfg, &input, name.as_deref(), dest, strict_urls)?,
            CliCommand::Categories => run_categories(&cfg),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
