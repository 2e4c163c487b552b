#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use heapkit_common::logger::install_logger;

mod config;
mod demo;

/// Fills a binary heap with random numbers and drains it again.
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    /// How many numbers to insert.
    #[clap(short = 'n', long)]
    count: Option<usize>,
    /// Seed for the random numbers.
    #[clap(long)]
    seed: Option<u64>,
    /// Keep the smallest number at the root.
    #[clap(long)]
    min: bool,
    /// Drop discarded values right away instead of keeping them in the storage.
    #[clap(long)]
    clear_removed_indices: bool,
    /// Print the heap as a tree after each insert.
    #[clap(long)]
    tree: bool,
    /// Use this config file instead of ~/.heapkit.toml.
    #[clap(long, parse(from_os_str))]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (config, config_path) = config::load(args.config.as_deref())?;
    install_logger("heapkit", config.log_level)?;
    if let Some(path) = config_path {
        info!("loaded config from {}", path.display());
    }

    let mut heap = config.heap;
    if args.clear_removed_indices {
        heap.clear_removed_indices = true;
    }

    let opts = demo::DemoOptions {
        count: args.count.unwrap_or(config.count),
        seed: args.seed.or(config.seed),
        min: args.min,
        tree: args.tree,
        heap,
    };

    let stdout = std::io::stdout();
    let summary = demo::run(&opts, &mut stdout.lock())?;
    info!(
        "drained {} values, the root changed {} times",
        summary.drained.len(),
        summary.root_changes
    );

    Ok(())
}
