use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

fn ensure_dir(dir: PathBuf) -> Result<PathBuf> {
    create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(dir)
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("failed to locate the home directory")
}

/// `~/.heapkit`.
pub fn heapkit_dir() -> Result<PathBuf> {
    ensure_dir(home_dir()?.join(".heapkit"))
}

pub fn log_file_path(name: &str) -> Result<PathBuf> {
    let log_dir = ensure_dir(heapkit_dir()?.join("log"))?;
    Ok(log_dir.join(format!("{}.log", name)))
}

/// User config files in the order they're looked up. Nothing is created.
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    match dirs::home_dir() {
        Some(home) => paths.push(home.join(".heapkit.toml")),
        None => crate::debug_warn!("home directory not found, skipping ~/.heapkit.toml"),
    }
    if let Some(config) = dirs::config_dir() {
        paths.push(config.join("heapkit").join("config.toml"));
    }
    paths
}

/// The first path that exists. The rest are shadowed by it, which is
/// reported once per process.
pub fn first_existing(paths: &[PathBuf]) -> Option<&Path> {
    let mut existing = paths.iter().map(PathBuf::as_path).filter(|path| path.exists());
    let first = existing.next()?;
    if let Some(shadowed) = existing.next() {
        crate::warn_once!(
            "{} is ignored because {} exists",
            shadowed.display(),
            first.display()
        );
    }
    Some(first)
}
