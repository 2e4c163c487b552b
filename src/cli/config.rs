use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{anyhow, Context, Result};
use heapkit_common::dirs::{config_file_candidates, first_existing};
use heapkit_heap::HeapConfig;
use log::LevelFilter;
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct HeapSection {
    clear_removed_indices: Option<bool>,
    initial_capacity: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct DemoSection {
    count: Option<usize>,
    seed: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct LogSection {
    level: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct ConfigFile {
    heap: HeapSection,
    demo: DemoSection,
    log: LogSection,
}

static DEFAULT_CONFIG_FILE: Lazy<ConfigFile> = Lazy::new(|| {
    toml::from_str(include_str!("defaults.toml"))
        .context("failed to parse defaults.toml")
        .unwrap()
});

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub heap: HeapConfig,
    pub count: usize,
    pub seed: Option<u64>,
    pub log_level: Option<LevelFilter>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            heap: HeapConfig::default(),
            count: 0,
            seed: None,
            log_level: None,
        }
    }
}

impl Config {
    fn apply(&mut self, file: &ConfigFile) -> Result<()> {
        if let Some(enabled) = file.heap.clear_removed_indices {
            self.heap.clear_removed_indices = enabled;
        }
        if let Some(capacity) = file.heap.initial_capacity {
            self.heap.initial_capacity = capacity;
        }
        if let Some(count) = file.demo.count {
            self.count = count;
        }
        if let Some(seed) = file.demo.seed {
            self.seed = Some(seed);
        }
        if let Some(level) = &file.log.level {
            self.log_level = Some(parse_level(level)?);
        }

        Ok(())
    }
}

fn parse_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level).map_err(|_| anyhow!("invalid log level: \"{}\"", level))
}

fn parse_config_file(text: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(text)?)
}

/// Builds the config from the embedded defaults and the user config file:
/// `path` if given, otherwise the first of `~/.heapkit.toml` and
/// `~/.config/heapkit/config.toml` that exists. Returns the file used.
pub fn load(path: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    let mut config = Config::default();
    config.apply(&DEFAULT_CONFIG_FILE)?;

    let candidates = config_file_candidates();
    let user_path = match path {
        Some(path) => Some(path),
        None => first_existing(&candidates),
    };

    let user_path = match user_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file = parse_config_file(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            config
                .apply(&file)
                .with_context(|| format!("invalid config in {}", path.display()))?;
            Some(path.to_path_buf())
        }
        None => None,
    };

    Ok((config, user_path))
}
