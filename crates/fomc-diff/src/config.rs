//! Configuration file support
//!
//! ```toml
//! [compare]
//! granularity = "word"      # or "sentence"
//! view = "unified"          # or "side-by-side"
//! normalize = true
//!
//! [data]
//! statements = "~/fomc/statements"
//! ```

use anyhow::{Context, Result};
use fomc_diff_core::{Granularity, ViewMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where statements are looked for when neither the command line nor the config says
pub const DEFAULT_STATEMENTS_DIR: &str = "data/statements";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub compare: CompareConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    pub granularity: Granularity,
    pub view: ViewMode,
    pub normalize: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            view: ViewMode::default(),
            normalize: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    pub statements: Option<PathBuf>,
}

impl Config {
    /// `<config dir>/fomc-diff/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fomc-diff").join("config.toml"))
    }

    /// Load an explicitly named config file, or the default one if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Statement location: command line first, then config, then the default directory
    pub fn statements_path(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.data.statements.clone())
            .map(|path| expand_home(&path))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATEMENTS_DIR))
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
