use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::default::Default;
use std::path::Path;

use crate::errors::{IndexError, IndexResult};

/// Application configuration module
/// This module holds the indexer settings: which files are candidates,
/// what is skipped, where the index goes and how many reads run at once.
/// Every field has a default so a partial config file is enough.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IndexerConfig {
    /// File name suffix of candidate documents
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Name of the index file written under the root
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Directory names never descended into
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: BTreeSet<String>,

    /// File names never read
    #[serde(default = "default_skip_files")]
    pub skip_files: BTreeSet<String>,

    /// Maximum number of files read and classified at once
    #[serde(default = "default_concurrent_reads")]
    pub concurrent_reads: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_extension() -> String {
    ".json".to_string()
}

fn default_output_file() -> String {
    "index.json".to_string()
}

fn default_skip_dirs() -> BTreeSet<String> {
    [".git", ".github", "node_modules", "dist"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_skip_files() -> BTreeSet<String> {
    ["index.json"].into_iter().map(String::from).collect()
}

fn default_concurrent_reads() -> usize {
    16
}

impl IndexerConfig {
    /// Load a configuration file, falling back to defaults for missing fields
    pub fn from_file<P: AsRef<Path>>(path: P) -> IndexResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| IndexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> IndexResult<()> {
        if self.extension.is_empty() {
            return Err(IndexError::Config("extension must not be empty".to_string()));
        }

        if self.output_file.is_empty() {
            return Err(IndexError::Config("output_file must not be empty".to_string()));
        }

        if self.concurrent_reads == 0 {
            return Err(IndexError::Config(
                "concurrent_reads must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// File names excluded from the walk, always including the output file itself
    pub fn effective_skip_files(&self) -> BTreeSet<String> {
        let mut skip = self.skip_files.clone();
        if let Some(name) = Path::new(&self.output_file).file_name() {
            skip.insert(name.to_string_lossy().into_owned());
        }
        skip
    }
}

/// Default implementation for IndexerConfig
impl Default for IndexerConfig {
    fn default() -> Self {
        IndexerConfig {
            extension: default_extension(),
            output_file: default_output_file(),
            skip_dirs: default_skip_dirs(),
            skip_files: default_skip_files(),
            concurrent_reads: default_concurrent_reads(),
            log_level: LogLevel::default(),
        }
    }
}
