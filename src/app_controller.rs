use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::IndexerConfig;
use crate::errors::IndexError;
use crate::file_utils::{FileManager, WalkFilter};
use crate::index::{IndexDocument, aggregate};
use crate::scene::{self, SceneRecord};

// @module: Application controller for one indexing pass

/// Counts reported after a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    /// Candidate files found by the walk
    pub files_scanned: usize,
    /// Files accepted as scene documents
    pub scenes: usize,
    /// Distinct plays
    pub plays: usize,
    /// Where the index lives
    pub output_path: PathBuf,
}

/// Main application controller for building the scene index
pub struct Controller {
    // @field: App configuration
    config: IndexerConfig,
    // @field: Directory that is scanned
    root: PathBuf,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config<P: AsRef<Path>>(root: P, config: IndexerConfig) -> Result<Self> {
        config
            .validate()
            .context("Configuration validation failed")?;

        Ok(Self {
            config,
            root: root.as_ref().to_path_buf(),
        })
    }

    /// Create a controller for `root` with default configuration
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::with_config(root, IndexerConfig::default())
    }

    /// Full path of the index file
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.config.output_file)
    }

    /// Walk, classify and aggregate without touching the output file
    pub async fn build(&self) -> Result<(IndexDocument, usize)> {
        let filter = WalkFilter::from_config(&self.config);
        let files = FileManager::walk(&self.root, &filter)
            .with_context(|| format!("Failed to scan {:?}", self.root))?;
        info!("Found {} candidate file(s) under {:?}", files.len(), self.root);

        let records = self.classify_files(&files).await;
        info!("Accepted {} scene document(s)", records.len());

        Ok((aggregate(records), files.len()))
    }

    /// Read and classify files with bounded concurrency.
    ///
    /// Results are put back in walk order before returning, so the outcome
    /// does not depend on which read finishes first.
    async fn classify_files(&self, files: &[PathBuf]) -> Vec<SceneRecord> {
        let root = self.root.as_path();

        let mut results = stream::iter(files.iter().enumerate())
            .map(|(position, path)| async move {
                let record = match FileManager::read_bytes(path).await {
                    Ok(content) => {
                        let record = scene::extract(root, path, &content);
                        if record.is_none() {
                            debug!("Not a scene document: {:?}", path);
                        }
                        record
                    }
                    Err(e) => {
                        debug!("Skipping unreadable file {:?}: {}", path, e);
                        None
                    }
                };
                (position, record)
            })
            .buffer_unordered(self.config.concurrent_reads)
            .collect::<Vec<_>>()
            .await;

        results.sort_by_key(|(position, _)| *position);
        results.into_iter().filter_map(|(_, record)| record).collect()
    }

    /// Build the index and publish it to the output path
    pub async fn run(&self) -> Result<IndexSummary> {
        let start_time = Instant::now();
        let (document, files_scanned) = self.build().await?;
        let json = document.to_json()?;

        let output_path = self.output_path();
        FileManager::write_atomic(&output_path, &json)?;
        debug!("Index written in {:?}", start_time.elapsed());

        Ok(self.summary(&document, files_scanned))
    }

    /// Build the index and compare it with the published one
    pub async fn check(&self) -> Result<IndexSummary> {
        let (document, files_scanned) = self.build().await?;
        let json = document.to_json()?;

        let output_path = self.output_path();
        let existing = tokio::fs::read_to_string(&output_path).await.ok();
        if existing.as_deref() != Some(json.as_str()) {
            return Err(IndexError::Stale { path: output_path }.into());
        }

        Ok(self.summary(&document, files_scanned))
    }

    fn summary(&self, document: &IndexDocument, files_scanned: usize) -> IndexSummary {
        IndexSummary {
            files_scanned,
            scenes: document.total_scenes(),
            plays: document.plays.len(),
            output_path: self.output_path(),
        }
    }
}
