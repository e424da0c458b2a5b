use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use walkdir::{DirEntry, WalkDir};

use crate::app_config::IndexerConfig;
use crate::errors::{IndexError, IndexResult};

// @module: File and directory utilities

/// Names and suffix that decide which files the walk yields
#[derive(Debug, Clone)]
pub struct WalkFilter {
    /// Required file name suffix
    pub extension: String,
    /// Directory names never descended into
    pub skip_dirs: BTreeSet<String>,
    /// File names never yielded
    pub skip_files: BTreeSet<String>,
}

impl WalkFilter {
    // @creates: Filter from the indexer configuration
    pub fn from_config(config: &IndexerConfig) -> Self {
        Self {
            extension: config.extension.clone(),
            skip_dirs: config.skip_dirs.clone(),
            skip_files: config.effective_skip_files(),
        }
    }

    // @checks: Directory entry should be pruned
    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.skip_dirs.contains(&*name)
    }

    // @checks: Regular file is a candidate document
    fn accepts_file(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_file() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        name.ends_with(self.extension.as_str()) && !self.skip_files.contains(&*name)
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Find candidate documents under `root`, recursively.
    ///
    /// Entries are visited sorted by file name inside each directory.
    /// Symbolic links are neither followed nor yielded. Any directory that
    /// cannot be read aborts the walk.
    pub fn walk<P: AsRef<Path>>(root: P, filter: &WalkFilter) -> IndexResult<Vec<PathBuf>> {
        let root = root.as_ref();
        if !Self::dir_exists(root) {
            return Err(IndexError::Walk {
                path: root.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }

        let mut result = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !filter.is_skipped_dir(entry));

        for entry in walker {
            let entry = entry?;
            if filter.accepts_file(&entry) {
                result.push(entry.into_path());
            }
        }

        Ok(result)
    }

    /// Read a candidate file as bytes
    pub async fn read_bytes<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    /// Path of `path` relative to `root`, with `/` separators on every platform
    pub fn relative_posix_path<P1: AsRef<Path>, P2: AsRef<Path>>(root: P1, path: P2) -> String {
        let path = path.as_ref();
        let relative = path.strip_prefix(root.as_ref()).unwrap_or(path);

        relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Temporary file next to `path` carrying the mode the published file should have.
    ///
    /// An existing target keeps its permissions; a new one gets the same
    /// mode a plain create would (0o666 minus the umask).
    fn create_temp_for(parent: &Path, path: &Path) -> std::io::Result<NamedTempFile> {
        let existing = fs::metadata(path).ok().map(|metadata| metadata.permissions());

        #[allow(unused_mut)]
        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }

        let temp = builder.tempfile_in(parent)?;
        if let Some(permissions) = existing {
            temp.as_file().set_permissions(permissions)?;
        }
        Ok(temp)
    }

    /// Replace `path` with `content` in one step.
    ///
    /// The content goes to a temporary file next to the destination which is
    /// then renamed over it, so readers never observe a half-written file.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> IndexResult<()> {
        let path = path.as_ref();
        let write_error = |source: std::io::Error| IndexError::Write {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(write_error)?;

        let mut temp = Self::create_temp_for(&parent, path).map_err(write_error)?;
        temp.write_all(content.as_bytes()).map_err(write_error)?;
        temp.flush().map_err(write_error)?;
        temp.persist(path).map_err(|e| write_error(e.error))?;

        Ok(())
    }
}
