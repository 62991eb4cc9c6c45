//! File-backed store.
//!
//! The whole key/value map lives in one JSON object on disk. Every
//! mutation rewrites the document through a temporary sibling file and a
//! rename, so a crash mid-write leaves the previous document intact.

use super::{Store, StoreError};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File store configuration.
#[derive(Clone, Debug)]
pub struct FileStoreConfig {
    /// Path of the JSON document.
    pub path: PathBuf,

    /// Whether to start empty if the document doesn't exist.
    pub create_if_missing: bool,

    /// Write the document with indentation.
    pub pretty: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./rewind-store.json"),
            create_if_missing: true,
            pretty: false,
        }
    }
}

impl FileStoreConfig {
    /// Configuration for a document at `path` with default options.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Store persisted as a single JSON document.
#[derive(Debug)]
pub struct FileStore {
    config: FileStoreConfig,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the document described by `config`.
    ///
    /// A missing document yields an empty store when `create_if_missing`
    /// is set; the file itself is only created on the first mutation.
    pub fn open(config: FileStoreConfig) -> Result<Self, StoreError> {
        let entries: BTreeMap<String, String> = match fs::read_to_string(&config.path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| StoreError::Encoding(format!("{}: {e}", config.path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && config.create_if_missing => {
                debug!("No store document at {}, starting empty", config.path.display());
                BTreeMap::new()
            }
            Err(source) => {
                return Err(StoreError::Io {
                    key: config.path.display().to_string(),
                    source,
                })
            }
        };

        info!(
            "Opened file store {} ({} entries)",
            config.path.display(),
            entries.len()
        );

        Ok(Self {
            config,
            entries: RwLock::new(entries),
        })
    }

    /// Open a document at `path` with default options.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open(FileStoreConfig::at(path.as_ref()))
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn flush(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let document = if self.config.pretty {
            serde_json::to_string_pretty(entries)
        } else {
            serde_json::to_string(entries)
        }
        .map_err(|e| StoreError::Encoding(e.to_string()))?;

        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        if let Some(parent) = self.config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let tmp = self.config.path.with_extension("json.tmp");
        fs::write(&tmp, document).map_err(io_err)?;
        fs::rename(&tmp, &self.config.path).map_err(io_err)
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush(key, &entries) {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.flush(key, &entries) {
            entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.read().contains_key(key))
    }
}
