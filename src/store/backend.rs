//! Property store backends
//!
//! The store is the host's persistence primitive: each call reads or writes
//! atomically, callers add no locking of their own.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Key/value port over the host's user-scoped storage
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Read a value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing a missing key is not an error
    async fn delete(&self, key: &str) -> Result<()>;
}

type Properties = BTreeMap<String, String>;

// ============================================================================
// Memory Store
// ============================================================================

/// In-memory store; clones share the same properties
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    properties: Arc<RwLock<Properties>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.properties.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.properties
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.properties.write().await.remove(key);
        Ok(())
    }
}

// ============================================================================
// File Store
// ============================================================================

/// File-backed store holding one JSON document per user
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Path to the property file
    path: PathBuf,
    /// Cached properties
    properties: Arc<RwLock<Properties>>,
}

impl FileStore {
    /// Open the property file at `path`, loading it if present
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let properties = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| Error::Storage {
                message: format!("Failed to read property file: {e}"),
            })?;
            serde_json::from_str(&contents).map_err(|e| Error::Storage {
                message: format!("Failed to parse property file: {e}"),
            })?
        } else {
            Properties::new()
        };

        Ok(Self {
            path,
            properties: Arc::new(RwLock::new(properties)),
        })
    }

    /// Open the property file of `user` inside `dir`
    pub fn for_user(dir: impl AsRef<Path>, user: &str) -> Result<Self> {
        let safe_user = user
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect::<String>();
        Self::open(dir.as_ref().join(format!("{safe_user}.json")))
    }

    /// Get the property file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `properties` to disk
    async fn save(&self, properties: &Properties) -> Result<()> {
        let contents = serde_json::to_string_pretty(properties).map_err(|e| Error::Storage {
            message: format!("Failed to serialize properties: {e}"),
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| Error::Storage {
                        message: format!("Failed to create property directory: {e}"),
                    })?;
            }
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::Storage {
                message: format!("Failed to write property file: {e}"),
            })?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::Storage {
                message: format!("Failed to rename property file: {e}"),
            })?;

        debug!("Saved {} properties to {}", properties.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl PropertyStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.properties.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut properties = self.properties.write().await;
        let mut updated = properties.clone();
        updated.insert(key.to_string(), value.to_string());

        // The cache only changes once the file holds the new value
        self.save(&updated).await?;
        *properties = updated;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut properties = self.properties.write().await;
        if !properties.contains_key(key) {
            return Ok(());
        }

        let mut updated = properties.clone();
        updated.remove(key);
        self.save(&updated).await?;
        *properties = updated;
        Ok(())
    }
}
