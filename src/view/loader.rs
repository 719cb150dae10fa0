//! Resource loaders - resolve a logical asset path to raw text
//!
//! The compositor only sees the [`ResourceLoader`] trait. Hosts plug in the
//! store their components live in: a directory on disk, an in-memory map, or
//! anything else that can answer a path.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

use super::error::LoadError;
use super::{AssetKind, ResourceKey};

/// Source of raw component assets
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// Load one asset. Absence must be reported as [`LoadError::NotFound`].
    async fn load(&self, key: &ResourceKey, kind: &AssetKind) -> Result<String, LoadError>;
}

/// Loads assets from `{root}/{logical_path}`
#[derive(Debug, Clone)]
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl ResourceLoader for DirLoader {
    async fn load(&self, key: &ResourceKey, kind: &AssetKind) -> Result<String, LoadError> {
        let logical = key.logical_path(kind);
        // Keys are flat file names; never let one climb out of the root
        if logical.contains(&['/', '\\'][..]) || logical.contains("..") {
            return Err(LoadError::NotFound { path: logical });
        }
        let path = self.root.join(&logical);

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::NotFound { path: logical })
            }
            Err(source) => Err(LoadError::Io { path, source }),
        }
    }
}

/// In-memory asset store keyed by logical path
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset under its logical path (e.g. `Samples.Hello.css`)
    pub fn with_file(mut self, logical_path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(logical_path, content);
        self
    }

    pub fn insert(&mut self, logical_path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(logical_path.into(), content.into());
    }
}

#[async_trait]
impl ResourceLoader for MemoryLoader {
    async fn load(&self, key: &ResourceKey, kind: &AssetKind) -> Result<String, LoadError> {
        let logical = key.logical_path(kind);
        self.files
            .get(&logical)
            .cloned()
            .ok_or(LoadError::NotFound { path: logical })
    }
}
