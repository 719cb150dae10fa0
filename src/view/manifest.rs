//! Resource Manifest - hashes touched by one render session
//!
//! The session owner (an HTTP request handler, a CLI invocation) creates one
//! manifest, hands it to every composition in that session, then reads it to
//! emit `<link>`/`<script>` references or a JSON resource list. It is never
//! stored globally.

use indexmap::IndexSet;
use serde::Serialize;

use super::hash::ResourceHash;

/// Ordered, deduplicated style and script hashes for one session
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceManifest {
    scripts: IndexSet<ResourceHash>,
    styles: IndexSet<ResourceHash>,
}

impl ResourceManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the hash was not already tracked
    pub fn add_style(&mut self, hash: ResourceHash) -> bool {
        self.styles.insert(hash)
    }

    /// Returns true if the hash was not already tracked
    pub fn add_script(&mut self, hash: ResourceHash) -> bool {
        self.scripts.insert(hash)
    }

    /// Style hashes in first-touched order
    pub fn styles(&self) -> impl Iterator<Item = &ResourceHash> {
        self.styles.iter()
    }

    /// Script hashes in first-touched order
    pub fn scripts(&self) -> impl Iterator<Item = &ResourceHash> {
        self.scripts.iter()
    }

    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    pub fn script_count(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty() && self.scripts.is_empty()
    }
}
