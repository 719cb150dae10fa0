//! Resource Registry - process-wide, insert-only store of style/script bodies
//!
//! Bodies are addressed by [`ResourceHash`] and served later by the delivery
//! endpoints. Entries are never replaced or removed: the first body stored
//! under a hash wins for the lifetime of the process.
//!
//! Styles and scripts live in separate maps so a style hash can never be
//! served as a script and vice versa.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{trace, warn};

use super::hash::ResourceHash;

/// Which namespace an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Style,
    Script,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Style => "style",
            ResourceKind::Script => "script",
        }
    }
}

/// Shared content-addressed store. Cheap to share behind an `Arc`.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    styles: DashMap<ResourceHash, Arc<str>>,
    scripts: DashMap<ResourceHash, Arc<str>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a scoped stylesheet, returning its address
    pub fn register_style(&self, content: &str) -> ResourceHash {
        Self::register(&self.styles, ResourceKind::Style, content)
    }

    /// Store a bound script, returning its address
    pub fn register_script(&self, content: &str) -> ResourceHash {
        Self::register(&self.scripts, ResourceKind::Script, content)
    }

    pub fn get_style(&self, hash: &ResourceHash) -> Option<Arc<str>> {
        self.styles.get(hash).map(|e| Arc::clone(e.value()))
    }

    pub fn get_script(&self, hash: &ResourceHash) -> Option<Arc<str>> {
        self.scripts.get(hash).map(|e| Arc::clone(e.value()))
    }

    pub fn get(&self, kind: ResourceKind, hash: &ResourceHash) -> Option<Arc<str>> {
        match kind {
            ResourceKind::Style => self.get_style(hash),
            ResourceKind::Script => self.get_script(hash),
        }
    }

    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    pub fn script_count(&self) -> usize {
        self.scripts.len()
    }

    fn register(
        map: &DashMap<ResourceHash, Arc<str>>,
        kind: ResourceKind,
        content: &str,
    ) -> ResourceHash {
        let hash = ResourceHash::from_content(content);

        // Fast path: already known, only takes a shard read lock
        if let Some(existing) = map.get(&hash) {
            if existing.value().as_ref() != content {
                log_collision(kind, &hash);
            }
            return hash;
        }

        match map.entry(hash.clone()) {
            Entry::Occupied(existing) => {
                if existing.get().as_ref() != content {
                    log_collision(kind, &hash);
                }
            }
            Entry::Vacant(slot) => {
                trace!(kind = kind.as_str(), hash = %hash, bytes = content.len(), "Registered resource");
                slot.insert(Arc::from(content));
            }
        }
        hash
    }
}

fn log_collision(kind: ResourceKind, hash: &ResourceHash) {
    warn!(
        kind = kind.as_str(),
        hash = %hash,
        "Resource hash collision: different content already registered, keeping first entry"
    );
}
