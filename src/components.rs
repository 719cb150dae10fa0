//! Component catalog - tag name to asset key
//!
//! Fragment requests name a component by its tag (`/taghelper/hello`). The
//! catalog resolves that tag to the [`ResourceKey`] its assets live under.
//! It is built once at startup from configuration and read-only afterwards.

use std::collections::BTreeMap;

use crate::view::ResourceKey;

/// Suffix stripped from type-style names when deriving a tag
const TYPE_SUFFIX: &str = "TagHelper";

/// One renderable component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub tag: String,
    pub key: ResourceKey,
}

/// Tag → component lookup (tags are case-insensitive)
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    components: BTreeMap<String, ComponentSpec>,
}

impl ComponentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component. A later registration for the same tag wins.
    pub fn register(&mut self, tag: &str, key: ResourceKey) {
        let tag = tag.to_lowercase();
        if let Some(previous) = self.components.get(&tag) {
            tracing::warn!(
                "Component tag '{}' re-registered ({} -> {})",
                tag,
                previous.key.base_name,
                key.base_name
            );
        }
        self.components
            .insert(tag.clone(), ComponentSpec { tag, key });
    }

    /// Register under the tag derived from the base name
    pub fn register_derived(&mut self, key: ResourceKey) {
        let tag = tag_from_type_name(&key.base_name);
        self.register(&tag, key);
    }

    pub fn resolve(&self, tag: &str) -> Option<&ComponentSpec> {
        self.components.get(&tag.to_lowercase())
    }

    /// Components in tag order
    pub fn iter(&self) -> impl Iterator<Item = &ComponentSpec> {
        self.components.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Default tag for a component named like a type:
/// `FancyCardTagHelper` → `fancy-card`
pub fn tag_from_type_name(name: &str) -> String {
    let stem = name.strip_suffix(TYPE_SUFFIX).unwrap_or(name);
    let mut tag = String::with_capacity(stem.len() + 4);
    for (i, c) in stem.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            tag.push('-');
        }
        tag.push(c.to_ascii_lowercase());
    }
    tag
}

/// Fresh DOM id for a component instance: `tag-{32 hex}`
pub fn new_component_id() -> String {
    format!("tag-{}", uuid::Uuid::new_v4().simple())
}

/// Whether a caller-supplied id is safe to splice into CSS selectors and
/// script string literals: a letter followed by letters, digits, `-` or `_`
pub fn is_valid_component_id(id: &str) -> bool {
    let mut chars = id.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
