//! Markup for link-mode resources
//!
//! A link-mode fragment carries no css/js of its own. Whoever writes the
//! enclosing page turns the session manifest into `<link>` and `<script>`
//! tags pointing at the resource endpoints.

use crate::view::registry::ResourceKind;
use crate::view::{ResourceHash, ResourceManifest};

/// URL of one registered resource under `base` (e.g. "/resources")
pub fn resource_url(base: &str, kind: ResourceKind, hash: &ResourceHash) -> String {
    let base = base.trim_end_matches('/');
    match kind {
        ResourceKind::Style => format!("{}/style-{}.css", base, hash),
        ResourceKind::Script => format!("{}/script-{}.js", base, hash),
    }
}

/// One `<link rel="stylesheet">` line per style, in first-use order
pub fn style_links(manifest: &ResourceManifest, base: &str) -> String {
    manifest
        .styles()
        .map(|hash| {
            format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n",
                resource_url(base, ResourceKind::Style, hash)
            )
        })
        .collect()
}

/// One deferred `<script src>` line per script, in first-use order
pub fn script_tags(manifest: &ResourceManifest, base: &str) -> String {
    manifest
        .scripts()
        .map(|hash| {
            format!(
                "<script src=\"{}\" defer></script>\n",
                resource_url(base, ResourceKind::Script, hash)
            )
        })
        .collect()
}
