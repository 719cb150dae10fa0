//! Shared server state

use std::sync::Arc;

use crate::components::ComponentCatalog;
use crate::config::Config;
use crate::view::{DirLoader, ResourceRegistry, ViewCompositor};

/// Shared state for the HTTP server
///
/// The registry is the only mutable state shared between requests.
#[derive(Clone)]
pub struct AppState {
    /// Fragment compositor (loader + registry)
    pub(crate) compositor: ViewCompositor,
    /// Tag lookup for `/taghelper/:tag`
    pub(crate) catalog: Arc<ComponentCatalog>,
    /// Deliver css/js through the registry instead of inline blocks
    pub(crate) link_mode: bool,
    /// Language used when the request names none
    pub(crate) default_language: String,
    /// URL prefix of the resource endpoints
    pub(crate) resource_base: String,
}

impl AppState {
    pub fn new(compositor: ViewCompositor, catalog: ComponentCatalog) -> Self {
        let defaults = Config::default();
        Self {
            compositor,
            catalog: Arc::new(catalog),
            link_mode: defaults.link_mode,
            default_language: defaults.default_language,
            resource_base: defaults.resource_base,
        }
    }

    /// Wire a compositor over `components_dir` with a fresh registry
    pub fn from_config(config: &Config) -> Self {
        let loader = Arc::new(DirLoader::new(&config.components_dir));
        let compositor = ViewCompositor::new(loader, Arc::new(ResourceRegistry::new()));

        Self::new(compositor, config.catalog())
            .with_link_mode(config.link_mode)
            .with_default_language(&config.default_language)
            .with_resource_base(&config.resource_base)
    }

    pub fn with_link_mode(mut self, link_mode: bool) -> Self {
        self.link_mode = link_mode;
        self
    }

    pub fn with_default_language(mut self, lang: &str) -> Self {
        self.default_language = lang.to_string();
        self
    }

    /// Route prefix for resources. A missing leading `/` is added; use
    /// [`crate::config::normalize_resource_base`] to validate untrusted input.
    pub fn with_resource_base(mut self, base: &str) -> Self {
        self.resource_base = format!("/{}", base.trim_matches('/'));
        self
    }

    pub fn registry(&self) -> &Arc<ResourceRegistry> {
        self.compositor.registry()
    }

    pub fn resource_base(&self) -> &str {
        &self.resource_base
    }
}
