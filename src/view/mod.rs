//! View composition engine
//!
//! Turns a component's raw template/style/script triple into a single HTML
//! fragment that can be dropped into any host page:
//!
//! ```text
//! load html (required)
//!     ↓
//! css   → scope selectors → inline <style> | registry + manifest
//!     ↓
//! js    → bind root placeholder → inline IIFE | registry + manifest
//!     ↓
//! i18n  → replace @_Key_ tokens
//!     ↓
//! strip <tag-helper> envelope
//! ```
//!
//! CSS and JS rewriting is line/regex based. It covers the authoring
//! conventions of the bundled components, not arbitrary CSS or JS.

pub mod compositor;
pub mod css;
pub mod envelope;
pub mod error;
pub mod hash;
pub mod i18n;
pub mod includes;
pub mod loader;
pub mod manifest;
pub mod registry;
pub mod script;

pub use compositor::ViewCompositor;
pub use error::{LoadError, RenderError};
pub use hash::ResourceHash;
pub use loader::{DirLoader, MemoryLoader, ResourceLoader};
pub use manifest::ResourceManifest;
pub use registry::ResourceRegistry;

/// Language used when the caller does not ask for one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language codes are spliced into asset file names: `en`, `pt-BR`, `zh_Hant`
pub fn is_valid_language_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= 16
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Kind of text asset a component is built from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Html,
    Css,
    Js,
    /// Translation dictionary for one language code
    I18n(String),
}

/// Logical identity of a component's assets: `{namespace}.{base_name}.{ext}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub namespace: String,
    pub base_name: String,
}

impl ResourceKey {
    pub fn new(namespace: impl Into<String>, base_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            base_name: base_name.into(),
        }
    }

    /// Logical path of one asset, as understood by every [`ResourceLoader`]
    ///
    /// ```
    /// use tagkit::view::{AssetKind, ResourceKey};
    ///
    /// let key = ResourceKey::new("Samples", "HelloTagHelper");
    /// assert_eq!(key.logical_path(&AssetKind::Css), "Samples.HelloTagHelper.css");
    /// assert_eq!(
    ///     key.logical_path(&AssetKind::I18n("it".into())),
    ///     "Samples.HelloTagHelper_i18n_it.js"
    /// );
    /// ```
    pub fn logical_path(&self, kind: &AssetKind) -> String {
        let file = match kind {
            AssetKind::Html => format!("{}.html", self.base_name),
            AssetKind::Css => format!("{}.css", self.base_name),
            AssetKind::Js => format!("{}.js", self.base_name),
            AssetKind::I18n(lang) => format!("{}_i18n_{}.js", self.base_name, lang),
        };
        if self.namespace.is_empty() {
            file
        } else {
            format!("{}.{}", self.namespace, file)
        }
    }
}

/// Per-call rendering parameters. Never shared between compositions.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// DOM id of the rendered instance; scopes styles and script lookups
    pub component_id: String,
    pub language_code: String,
    /// Register css/js in the registry instead of inlining them
    pub link_mode: bool,
}

impl RenderContext {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            language_code: DEFAULT_LANGUAGE.to_string(),
            link_mode: false,
        }
    }

    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    pub fn with_link_mode(mut self, link_mode: bool) -> Self {
        self.link_mode = link_mode;
        self
    }
}
