//! Configuration for the fragment server
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/tagkit/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::components::ComponentCatalog;
use crate::view::{ResourceKey, DEFAULT_LANGUAGE};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use crate::logging::{LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_COMPONENTS_DIR: &str = "./components";
const DEFAULT_RESOURCE_BASE: &str = "/resources";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// One `[[components]]` entry
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ComponentConfig {
    /// Tag the component answers to; derived from `base_name` when omitted
    pub tag: Option<String>,
    /// Asset namespace (file name prefix), may be empty
    #[serde(default)]
    pub namespace: String,
    /// Asset base name, e.g. "HelloTagHelper"
    pub base_name: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server to
    pub bind_addr: SocketAddr,

    /// Directory holding component assets (`{namespace}.{base}.html`, ...)
    pub components_dir: PathBuf,

    /// Deliver css/js as content-addressed resources instead of inline blocks
    pub link_mode: bool,

    /// Language used when a request does not name one
    pub default_language: String,

    /// URL prefix the resource endpoints are mounted under
    pub resource_base: String,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Components exposed through the fragment endpoint
    pub components: Vec<ComponentConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            components_dir: PathBuf::from(DEFAULT_COMPONENTS_DIR),
            link_mode: false,
            default_language: DEFAULT_LANGUAGE.to_string(),
            resource_base: DEFAULT_RESOURCE_BASE.to_string(),
            logging: LoggingConfig::default(),
            components: default_components(),
        }
    }
}

/// The sample components shipped in `components/`
fn default_components() -> Vec<ComponentConfig> {
    vec![
        ComponentConfig {
            tag: Some("inst-hello".to_string()),
            namespace: "Samples".to_string(),
            base_name: "HelloTagHelper".to_string(),
        },
        ComponentConfig {
            tag: None,
            namespace: "Samples".to_string(),
            base_name: "CounterTagHelper".to_string(),
        },
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub bind_addr: Option<String>,
    pub components_dir: Option<String>,
    pub link_mode: Option<bool>,
    pub default_language: Option<String>,
    pub resource_base: Option<String>,

    /// Optional [logging] section
    pub logging: Option<LoggingConfig>,

    /// Optional [[components]] entries (replace the samples when present)
    pub components: Option<Vec<ComponentConfig>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/tagkit/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("tagkit").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Write config (ignore errors - config is optional)
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists.
    ///
    /// A file that exists but cannot be read or parsed is an error: a broken
    /// config should fail fast, not silently fall back to defaults.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse configuration file {} (check quoting, booleans and section names)",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Cannot read configuration file {}", path.display())),
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Self::resolve(file, |name| std::env::var(name).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        // Bind address: env > file > default
        let bind_raw = env("TAGKIT_BIND")
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw
            .parse()
            .with_context(|| format!("Invalid bind address: {}", bind_raw))?;

        // Components directory: env > file > default
        let components_dir = env("TAGKIT_COMPONENTS_DIR")
            .or(file.components_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.components_dir);

        // Link mode: env > file > default (inline)
        let link_mode = env("TAGKIT_LINK_MODE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .or(file.link_mode)
            .unwrap_or(defaults.link_mode);

        // Default language: env > file > default
        let default_language = env("TAGKIT_LANG")
            .or(file.default_language)
            .unwrap_or(defaults.default_language);

        // Resource base: file > default
        let resource_base = match file.resource_base {
            Some(raw) => normalize_resource_base(&raw)?,
            None => defaults.resource_base,
        };

        let logging = file.logging.unwrap_or_default();
        let components = file.components.unwrap_or(defaults.components);

        Ok(Self {
            bind_addr,
            components_dir,
            link_mode,
            default_language,
            resource_base,
            logging,
            components,
        })
    }

    /// Build the tag lookup for every configured component
    pub fn catalog(&self) -> ComponentCatalog {
        let mut catalog = ComponentCatalog::new();
        for component in &self.components {
            let key = ResourceKey::new(&component.namespace, &component.base_name);
            match &component.tag {
                Some(tag) => catalog.register(tag, key),
                None => catalog.register_derived(key),
            }
        }
        catalog
    }
}

/// Prefixes the router already serves; a resource base may not shadow them
const RESERVED_PREFIXES: &[&str] = &["/health", "/taghelper"];

/// Turn a configured `resource_base` into a route prefix: one leading `/`,
/// no trailing `/`, at least one segment, and nothing the router would read
/// as a parameter or wildcard
pub fn normalize_resource_base(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        bail!("Invalid resource_base {:?}: must name a path such as \"/resources\"", raw);
    }
    if trimmed.split('/').any(str::is_empty) {
        bail!("Invalid resource_base {:?}: empty path segment", raw);
    }
    if let Some(c) = trimmed
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.')))
    {
        bail!("Invalid resource_base {:?}: unsupported character {:?}", raw, c);
    }

    let base = format!("/{}", trimmed);
    if RESERVED_PREFIXES.contains(&base.as_str()) {
        bail!("Invalid resource_base {:?}: {} is already routed", raw, base);
    }
    Ok(base)
}
