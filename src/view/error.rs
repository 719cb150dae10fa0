//! Composition error types
//!
//! Only a missing template is fatal. Missing style/script/translation assets
//! and unparsable translation data degrade to a no-op for that step and never
//! surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by a [`super::ResourceLoader`]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("resource not found: {path}")]
    NotFound { path: String },

    #[error("failed to read resource {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

/// Errors that abort a composition before any fragment is produced
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("component template not found: {path}")]
    TemplateNotFound { path: String },

    #[error(transparent)]
    Load(#[from] LoadError),
}
