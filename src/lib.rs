//! tagkit - server-side view composition
//!
//! Renders self-contained HTML components (template, stylesheet, script and
//! per-language dictionaries) into fragments whose styles and scripts are
//! confined to one DOM instance, delivered inline or as content-addressed
//! resources.

pub mod components;
pub mod config;
pub mod logging;
pub mod server;
pub mod view;
