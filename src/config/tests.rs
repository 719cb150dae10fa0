//! Configuration tests
//!
//! Guard the config file template against drifting from the loader: every
//! field written by `to_toml()` must parse back into the same value.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), no_env).unwrap();
    assert_eq!(resolved.bind_addr, config.bind_addr);
    assert_eq!(resolved.components_dir, config.components_dir);
    assert_eq!(resolved.link_mode, config.link_mode);
    assert_eq!(resolved.default_language, config.default_language);
    assert_eq!(resolved.resource_base, config.resource_base);
    assert_eq!(resolved.logging, config.logging);
    assert_eq!(resolved.components, config.components);
}

#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.link_mode = true;
    config.default_language = "it".to_string();
    config.logging.json_dir = Some(PathBuf::from("/var/log/tagkit"));
    config.logging.rotation = LogRotation::Hourly;
    config.components = vec![ComponentConfig {
        tag: None,
        namespace: String::new(),
        base_name: "FancyCardTagHelper".to_string(),
    }];

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let resolved = Config::resolve(parsed, no_env).unwrap();

    assert!(resolved.link_mode);
    assert_eq!(resolved.default_language, "it");
    assert_eq!(resolved.logging, config.logging);
    assert_eq!(resolved.components, config.components);
}

#[test]
fn test_empty_components_template_parses() {
    let mut config = Config::default();
    config.components.clear();

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    // Commented-out example only: the samples stay in effect
    assert!(parsed.components.is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file = FileConfig {
        bind_addr: Some("0.0.0.0:9000".to_string()),
        link_mode: Some(false),
        default_language: Some("de".to_string()),
        ..Default::default()
    };
    let env = env_from(&[
        ("TAGKIT_BIND", "127.0.0.1:7000"),
        ("TAGKIT_LINK_MODE", "true"),
        ("TAGKIT_COMPONENTS_DIR", "/srv/components"),
    ]);

    let config = Config::resolve(file, env).unwrap();
    assert_eq!(config.bind_addr.port(), 7000);
    assert!(config.link_mode);
    assert_eq!(config.components_dir, PathBuf::from("/srv/components"));
    // Not overridden: file wins over default
    assert_eq!(config.default_language, "de");
}

#[test]
fn test_invalid_bind_address_is_an_error() {
    let env = env_from(&[("TAGKIT_BIND", "not-an-address")]);
    let err = Config::resolve(FileConfig::default(), env).unwrap_err();
    assert!(err.to_string().contains("not-an-address"));
}

#[test]
fn test_resource_base_trailing_slash_trimmed() {
    let file = FileConfig {
        resource_base: Some("/assets/".to_string()),
        ..Default::default()
    };
    let config = Config::resolve(file, no_env).unwrap();
    assert_eq!(config.resource_base, "/assets");
}

#[test]
fn test_resource_base_gets_leading_slash() {
    let file = FileConfig {
        resource_base: Some("assets".to_string()),
        ..Default::default()
    };
    let config = Config::resolve(file, no_env).unwrap();
    assert_eq!(config.resource_base, "/assets");
}

#[test]
fn test_invalid_resource_base_is_an_error() {
    for raw in ["", "/", "/a//b", "/:file", "/*rest", "/taghelper", "/has space"] {
        let file = FileConfig {
            resource_base: Some(raw.to_string()),
            ..Default::default()
        };
        let err = Config::resolve(file, no_env).unwrap_err();
        assert!(
            err.to_string().contains("resource_base"),
            "{:?} should be rejected, got: {}",
            raw,
            err
        );
    }
}

#[test]
fn test_unknown_logging_key_is_an_error() {
    let parsed: Result<FileConfig, _> = toml::from_str("[logging]\nfile_prefix = \"x\"\n");
    assert!(parsed.is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_default_catalog_contains_samples() {
    let catalog = Config::default().catalog();
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.resolve("inst-hello").unwrap().key.base_name,
        "HelloTagHelper"
    );
    // Tag derived from base name
    assert_eq!(
        catalog.resolve("counter").unwrap().key.base_name,
        "CounterTagHelper"
    );
}
