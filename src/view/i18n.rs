//! Token Localizer - `@_Key_` replacement from per-language dictionaries
//!
//! Dictionaries are plain script files assigning a JSON object to a variable:
//!
//! ```js
//! var i18n = { "_Title_": "Hello from Instancium!" };
//! ```
//!
//! Only the embedded object is read. Anything that does not parse leaves the
//! markup untouched.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Token key (including its underscores) to localized text
pub type TranslationMap = HashMap<String, String>;

static OBJECT_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)=\s*(\{.*\})\s*;").expect("valid object literal regex"));

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(_[A-Za-z0-9]+_)").expect("valid token regex"));

/// Extract the key/value dictionary from a translation script.
///
/// Returns `None` when no object literal is found, when it is not a flat
/// string map, or when it is empty.
pub fn parse_translations(js: &str) -> Option<TranslationMap> {
    let literal = OBJECT_LITERAL.captures(js)?.get(1)?.as_str();
    let map: TranslationMap = serde_json::from_str(literal).ok()?;
    (!map.is_empty()).then_some(map)
}

/// Replace every `@_Key_` token; unknown keys become `[MISSING _Key_]`
pub fn localize(html: &str, translations: &TranslationMap) -> String {
    TOKEN
        .replace_all(html, |caps: &regex::Captures| {
            let key = &caps[1];
            translations
                .get(key)
                .cloned()
                .unwrap_or_else(|| format!("[MISSING {}]", key))
        })
        .into_owned()
}
