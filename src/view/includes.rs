//! Component-relative asset references in templates
//!
//! Templates opt in to their side assets with ordinary tags:
//!
//! ```html
//! <link rel="stylesheet" href="./HelloTagHelper.css">
//! <script src="./HelloTagHelper.js"></script>
//! ```
//!
//! Only references to the component's own base name count. Attribute order,
//! quote style and tag case are not significant.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `<link ... href="./{name}.css" ...>`, capturing `name`
static STYLE_INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link\b[^>]*?\bhref\s*=\s*["']\./([^"'/]+)\.css["'][^>]*>"#)
        .expect("valid style include regex")
});

/// `<script ... src="./{name}.js" ...></script>`, capturing `name`
static SCRIPT_INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script\b[^>]*?\bsrc\s*=\s*["']\./([^"'/]+)\.js["'][^>]*>\s*</script>"#)
        .expect("valid script include regex")
});

/// Remove the component's stylesheet reference. `None` if the template has none.
pub fn strip_style_include(html: &str, base_name: &str) -> Option<String> {
    strip(&STYLE_INCLUDE, html, base_name)
}

/// Remove the component's script reference. `None` if the template has none.
pub fn strip_script_include(html: &str, base_name: &str) -> Option<String> {
    strip(&SCRIPT_INCLUDE, html, base_name)
}

/// Drop every match whose captured name is `base_name`; other components'
/// references stay in place
fn strip(pattern: &Regex, html: &str, base_name: &str) -> Option<String> {
    let mut found = false;
    let stripped = pattern.replace_all(html, |caps: &Captures| {
        if caps[1].eq_ignore_ascii_case(base_name) {
            found = true;
            String::new()
        } else {
            caps[0].to_string()
        }
    });
    found.then(|| stripped.into_owned())
}
