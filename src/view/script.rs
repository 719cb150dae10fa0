//! Script Binder - point component scripts at their own instance
//!
//! Component scripts are authored against a generic root lookup:
//!
//! ```js
//! const el = document.querySelector("tag-helper");
//! ```
//!
//! Binding rewrites that lookup to the rendered instance id, so two copies of
//! the same component on one page each drive only their own subtree.

/// Generic root lookup used by component scripts
pub const ROOT_PLACEHOLDER: &str = r#"document.querySelector("tag-helper")"#;

const ROOT_PLACEHOLDER_SINGLE: &str = "document.querySelector('tag-helper')";

/// Replace every generic root lookup with one addressing `#component_id`
pub fn bind_script(js: &str, component_id: &str) -> String {
    let bound = format!(r##"document.querySelector("#{}")"##, component_id);
    js.replace(ROOT_PLACEHOLDER, &bound)
        .replace(ROOT_PLACEHOLDER_SINGLE, &bound)
}

/// Wrap a script body in an immediately-invoked arrow function
pub fn wrap_isolated(js: &str) -> String {
    format!("(() => {{\n{}\n}})();", js)
}

/// Inline `<script>` block for a bound script
pub fn script_block(js: &str) -> String {
    format!("<script>\n{}\n</script>", wrap_isolated(js))
}
