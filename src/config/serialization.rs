//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize the components list to `[[components]]` tables
    pub(super) fn components_to_toml(&self) -> String {
        if self.components.is_empty() {
            return r#"
# [[components]]
# tag = "inst-hello"             # Optional: derived from base_name when omitted
# namespace = "Samples"
# base_name = "HelloTagHelper"   # Loads Samples.HelloTagHelper.html/.css/.js
"#
            .to_string();
        }

        let mut output = String::from("\n");
        for component in &self.components {
            output.push_str("[[components]]\n");
            if let Some(tag) = &component.tag {
                output.push_str(&format!("tag = \"{}\"\n", tag));
            }
            output.push_str(&format!("namespace = \"{}\"\n", component.namespace));
            output.push_str(&format!("base_name = \"{}\"\n", component.base_name));
            output.push('\n');
        }
        output
    }

    /// Render the full config file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# tagkit configuration

# HTTP bind address
bind_addr = "{bind}"

# Directory holding component assets ({{namespace}}.{{base_name}}.html, .css, .js)
components_dir = "{components_dir}"

# Deliver component css/js as content-addressed resources (true)
# or inline <style>/<script> blocks (false)
link_mode = {link_mode}

# Language used when a request does not name one
default_language = "{lang}"

# URL prefix for /style-{{hash}}.css and /script-{{hash}}.js
resource_base = "{resource_base}"

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# Also write JSON lines to rolling files in this directory
{log_json_dir}
rotation = "{log_rotation}"  # hourly, daily, never
{components}"#,
            bind = self.bind_addr,
            components_dir = self.components_dir.display(),
            link_mode = self.link_mode,
            lang = self.default_language,
            resource_base = self.resource_base,
            log_level = self.logging.level,
            log_json_dir = match &self.logging.json_dir {
                Some(dir) => format!("json_dir = \"{}\"", dir.display()),
                None => "# json_dir = \"./logs\"".to_string(),
            },
            log_rotation = self.logging.rotation.as_str(),
            components = self.components_to_toml(),
        )
    }
}
