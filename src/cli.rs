// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Print config file location
// - render <tag>: Compose one fragment and print it

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tagkit::components::{is_valid_component_id, new_component_id};
use tagkit::config::{Config, VERSION};
use tagkit::server::links;
use tagkit::view::registry::ResourceKind;
use tagkit::view::{
    is_valid_language_code, DirLoader, RenderContext, ResourceManifest, ResourceRegistry,
    ViewCompositor,
};

/// tagkit - scoped HTML component fragments
#[derive(Parser)]
#[command(name = "tagkit")]
#[command(version = VERSION)]
#[command(about = "Serve self-contained HTML components as scoped fragments", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Render one component to stdout
    Render {
        /// Component tag, as configured in [[components]]
        tag: String,

        /// Language code (defaults to default_language)
        #[arg(long)]
        lang: Option<String>,

        /// DOM id of the rendered root (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Emit css/js as resource links, with each resource body printed after the fragment
        #[arg(long)]
        link: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub async fn handle_cli() -> Result<bool> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path()?;
            } else if show {
                handle_config_show()?;
            } else if reset {
                handle_config_reset()?;
            } else {
                // No flag provided, show help
                println!("Usage: tagkit config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        Some(Commands::Render {
            tag,
            lang,
            id,
            link,
        }) => {
            handle_render(&tag, lang, id, link).await?;
            Ok(true)
        }
        None => Ok(false), // No subcommand, run the server
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }

    // Write the default config (using Config's single source of truth)
    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

async fn handle_render(
    tag: &str,
    lang: Option<String>,
    id: Option<String>,
    link: bool,
) -> Result<()> {
    let config = Config::from_env()?;
    let catalog = config.catalog();

    let Some(spec) = catalog.resolve(tag) else {
        let known: Vec<&str> = catalog.iter().map(|c| c.tag.as_str()).collect();
        bail!("Unknown component '{}' (configured: {})", tag, known.join(", "));
    };

    let lang = lang.unwrap_or_else(|| config.default_language.clone());
    if !is_valid_language_code(&lang) {
        bail!("Invalid language code: {}", lang);
    }
    let id = id.unwrap_or_else(new_component_id);
    if !is_valid_component_id(&id) {
        bail!("Invalid component id: {}", id);
    }

    let compositor = ViewCompositor::new(
        Arc::new(DirLoader::new(&config.components_dir)),
        Arc::new(ResourceRegistry::new()),
    );
    let ctx = RenderContext::new(id)
        .with_language(lang)
        .with_link_mode(link || config.link_mode);

    let mut manifest = ResourceManifest::new();
    let html = compositor.compose(&spec.key, &ctx, &mut manifest).await?;

    if ctx.link_mode {
        print!(
            "{}",
            linked_output(&html, &manifest, compositor.registry(), &config.resource_base)
        );
    } else {
        println!("{}", html);
    }
    Ok(())
}

/// Fragment wrapped in its link tags, followed by the body behind each link.
///
/// Nothing serves a one-shot render's registry, so the bodies are printed
/// under a `==> url <==` header for the caller to publish at that url.
fn linked_output(
    html: &str,
    manifest: &ResourceManifest,
    registry: &ResourceRegistry,
    base: &str,
) -> String {
    let mut out = links::style_links(manifest, base);
    out.push_str(html);
    out.push('\n');
    out.push_str(&links::script_tags(manifest, base));

    let styles = manifest.styles().map(|h| (ResourceKind::Style, h));
    let scripts = manifest.scripts().map(|h| (ResourceKind::Script, h));
    for (kind, hash) in styles.chain(scripts) {
        let Some(body) = registry.get(kind, hash) else {
            continue;
        };
        out.push_str(&format!(
            "\n==> {} <==\n{}\n",
            links::resource_url(base, kind, hash),
            body
        ));
    }
    out
}
