// Startup module - displays banner and component catalog
//
// Printed once before the server starts accepting requests:
// - Version info
// - Configuration source
// - Components the fragment endpoint will answer for

use tagkit::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Print the startup banner and component list
pub fn print_startup(config: &Config) {
    use colors::*;

    // Banner
    println!();
    println!("  {BOLD}{CYAN}tagkit{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Scoped HTML component fragments{RESET}");
    println!();

    // Config file status
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!(
        "  {DIM}Components:{RESET} {}",
        config.components_dir.display()
    );
    println!();

    let catalog = config.catalog();
    if catalog.is_empty() {
        println!("  {YELLOW}▸{RESET} {YELLOW}No components configured{RESET}");
    } else {
        println!("  {DIM}Components...{RESET}");
        for component in catalog.iter() {
            println!(
                "    {GREEN}✓{RESET} {:<16} {DIM}{}{RESET}",
                component.tag,
                component.key.logical_path(&tagkit::view::AssetKind::Html)
            );
        }
    }
    println!();

    let mode = if config.link_mode {
        format!("link {DIM}({}/...){RESET}", config.resource_base)
    } else {
        "inline".to_string()
    };
    println!("  {DIM}Delivery:{RESET} {mode}");
    println!(
        "  {MAGENTA}▸{RESET} Listening on {BOLD}{}{RESET}",
        config.bind_addr
    );
    println!();
}
