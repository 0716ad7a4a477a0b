// CLI module - command-line argument parsing and handlers
//
// Running without a subcommand starts the block host (TUI, or headless with
// --headless). Subcommands:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Show config file path
// - blocks: List registered block paths and their calls

use crate::config::{Config, VERSION};
use crate::host::BlockRegistry;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// spinwheel - digit-wheel numeric entry blocks in the terminal
#[derive(Parser, Debug)]
#[command(name = "spinwheel")]
#[command(version = VERSION)]
#[command(about = "Host digit-wheel widget blocks in the terminal", long_about = None)]
pub struct Cli {
    /// Design file to load instead of the configured/built-in one
    #[arg(long, global = true)]
    pub design: Option<PathBuf>,

    /// Read host calls from stdin and write signals to stdout (no TUI)
    #[arg(long, global = true)]
    pub headless: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
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

    /// List registered blocks and the calls they accept
    Blocks,
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_command(cli: &Cli) -> bool {
    match &cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if *path {
                handle_config_path();
            } else if *show {
                handle_config_show(cli);
            } else if *reset {
                handle_config_reset();
            } else {
                println!("Usage: spinwheel config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            true
        }
        Some(Commands::Blocks) => {
            print!("{}", blocks_listing(&BlockRegistry::with_builtin()));
            true
        }
        None => false,
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show(cli: &Cli) {
    let mut config = Config::from_env();
    config.apply_cli(cli.design.clone(), cli.headless);

    println!("# Effective configuration (flags > env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

/// One paragraph per registered block: path, summary, calls, design params
fn blocks_listing(registry: &BlockRegistry) -> String {
    let mut out = String::new();
    for entry in registry.entries() {
        let params: Vec<&str> = entry.setters.iter().map(|s| s.param).collect();
        out.push_str(&format!("{}\n", entry.path));
        out.push_str(&format!("    {}\n", entry.summary));
        out.push_str(&format!("    calls:  {}\n", entry.calls.join(", ")));
        out.push_str(&format!("    params: {}\n\n", params.join(", ")));
    }
    out
}
