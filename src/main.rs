//! Roku Lane CLI
//!
//! Entry point for the `roku-lane` command-line tool.

use clap::{Parser, Subcommand};
use roku_lane::Config;
use std::process;

/// Default location of the configuration file.
const DEFAULT_CONFIG_PATH: &str = "~/.roku_config.json";

#[derive(Parser)]
#[command(name = "roku-lane")]
#[command(about = "Build/deploy configuration lane for Roku devices", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration file
    Validate {
        /// Path to config file (default: ~/.roku_config.json)
        #[arg(long, short = 'c')]
        config: Option<String>,
    },

    /// Create a new configuration file from the built-in template
    Configure {
        /// Path to config file (default: ~/.roku_config.json)
        #[arg(long, short = 'c')]
        config: Option<String>,

        /// Initial key:value edit applied to the scaffolded file
        #[arg(long, short = 'e')]
        edit: Option<String>,
    },

    /// Overwrite a value on the default device or default project
    Edit {
        /// Path to config file (default: ~/.roku_config.json)
        #[arg(long, short = 'c')]
        config: Option<String>,

        /// The key:value expression to apply
        expr: String,
    },

    /// Show the resolved configuration
    Show {
        /// Path to config file (default: ~/.roku_config.json)
        #[arg(long, short = 'c')]
        config: Option<String>,

        /// Output the full resolved document as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => run_validate(config),
        Commands::Configure { config, edit } => run_configure(config, edit),
        Commands::Edit { config, expr } => run_edit(config, &expr),
        Commands::Show { config, json } => run_show(config, json),
    }
}

fn open_config(path: Option<String>) -> Config {
    Config::new(path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH))
}

fn run_validate(path: Option<String>) {
    let mut config = open_config(path);

    if let Err(e) = config.load() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    println!("Configuration valid: {}", config.path().display());
}

fn run_configure(path: Option<String>, edit: Option<String>) {
    let mut config = open_config(path);

    if let Err(e) = config.configure(edit.as_deref()) {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    println!("Created configuration: {}", config.path().display());
}

fn run_edit(path: Option<String>, expr: &str) {
    let mut config = open_config(path);

    if let Err(e) = config.load() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }
    if let Err(e) = config.edit(expr) {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    println!("Updated configuration: {}", config.path().display());
}

fn run_show(path: Option<String>, json_output: bool) {
    let mut config = open_config(path);

    if let Err(e) = config.load() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }
    if let Err(e) = config.parse() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    let Some(parsed) = config.parsed() else {
        eprintln!("Configuration error: no resolved document");
        process::exit(1);
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(parsed).unwrap_or_default());
        return;
    }

    println!("Configuration: {}", config.path().display());
    println!();

    if let Some(name) = parsed["devices"]["default"].as_str() {
        println!("  Default device: {}", name);
        if let Some(ip) = parsed["devices"][name]["ip"].as_str() {
            println!("    IP: {}", ip);
        }
    }
    if let Some(name) = parsed["projects"]["default"].as_str() {
        println!("  Default project: {}", name);
        if let Some(app) = parsed["projects"][name]["app_name"].as_str() {
            println!("    App: {}", app);
        }
        if let Some(stages) = parsed["projects"][name]["stages"].as_object() {
            let names: Vec<&str> = stages.keys().map(String::as_str).collect();
            println!("    Stages: {}", names.join(", "));
        }
    }
    if let Some(root_dir) = config.root_dir() {
        println!("  Root directory: {}", root_dir);
    }
}
