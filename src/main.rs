//! stylescope CLI
//!
//! Entry point for the `stylescope` inspection tool.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use stylescope::config::builtin_theme_value;
use stylescope::{content, ConflictPolicy, ResolveOptions, ResolvedConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "stylescope.json";

#[derive(Parser)]
#[command(name = "stylescope")]
#[command(about = "Resolve utility-class CSS configs and check content scope", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration as JSON
    Resolve {
        /// Path to config file (default: stylescope.json)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Shape conflict policy: prefer-extension, prefer-base or reject
        #[arg(long, default_value = "prefer-extension")]
        policy: ConflictPolicy,
    },

    /// Explain whether paths are in content scope
    Explain {
        /// Path to config file (default: stylescope.json)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Relative paths to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List in-scope files under a directory
    Scan {
        /// Path to config file (default: stylescope.json)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Directory to walk (default: current directory)
        root: Option<PathBuf>,
    },

    /// Print the built-in base theme
    Defaults,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { config, policy } => run_resolve(config, policy),
        Commands::Explain { config, json, paths } => run_explain(config, json, &paths),
        Commands::Scan { config, root } => run_scan(config, root),
        Commands::Defaults => print_json(&builtin_theme_value()),
    }
}

fn load(config_path: Option<PathBuf>, policy: ConflictPolicy) -> ResolvedConfig {
    let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let options = ResolveOptions::default().with_policy(policy);

    match ResolvedConfig::from_file(&path, &options) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn run_resolve(config_path: Option<PathBuf>, policy: ConflictPolicy) {
    let resolved = load(config_path, policy);

    match resolved.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_explain(config_path: Option<PathBuf>, json_output: bool, paths: &[PathBuf]) {
    let resolved = load(config_path, ConflictPolicy::default());
    let matcher = resolved.matcher();

    let mut all_in_scope = true;
    let mut report = Vec::new();
    for path in paths {
        let matched = matcher.matching_patterns(path);
        all_in_scope &= !matched.is_empty();
        report.push(serde_json::json!({
            "path": path.to_string_lossy(),
            "in_scope": !matched.is_empty(),
            "patterns": matched,
        }));
    }

    if json_output {
        print_json(&serde_json::Value::Array(report));
    } else {
        if matcher.is_empty() {
            println!("No content patterns configured; nothing is in scope.");
        }
        for entry in &report {
            let path = entry["path"].as_str().unwrap_or_default();
            match entry["patterns"].as_array() {
                Some(patterns) if !patterns.is_empty() => {
                    let names: Vec<&str> = patterns.iter().filter_map(|p| p.as_str()).collect();
                    println!("  {}: in scope ({})", path, names.join(", "));
                }
                _ => println!("  {}: not in scope", path),
            }
        }
    }

    if !all_in_scope {
        process::exit(2);
    }
}

fn run_scan(config_path: Option<PathBuf>, root: Option<PathBuf>) {
    let resolved = load(config_path, ConflictPolicy::default());
    let root = root.unwrap_or_else(|| PathBuf::from("."));

    match content::scan(Path::new(&root), resolved.matcher()) {
        Ok(files) => {
            for file in files {
                println!("{}", file.display());
            }
        }
        Err(e) => {
            eprintln!("Scan error: {}", e);
            process::exit(1);
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
