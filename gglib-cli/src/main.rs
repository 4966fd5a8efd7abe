//! gglib CLI — catalog and launch local GGUF models.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// gglib: manage and run local GGUF models
#[derive(Parser, Debug)]
#[command(name = "gglib", version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Register a GGUF model file in the catalog
    Add {
        /// Path to the .gguf model file
        path: PathBuf,

        /// Model name (prompted for when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Parameter count in billions, e.g. 7.0 (prompted for when omitted)
        #[arg(short, long)]
        parameters: Option<f64>,

        /// Maximum context length the model supports (prompted for when omitted)
        #[arg(short = 'c', long)]
        max_context: Option<i64>,
    },
    /// List all cataloged models
    List,
    /// Show a single catalog entry
    Show {
        /// Catalog id (see `gglib list`)
        id: i64,
    },
    /// Launch llama-server against a cataloged model (blocks until it exits)
    Serve {
        /// Catalog id (see `gglib list`)
        id: i64,

        /// Context length passed as -c; omitted means the server's default
        #[arg(short, long)]
        ctx: Option<i64>,
    },
    /// Run llama-cli against a cataloged model (blocks until it exits)
    Run {
        /// Catalog id (see `gglib list`)
        id: i64,

        /// Context length passed as -c; omitted means the binary's default
        #[arg(short, long)]
        ctx: Option<i64>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create the default configuration file
    Init,
    /// Show the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up tracing: human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    let log_dir = directories::ProjectDirs::from("dev", "gglib", "gglib")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "gglib.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    commands::handle_command(cli.command).await
}
