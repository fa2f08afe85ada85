//! Treegraph CLI entry point

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "treegraph")]
#[command(about = "Convert source trees into property graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a file or directory into a graph
    Convert {
        /// Source file or directory
        path: PathBuf,

        /// Write the graph here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Config file (defaults to treegraph.toml at the input root)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print vertex and edge counts for a file or directory
    Stats {
        /// Source file or directory
        path: PathBuf,

        /// Config file (defaults to treegraph.toml at the input root)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show version
    Version,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Dot,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = std::env::var("TREEGRAPH_LOG")
        .map(tracing_subscriber::EnvFilter::new)
        .unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!(
                "treegraph={0},treegraph_core={0},treegraph_indexer={0}",
                log_level
            ))
        });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Convert {
            path,
            output,
            format,
            config,
        } => commands::convert(&path, output.as_deref(), format, config.as_deref()),
        Commands::Stats { path, config } => commands::stats(&path, config.as_deref()),
        Commands::Version => {
            println!("treegraph v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
