//! Biblio CLI - Command-line interface for book metadata lookups

mod commands;

use anyhow::Result;
use biblio_core::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate jobs argument (must be at least 1)
fn parse_jobs(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("jobs must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "biblio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Cache directory (overrides BIBLIO_CACHE_PATH)
    #[arg(long, global = true)]
    cache_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up book metadata by ISBN, fetching it if not cached
    Lookup {
        /// ISBN-10 or ISBN-13 (hyphens allowed)
        isbn: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show cached book metadata without contacting any upstream
    Cached {
        /// ISBN-10 or ISBN-13 (hyphens allowed)
        isbn: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Warm the cache from a file of ISBNs (one per line)
    Warm {
        /// Input file path
        input: String,

        /// Number of concurrent lookups (must be at least 1)
        #[arg(short, long, default_value = "4", value_parser = parse_jobs)]
        jobs: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "biblio_cli=debug,biblio_core=debug"
    } else {
        "biblio_cli=info,biblio_core=error"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env()?;
    if let Some(dir) = cli.cache_dir {
        config = config.with_cache_path(dir);
    }

    match cli.command {
        Commands::Lookup { isbn, json } => commands::lookup(&config, &isbn, json).await,

        Commands::Cached { isbn, json } => commands::cached(&config, &isbn, json).await,

        Commands::Warm { input, jobs } => commands::warm(&config, &input, jobs).await,
    }
}
