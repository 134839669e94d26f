use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

use cli::crawl::RunArgs;

#[derive(Parser)]
#[command(name = "scopecrawl")]
#[command(about = "Enumerate bug bounty program scopes into flat target lists")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.scopecrawl/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl every program in the directory (default)
    Crawl {
        /// Stop after this many search pages
        #[arg(long)]
        max_pages: Option<u32>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Collect the scope of a single program by handle
    Program {
        /// Program handle, e.g. "security"
        handle: String,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Some(Commands::Crawl { max_pages, run }) => {
            cli::crawl::crawl_command(config, max_pages, run)?;
        }
        Some(Commands::Program { handle, run }) => {
            cli::crawl::program_command(config, &handle, run)?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(cli.config.clone(), force)?;
        }
        None => {
            cli::crawl::crawl_command(config, None, RunArgs::default())?;
        }
    }

    Ok(())
}
