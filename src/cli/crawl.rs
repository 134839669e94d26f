//! Crawl commands: the whole directory, or a single program

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

use scopecrawl::config::Config;
use scopecrawl::crawler::{self, CrawlOptions, CrawlStats};
use scopecrawl::hackerone::HackerOneClient;
use scopecrawl::output::{self, RunSummary};
use scopecrawl::scope::ScopeCollector;

/// Flags shared by every command that produces result files
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Directory for the result files (overrides [output].dir)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Skip the legacy in-scope assets query
    #[arg(long)]
    pub no_legacy: bool,

    /// Keep duplicate identifiers in the target lists
    #[arg(long)]
    pub keep_duplicates: bool,

    /// Also write summary.json
    #[arg(long)]
    pub summary: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if self.no_legacy {
            config.source.legacy_query = false;
        }
        if self.keep_duplicates {
            config.output.dedupe = false;
        }
        if self.summary {
            config.output.summary = true;
        }
    }
}

/// Crawl every program in the directory
pub fn crawl_command(
    config_override: Option<&Path>,
    max_pages: Option<u32>,
    args: RunArgs,
) -> Result<()> {
    let mut config = Config::load(config_override)?;
    args.apply(&mut config);
    if max_pages.is_some() {
        config.source.max_pages = max_pages;
    }

    let options = CrawlOptions::from(&config.source);
    let client = HackerOneClient::new(config.source.clone());
    let mut collector = ScopeCollector::new(config.output.dedupe);

    info!("Crawling {}", config.source.base_url);
    let stats = crawler::crawl(&client, &options, &mut collector).context("Crawl aborted")?;

    finish(&config, &collector, stats, args.json)
}

/// Collect the scope of a single program handle
pub fn program_command(config_override: Option<&Path>, handle: &str, args: RunArgs) -> Result<()> {
    let mut config = Config::load(config_override)?;
    args.apply(&mut config);

    let options = CrawlOptions::from(&config.source);
    let client = HackerOneClient::new(config.source.clone());
    let mut collector = ScopeCollector::new(config.output.dedupe);

    let stats = crawler::crawl_program(&client, handle.trim(), &options, &mut collector)
        .with_context(|| format!("Failed to collect scope for '{}'", handle))?;

    finish(&config, &collector, stats, args.json)
}

fn finish(
    config: &Config,
    collector: &ScopeCollector,
    stats: CrawlStats,
    json: bool,
) -> Result<()> {
    let dir = &config.output.dir;
    let written = output::write_results(dir, collector)?;
    let summary = RunSummary::new(collector, stats);

    if config.output.summary {
        output::write_summary(dir, &summary)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "Collected {} of {} programs: {}",
        summary.stats.programs_collected(),
        summary.stats.programs_seen,
        collector.summary()
    );

    if !summary.stats.programs_skipped.is_empty() {
        println!("\nSkipped programs:");
        for name in &summary.stats.programs_skipped {
            println!("  - {}", name);
        }
    }

    println!("\nWrote:");
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}
