//! Result file writers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::Writer;
use serde::Serialize;

use crate::crawler::CrawlStats;
use crate::scope::{CsvRow, ScopeCollector};

pub const DOMAINS_TXT: &str = "domains.txt";
pub const DOMAINS_WITH_BOUNTIES_TXT: &str = "domains_with_bounties.txt";
pub const SOURCE_CODE_TXT: &str = "source_code.txt";
pub const SOURCE_CODE_WITH_BOUNTIES_TXT: &str = "source_code_with_bounties.txt";
pub const DOMAINS_CSV: &str = "domains.csv";
pub const SOURCE_CODE_CSV: &str = "source_code.csv";
pub const SUMMARY_JSON: &str = "summary.json";

const DOMAINS_CSV_HEADER: [&str; 3] = ["handle", "domain", "eligible_for_bounty"];
const SOURCE_CODE_CSV_HEADER: [&str; 3] = ["handle", "source_code", "eligible_for_bounty"];

/// Machine-readable overview of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub domains: usize,
    pub domains_with_bounty: usize,
    pub source_code: usize,
    pub source_code_with_bounty: usize,
    pub stats: CrawlStats,
}

impl RunSummary {
    pub fn new(collector: &ScopeCollector, stats: CrawlStats) -> Self {
        let targets = &collector.targets;
        Self {
            generated_at: Utc::now(),
            domains: targets.domains.len(),
            domains_with_bounty: targets.with_bounty.len(),
            source_code: targets.source_code.len(),
            source_code_with_bounty: targets.source_code_with_bounty.len(),
            stats,
        }
    }
}

/// Write every result file into `dir`, creating it if needed.
///
/// Returns the paths written.
pub fn write_results(dir: &Path, collector: &ScopeCollector) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let targets = &collector.targets;
    let lists: [(&str, &[String]); 4] = [
        (DOMAINS_TXT, targets.domains.items()),
        (DOMAINS_WITH_BOUNTIES_TXT, targets.with_bounty.items()),
        (SOURCE_CODE_TXT, targets.source_code.items()),
        (SOURCE_CODE_WITH_BOUNTIES_TXT, targets.source_code_with_bounty.items()),
    ];

    let mut written = Vec::new();
    for (name, items) in lists {
        let path = dir.join(name);
        write_file(&path, &items.join("\n"))?;
        written.push(path);
    }

    for (name, header, rows) in [
        (DOMAINS_CSV, DOMAINS_CSV_HEADER, &collector.domain_rows),
        (SOURCE_CODE_CSV, SOURCE_CODE_CSV_HEADER, &collector.source_code_rows),
    ] {
        let path = dir.join(name);
        let content = render_csv(header, rows)
            .with_context(|| format!("Failed to render {}", path.display()))?;
        write_file(&path, &content)?;
        written.push(path);
    }

    Ok(written)
}

pub fn write_summary(dir: &Path, summary: &RunSummary) -> Result<PathBuf> {
    let path = dir.join(SUMMARY_JSON);
    let content = serde_json::to_string_pretty(summary).context("Failed to serialize summary")?;
    write_file(&path, &content)?;
    Ok(path)
}

/// Header record followed by one record per row, quoted where needed.
pub fn render_csv(header: [&str; 3], rows: &[CsvRow]) -> Result<String> {
    let mut wtr = Writer::from_writer(vec![]);

    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(row.record())?;
    }

    let data = wtr.into_inner()?;
    Ok(String::from_utf8(data)?)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
