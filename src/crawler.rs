//! Sequential crawl over the program directory
//!
//! Failure handling follows three rules:
//! - a search page that fails (non-200 or transport) ends pagination;
//! - a program whose detail page fails is skipped and the crawl moves on;
//! - a GraphQL response without the expected shape aborts the whole run.
//!
//! Responses that arrive but cannot be decoded are treated like the last case.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SourceSettings;
use crate::error::FetchError;
use crate::hackerone::ScopeSource;
use crate::scope::{classify_in_scope_asset, classify_structured, ScopeCollector};

/// Knobs for a single crawl.
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    /// Stop after this many search pages
    pub max_pages: Option<u32>,
    /// Run the legacy in-scope assets query as well
    pub legacy_query: bool,
}

impl From<&SourceSettings> for CrawlOptions {
    fn from(settings: &SourceSettings) -> Self {
        Self {
            max_pages: settings.max_pages,
            legacy_query: settings.legacy_query,
        }
    }
}

/// What happened during a crawl.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlStats {
    pub pages_fetched: u32,
    pub programs_seen: usize,
    /// Programs whose detail page could not be fetched
    pub programs_skipped: Vec<String>,
    pub records_seen: usize,
    pub entries_emitted: usize,
}

impl CrawlStats {
    pub fn programs_collected(&self) -> usize {
        self.programs_seen - self.programs_skipped.len()
    }
}

/// Walk every page of the directory and collect each program's scope.
pub fn crawl<S: ScopeSource>(
    source: &S,
    options: &CrawlOptions,
    out: &mut ScopeCollector,
) -> Result<CrawlStats> {
    let mut stats = CrawlStats::default();
    let mut page: u32 = 1;

    loop {
        if options.max_pages.is_some_and(|max| page > max) {
            info!("Reached page limit ({} pages)", stats.pages_fetched);
            break;
        }

        let listing = match source.search_page(page) {
            Ok(listing) => listing,
            Err(e @ FetchError::Decode { .. }) => {
                return Err(e).with_context(|| format!("Unreadable search page {page}"));
            }
            Err(e) => {
                info!("Pagination stopped at page {}: {}", page, e);
                break;
            }
        };
        stats.pages_fetched += 1;

        if listing.results.is_empty() {
            debug!(page, "empty search page");
            break;
        }

        for program in &listing.results {
            stats.programs_seen += 1;

            let detail = match source.program_detail(program) {
                Ok(detail) => detail,
                Err(e @ FetchError::Decode { .. }) => {
                    return Err(e).with_context(|| {
                        format!("Unreadable detail page for {}", program.display_name())
                    });
                }
                Err(e) => {
                    warn!("Unable to retrieve {}: {}", program.display_name(), e);
                    stats
                        .programs_skipped
                        .push(program.display_name().to_string());
                    continue;
                }
            };

            collect_program(source, &detail.handle, options, out, &mut stats)?;
        }

        page += 1;
    }

    Ok(stats)
}

/// Collect the scope of one program by handle, bypassing the directory.
pub fn crawl_program<S: ScopeSource>(
    source: &S,
    handle: &str,
    options: &CrawlOptions,
    out: &mut ScopeCollector,
) -> Result<CrawlStats> {
    let mut stats = CrawlStats {
        programs_seen: 1,
        ..CrawlStats::default()
    };
    collect_program(source, handle, options, out, &mut stats)?;
    Ok(stats)
}

fn collect_program<S: ScopeSource>(
    source: &S,
    handle: &str,
    options: &CrawlOptions,
    out: &mut ScopeCollector,
    stats: &mut CrawlStats,
) -> Result<()> {
    info!("policy scope {}", handle);

    let scopes = source
        .structured_scopes(handle)
        .context("Structured scope query failed")?;
    for scope in &scopes {
        stats.records_seen += 1;
        stats.entries_emitted += classify_structured(handle, scope, out);
    }

    if options.legacy_query {
        let assets = source
            .in_scope_assets(handle)
            .context("In-scope assets query failed")?;
        for asset in &assets {
            stats.records_seen += 1;
            stats.entries_emitted += classify_in_scope_asset(handle, asset, out);
        }
    }

    Ok(())
}
