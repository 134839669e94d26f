//! Scope classification and target accumulation
//!
//! Every scope record returned for a program is run through the classifier,
//! which decides whether it is a domain, a source code repository, or neither,
//! and pushes normalized identifiers into a single [`ScopeCollector`] that
//! lives for the whole crawl.

mod classifier;
mod models;

pub use classifier::{
    classify_in_scope_asset, classify_structured, looks_like_repository, normalize_source_code,
    split_identifiers,
};
pub use models::{
    bounty_flag, InScopeAsset, StructuredScope, ASSET_DOMAIN, ASSET_SOURCE_CODE, ASSET_URL,
    DISPLAY_DOMAIN, DISPLAY_SOURCE_CODE,
};

use std::collections::HashMap;

/// An insertion-ordered list of identifiers, optionally deduplicated.
///
/// Deduplication ignores ASCII case; the first spelling seen is the one kept.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    items: Vec<String>,
    /// Lowercased identifier -> index into `items`
    seen: HashMap<String, usize>,
    dedupe: bool,
}

impl Bucket {
    pub fn new(dedupe: bool) -> Self {
        Self {
            items: Vec::new(),
            seen: HashMap::new(),
            dedupe,
        }
    }

    /// Insert an identifier and return the spelling stored for it.
    ///
    /// For a duplicate this is the earlier spelling, not `item`.
    pub fn insert(&mut self, item: &str) -> &str {
        if self.dedupe {
            let key = item.to_ascii_lowercase();
            if let Some(&index) = self.seen.get(&key) {
                return &self.items[index];
            }
            self.seen.insert(key, self.items.len());
        }
        self.items.push(item.to_string());
        &self.items[self.items.len() - 1]
    }

    /// Exact (case-sensitive) membership.
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|x| x == item)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The four flat target lists produced by a run.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    pub domains: Bucket,
    pub with_bounty: Bucket,
    pub source_code: Bucket,
    pub source_code_with_bounty: Bucket,
}

impl TargetSet {
    pub fn new(dedupe: bool) -> Self {
        Self {
            domains: Bucket::new(dedupe),
            with_bounty: Bucket::new(dedupe),
            source_code: Bucket::new(dedupe),
            source_code_with_bounty: Bucket::new(dedupe),
        }
    }
}

/// One accepted scope entry as logged to CSV. Never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub handle: String,
    pub identifier: String,
    pub eligible_for_bounty: bool,
}

impl CsvRow {
    /// Fields in file order, with the flag rendered as `True`/`False`.
    pub fn record(&self) -> [&str; 3] {
        let flag = if self.eligible_for_bounty { "True" } else { "False" };
        [self.handle.as_str(), self.identifier.as_str(), flag]
    }
}

/// Accumulates classified targets across every program of a run.
#[derive(Debug, Clone, Default)]
pub struct ScopeCollector {
    pub targets: TargetSet,
    pub domain_rows: Vec<CsvRow>,
    pub source_code_rows: Vec<CsvRow>,
}

impl ScopeCollector {
    pub fn new(dedupe: bool) -> Self {
        Self {
            targets: TargetSet::new(dedupe),
            domain_rows: Vec::new(),
            source_code_rows: Vec::new(),
        }
    }

    pub fn add_domain(&mut self, handle: &str, domain: &str, bounty: bool) {
        let kept = self.targets.domains.insert(domain);
        if bounty {
            self.targets.with_bounty.insert(kept);
        }
        self.domain_rows.push(CsvRow {
            handle: handle.to_string(),
            identifier: domain.to_string(),
            eligible_for_bounty: bounty,
        });
    }

    /// `url` must already be normalized.
    pub fn add_source_code(&mut self, handle: &str, url: &str, bounty: bool) {
        let kept = self.targets.source_code.insert(url);
        if bounty {
            self.targets.source_code_with_bounty.insert(kept);
        }
        self.source_code_rows.push(CsvRow {
            handle: handle.to_string(),
            identifier: url.to_string(),
            eligible_for_bounty: bounty,
        });
    }

    pub fn summary(&self) -> String {
        format!(
            "{} domains ({} with bounty), {} source code repositories ({} with bounty)",
            self.targets.domains.len(),
            self.targets.with_bounty.len(),
            self.targets.source_code.len(),
            self.targets.source_code_with_bounty.len()
        )
    }
}
