//! Shared test utilities for crawl tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use scopecrawl::error::{FetchError, GraphqlError};
use scopecrawl::hackerone::{ProgramDetail, ProgramSummary, ScopeSource, SearchPage};
use scopecrawl::scope::{InScopeAsset, StructuredScope};

/// In-memory directory. Pages past the last one answer HTTP 404.
#[derive(Default)]
pub struct FakeSource {
    pub pages: Vec<Vec<ProgramSummary>>,
    /// Detail pages by program url; a missing entry answers HTTP 500
    pub details: HashMap<String, String>,
    pub structured: HashMap<String, Vec<StructuredScope>>,
    pub assets: HashMap<String, Vec<InScopeAsset>>,
    /// Handles whose GraphQL answer has no `team`
    pub broken_handles: Vec<String>,
    pub requested_pages: RefCell<Vec<u32>>,
    pub legacy_calls: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn with_program(mut self, page: usize, url: &str, handle: Option<&str>) -> Self {
        while self.pages.len() <= page {
            self.pages.push(Vec::new());
        }
        self.pages[page].push(ProgramSummary {
            url: url.to_string(),
            name: Some(format!("Program {url}")),
        });
        if let Some(handle) = handle {
            self.details.insert(url.to_string(), handle.to_string());
        }
        self
    }

    pub fn with_structured(mut self, handle: &str, scopes: Vec<StructuredScope>) -> Self {
        self.structured.insert(handle.to_string(), scopes);
        self
    }

    pub fn with_assets(mut self, handle: &str, assets: Vec<InScopeAsset>) -> Self {
        self.assets.insert(handle.to_string(), assets);
        self
    }

    pub fn with_broken(mut self, handle: &str) -> Self {
        self.broken_handles.push(handle.to_string());
        self
    }
}

impl ScopeSource for FakeSource {
    fn search_page(&self, page: u32) -> Result<SearchPage, FetchError> {
        self.requested_pages.borrow_mut().push(page);
        match self.pages.get(page as usize - 1) {
            Some(results) => Ok(SearchPage {
                results: results.clone(),
            }),
            None => Err(FetchError::Status {
                url: format!("/programs/search?page={page}"),
                code: 404,
            }),
        }
    }

    fn program_detail(&self, program: &ProgramSummary) -> Result<ProgramDetail, FetchError> {
        match self.details.get(&program.url) {
            Some(handle) => Ok(ProgramDetail {
                handle: handle.clone(),
            }),
            None => Err(FetchError::Status {
                url: program.url.clone(),
                code: 500,
            }),
        }
    }

    fn structured_scopes(&self, handle: &str) -> Result<Vec<StructuredScope>, GraphqlError> {
        if self.broken_handles.iter().any(|h| h == handle) {
            return Err(GraphqlError::MissingField {
                handle: handle.to_string(),
                field: "data.team",
            });
        }
        Ok(self.structured.get(handle).cloned().unwrap_or_default())
    }

    fn in_scope_assets(&self, handle: &str) -> Result<Vec<InScopeAsset>, GraphqlError> {
        self.legacy_calls.borrow_mut().push(handle.to_string());
        Ok(self.assets.get(handle).cloned().unwrap_or_default())
    }
}

pub fn structured(
    identifier: &str,
    display: &str,
    bounty: Option<bool>,
    submission: bool,
) -> StructuredScope {
    StructuredScope {
        identifier: identifier.to_string(),
        display_name: Some(display.to_string()),
        eligible_for_bounty: bounty,
        eligible_for_submission: Some(submission),
        instruction: None,
    }
}

pub fn asset(identifier: &str, asset_type: &str, bounty: Option<bool>) -> InScopeAsset {
    InScopeAsset {
        asset_identifier: identifier.to_string(),
        asset_type: asset_type.to_string(),
        eligible_for_bounty: bounty,
    }
}
