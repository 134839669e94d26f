//! Program directory access
//!
//! The crawl needs four things from the directory: a page of program
//! listings, the detail record of one program (for its handle), and the two
//! GraphQL scope queries. [`ScopeSource`] captures exactly that so the crawl
//! loop does not care whether it talks to the live site or to fixtures.

mod client;
mod queries;

pub use client::HackerOneClient;
pub use queries::{
    graphql_request, parse_in_scope_assets, parse_structured_scopes, IN_SCOPE_ASSETS_QUERY,
    STRUCTURED_SCOPES_QUERY,
};

use serde::{Deserialize, Serialize};

use crate::error::{FetchError, GraphqlError};
use crate::scope::{InScopeAsset, StructuredScope};

/// One program as listed by the directory search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramSummary {
    /// Path of the program page relative to the site root, e.g. "/security"
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl ProgramSummary {
    /// Name for log output, falling back to the page path.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.url)
    }
}

/// A page of directory search results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    pub results: Vec<ProgramSummary>,
}

/// The fields of a program's detail page that the crawl uses.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramDetail {
    pub handle: String,
}

/// Anything that can answer the crawl's directory and scope queries.
pub trait ScopeSource {
    /// Fetch one page (1-based) of the program listing.
    fn search_page(&self, page: u32) -> Result<SearchPage, FetchError>;

    /// Fetch the detail record for a listed program.
    fn program_detail(&self, program: &ProgramSummary) -> Result<ProgramDetail, FetchError>;

    /// Run the structured scope search for a program handle.
    fn structured_scopes(&self, handle: &str) -> Result<Vec<StructuredScope>, GraphqlError>;

    /// Run the legacy in-scope assets query for a program handle.
    fn in_scope_assets(&self, handle: &str) -> Result<Vec<InScopeAsset>, GraphqlError>;
}
