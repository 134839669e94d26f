//! Settings configuration types

use std::path::PathBuf;

use serde::Deserialize;

/// Where programs and scopes are fetched from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    /// Site root; search, detail pages and `/graphql` hang off this
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory search filter
    #[serde(default = "default_search_query")]
    pub search_query: String,

    /// Directory search ordering
    #[serde(default = "default_sort")]
    pub sort: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Stop after this many search pages (unbounded when unset)
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// Also run the older in-scope assets query for every program
    #[serde(default = "default_legacy_query")]
    pub legacy_query: bool,
}

fn default_base_url() -> String {
    "https://hackerone.com".to_string()
}

fn default_search_query() -> String {
    "type:hackerone".to_string()
}

fn default_sort() -> String {
    "published_at:descending".to_string()
}

fn default_user_agent() -> String {
    format!("scopecrawl/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_legacy_query() -> bool {
    true
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_query: default_search_query(),
            sort: default_sort(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_pages: None,
            legacy_query: default_legacy_query(),
        }
    }
}

/// Result file settings
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// Directory the text and CSV files are written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Drop duplicate identifiers (case-insensitive) from the target lists
    #[serde(default = "default_dedupe")]
    pub dedupe: bool,

    /// Also write summary.json
    #[serde(default)]
    pub summary: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_dedupe() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            dedupe: default_dedupe(),
            summary: false,
        }
    }
}
