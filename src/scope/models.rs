//! Scope records as returned by the program directory's GraphQL endpoint

use serde::{Deserialize, Serialize};

/// Display label of a structured scope that is a domain.
pub const DISPLAY_DOMAIN: &str = "Domain";
/// Display label of a structured scope that is a source code repository.
pub const DISPLAY_SOURCE_CODE: &str = "SourceCode";

/// Legacy asset type for domains.
pub const ASSET_DOMAIN: &str = "Domain";
/// Legacy asset type for URLs (treated as domains).
pub const ASSET_URL: &str = "URL";
/// Legacy asset type for source code repositories.
pub const ASSET_SOURCE_CODE: &str = "SOURCE_CODE";

/// A scope entry from the structured scope search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredScope {
    /// Asset identifier, possibly a comma-joined list
    pub identifier: String,
    /// Human readable asset kind ("Domain", "SourceCode", "Wildcard", ...)
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub eligible_for_bounty: Option<bool>,
    #[serde(default)]
    pub eligible_for_submission: Option<bool>,
    /// Free-form program notes for this asset
    #[serde(default)]
    pub instruction: Option<String>,
}

impl StructuredScope {
    pub fn is_submittable(&self) -> bool {
        self.eligible_for_submission == Some(true)
    }

    pub fn display_is(&self, label: &str) -> bool {
        self.display_name.as_deref() == Some(label)
    }
}

/// A scope entry from the legacy in-scope assets query.
///
/// The query itself filters on `eligible_for_submission: true`, so there is
/// no submission flag to check here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InScopeAsset {
    pub asset_identifier: String,
    pub asset_type: String,
    #[serde(default)]
    pub eligible_for_bounty: Option<bool>,
}

/// Bounty eligibility with null collapsed to `false`.
///
/// Only an explicit `true` from the API counts.
pub fn bounty_flag(raw: Option<bool>) -> bool {
    raw == Some(true)
}
