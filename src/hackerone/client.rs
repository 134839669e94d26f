//! Blocking HTTP client for the HackerOne directory and GraphQL endpoint

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::queries::{
    graphql_request, parse_in_scope_assets, parse_structured_scopes, IN_SCOPE_ASSETS_QUERY,
    STRUCTURED_SCOPES_QUERY,
};
use super::{ProgramDetail, ProgramSummary, ScopeSource, SearchPage};
use crate::config::SourceSettings;
use crate::error::{FetchError, GraphqlError};
use crate::scope::{InScopeAsset, StructuredScope};

/// [`ScopeSource`] backed by the live site.
///
/// Holds one `ureq::Agent`, so connections and cookies are shared across the
/// whole crawl.
pub struct HackerOneClient {
    agent: ureq::Agent,
    settings: SourceSettings,
}

impl HackerOneClient {
    pub fn new(settings: SourceSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(&settings.user_agent)
            .build();
        Self { agent, settings }
    }

    fn base_url(&self) -> &str {
        self.settings.base_url.trim_end_matches('/')
    }

    fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base_url())
    }

    fn call_json<T: DeserializeOwned>(url: &str, req: ureq::Request) -> Result<T, FetchError> {
        let resp = req.call().map_err(|e| map_ureq_error(url, e))?;
        if resp.status() != 200 {
            return Err(FetchError::Status {
                url: url.to_string(),
                code: resp.status(),
            });
        }
        resp.into_json::<T>().map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn post_graphql(&self, query: &str, handle: &str) -> Result<Value, GraphqlError> {
        let url = self.graphql_url();
        let payload = graphql_request(query, handle);
        debug!(handle, "POST {}", url);

        let fetch_err = |source: FetchError| GraphqlError::Fetch {
            handle: handle.to_string(),
            source,
        };

        let body = serde_json::to_string(&payload).map_err(|source| GraphqlError::Malformed {
            handle: handle.to_string(),
            source,
        })?;
        let resp = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .send_string(&body)
            .map_err(|e| fetch_err(map_ureq_error(&url, e)))?;

        let text = resp.into_string().map_err(|e| {
            fetch_err(FetchError::Decode {
                url: url.clone(),
                message: e.to_string(),
            })
        })?;
        serde_json::from_str(&text).map_err(|source| GraphqlError::Malformed {
            handle: handle.to_string(),
            source,
        })
    }
}

impl ScopeSource for HackerOneClient {
    fn search_page(&self, page: u32) -> Result<SearchPage, FetchError> {
        let url = format!("{}/programs/search", self.base_url());
        debug!(page, "GET {}", url);
        let req = self
            .agent
            .get(&url)
            .query("query", &self.settings.search_query)
            .query("sort", &self.settings.sort)
            .query("page", &page.to_string());
        Self::call_json(&url, req)
    }

    fn program_detail(&self, program: &ProgramSummary) -> Result<ProgramDetail, FetchError> {
        let url = format!("{}{}", self.base_url(), program.url);
        debug!("GET {}", url);
        let req = self.agent.get(&url).set("Accept", "application/json");
        Self::call_json(&url, req)
    }

    fn structured_scopes(&self, handle: &str) -> Result<Vec<StructuredScope>, GraphqlError> {
        let body = self.post_graphql(STRUCTURED_SCOPES_QUERY, handle)?;
        parse_structured_scopes(handle, &body)
    }

    fn in_scope_assets(&self, handle: &str) -> Result<Vec<InScopeAsset>, GraphqlError> {
        let body = self.post_graphql(IN_SCOPE_ASSETS_QUERY, handle)?;
        parse_in_scope_assets(handle, &body)
    }
}

fn map_ureq_error(url: &str, err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::Status(code, _) => FetchError::Status {
            url: url.to_string(),
            code,
        },
        ureq::Error::Transport(transport) => FetchError::Transport {
            url: url.to_string(),
            message: transport.to_string(),
        },
    }
}
