//! GraphQL query text and response unwrapping

use serde::Deserialize;
use serde_json::Value;

use crate::error::GraphqlError;
use crate::scope::{InScopeAsset, StructuredScope};

pub const STRUCTURED_SCOPES_QUERY: &str = r#"
query PolicySearchStructuredScopesQuery($handle: String!) {
  team(handle: $handle) {
    structured_scopes_search {
      nodes {
        ... on StructuredScopeDocument {
          identifier
          eligible_for_bounty
          eligible_for_submission
          display_name
          instruction
        }
      }
    }
  }
}
"#;

pub const IN_SCOPE_ASSETS_QUERY: &str = r#"
query TeamAssets($handle: String!) {
  team(handle: $handle) {
    in_scope_assets: structured_scopes(
      archived: false
      eligible_for_submission: true
    ) {
      edges {
        node {
          asset_identifier
          asset_type
          eligible_for_bounty
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct AssetEdge {
    node: InScopeAsset,
}

/// Build the JSON body for a handle-parameterized query.
pub fn graphql_request(query: &str, handle: &str) -> Value {
    serde_json::json!({
        "query": query,
        "variables": { "handle": handle },
    })
}

/// Extract `data.team.structured_scopes_search.nodes`.
pub fn parse_structured_scopes(
    handle: &str,
    body: &Value,
) -> Result<Vec<StructuredScope>, GraphqlError> {
    let team = team(handle, body)?;
    let search = field(
        handle,
        team,
        "structured_scopes_search",
        "data.team.structured_scopes_search",
    )?;
    let nodes = field(handle, search, "nodes", "data.team.structured_scopes_search.nodes")?;

    serde_json::from_value(nodes.clone()).map_err(|source| GraphqlError::Malformed {
        handle: handle.to_string(),
        source,
    })
}

/// Extract the nodes of `data.team.in_scope_assets.edges`.
pub fn parse_in_scope_assets(
    handle: &str,
    body: &Value,
) -> Result<Vec<InScopeAsset>, GraphqlError> {
    let team = team(handle, body)?;
    let assets = field(handle, team, "in_scope_assets", "data.team.in_scope_assets")?;
    let edges = field(handle, assets, "edges", "data.team.in_scope_assets.edges")?;

    let edges: Vec<AssetEdge> =
        serde_json::from_value(edges.clone()).map_err(|source| GraphqlError::Malformed {
            handle: handle.to_string(),
            source,
        })?;
    Ok(edges.into_iter().map(|edge| edge.node).collect())
}

fn team<'a>(handle: &str, body: &'a Value) -> Result<&'a Value, GraphqlError> {
    let data = match body.get("data").filter(|v| !v.is_null()) {
        Some(data) => data,
        None => {
            if let Some(messages) = error_messages(body) {
                return Err(GraphqlError::Server {
                    handle: handle.to_string(),
                    messages,
                });
            }
            return Err(GraphqlError::MissingField {
                handle: handle.to_string(),
                field: "data",
            });
        }
    };
    field(handle, data, "team", "data.team")
}

/// Null counts as missing.
fn field<'a>(
    handle: &str,
    value: &'a Value,
    key: &str,
    path: &'static str,
) -> Result<&'a Value, GraphqlError> {
    value
        .get(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| GraphqlError::MissingField {
            handle: handle.to_string(),
            field: path,
        })
}

fn error_messages(body: &Value) -> Option<String> {
    let errors = body.get("errors")?.as_array()?;
    let messages = errors
        .iter()
        .map(|e| {
            e.get("message")
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| e.to_string())
        })
        .collect::<Vec<_>>();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join("; "))
    }
}
