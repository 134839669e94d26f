//! Domain and source code classification rules

use tracing::debug;

use super::models::{
    bounty_flag, InScopeAsset, StructuredScope, ASSET_DOMAIN, ASSET_SOURCE_CODE, ASSET_URL,
    DISPLAY_DOMAIN, DISPLAY_SOURCE_CODE,
};
use super::ScopeCollector;

const GITHUB_PREFIX: &str = "https://github.com/";

/// Split a possibly comma-joined identifier into its parts.
pub fn split_identifiers(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Whether a source code identifier looks like a URL or repository path.
pub fn looks_like_repository(value: &str) -> bool {
    value.starts_with("https://")
        || value.starts_with("http://")
        || value.starts_with("git")
        || value.starts_with("www")
        || value.contains('/')
}

/// Normalize a source code identifier into an `https://` URL.
///
/// `git*` and `www*` values get a scheme; anything else without one is taken
/// to be a bare `owner/repo` path on GitHub.
pub fn normalize_source_code(value: &str) -> String {
    let value = if value.starts_with("git") || value.starts_with("www") {
        format!("https://{value}")
    } else {
        value.to_string()
    };

    if value.starts_with("http") {
        value
    } else {
        format!("{GITHUB_PREFIX}{value}")
    }
}

/// Classify a record from the structured scope search.
///
/// Returns how many identifiers were emitted.
pub fn classify_structured(
    handle: &str,
    scope: &StructuredScope,
    out: &mut ScopeCollector,
) -> usize {
    if !scope.is_submittable() {
        return 0;
    }

    let bounty = bounty_flag(scope.eligible_for_bounty);
    let mut emitted = 0;

    if scope.display_is(DISPLAY_DOMAIN) || scope.identifier.starts_with('*') {
        emitted += emit_domains(handle, &scope.identifier, bounty, out);
    }

    if scope.display_is(DISPLAY_SOURCE_CODE) {
        emitted += emit_source_code(handle, &scope.identifier, bounty, out);
    }

    emitted
}

/// Classify a record from the legacy in-scope assets query.
///
/// Returns how many identifiers were emitted.
pub fn classify_in_scope_asset(
    handle: &str,
    asset: &InScopeAsset,
    out: &mut ScopeCollector,
) -> usize {
    let bounty = bounty_flag(asset.eligible_for_bounty);
    let mut emitted = 0;

    if asset.asset_type == ASSET_DOMAIN
        || asset.asset_type == ASSET_URL
        || asset.asset_identifier.starts_with('*')
    {
        emitted += emit_domains(handle, &asset.asset_identifier, bounty, out);
    }

    if asset.asset_type == ASSET_SOURCE_CODE {
        emitted += emit_source_code(handle, &asset.asset_identifier, bounty, out);
    }

    emitted
}

fn emit_domains(
    handle: &str,
    identifier: &str,
    bounty: bool,
    out: &mut ScopeCollector,
) -> usize {
    let mut emitted = 0;
    for domain in split_identifiers(identifier) {
        out.add_domain(handle, domain, bounty);
        emitted += 1;
    }
    emitted
}

fn emit_source_code(
    handle: &str,
    identifier: &str,
    bounty: bool,
    out: &mut ScopeCollector,
) -> usize {
    let mut emitted = 0;
    for candidate in split_identifiers(identifier) {
        if !looks_like_repository(candidate) {
            debug!(handle, candidate, "ignoring source code entry that is not a URL or path");
            continue;
        }
        let url = normalize_source_code(candidate);
        out.add_source_code(handle, &url, bounty);
        emitted += 1;
    }
    emitted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured(
        identifier: &str,
        display: &str,
        bounty: Option<bool>,
        submission: Option<bool>,
    ) -> StructuredScope {
        StructuredScope {
            identifier: identifier.to_string(),
            display_name: Some(display.to_string()),
            eligible_for_bounty: bounty,
            eligible_for_submission: submission,
            instruction: None,
        }
    }

    fn asset(identifier: &str, asset_type: &str, bounty: Option<bool>) -> InScopeAsset {
        InScopeAsset {
            asset_identifier: identifier.to_string(),
            asset_type: asset_type.to_string(),
            eligible_for_bounty: bounty,
        }
    }

    #[test]
    fn normalizes_source_code_identifiers() {
        assert_eq!(normalize_source_code("foo/bar"), "https://github.com/foo/bar");
        assert_eq!(
            normalize_source_code("www.example.com/repo"),
            "https://www.example.com/repo"
        );
        assert_eq!(normalize_source_code("gitlab.com/x/y"), "https://gitlab.com/x/y");
        assert_eq!(
            normalize_source_code("https://github.com/acme/app"),
            "https://github.com/acme/app"
        );
        assert_eq!(
            normalize_source_code("http://svn.example.com/trunk"),
            "http://svn.example.com/trunk"
        );
    }

    #[test]
    fn detects_repository_like_values() {
        assert!(looks_like_repository("https://github.com/a/b"));
        assert!(looks_like_repository("github.com/a/b"));
        assert!(looks_like_repository("www.example.com"));
        assert!(looks_like_repository("acme/app"));
        assert!(!looks_like_repository("Our mobile app source"));
        assert!(!looks_like_repository("acme-app"));
    }

    #[test]
    fn splits_and_trims_comma_joined_identifiers() {
        let parts: Vec<_> = split_identifiers("a.com, b.com,,c.com ").collect();
        assert_eq!(parts, vec!["a.com", "b.com", "c.com"]);
    }

    #[test]
    fn structured_domain_requires_submission() {
        let mut out = ScopeCollector::new(true);
        let emitted = classify_structured(
            "acme",
            &structured("acme.com", "Domain", Some(true), Some(false)),
            &mut out,
        );
        assert_eq!(emitted, 0);
        assert!(out.targets.domains.is_empty());
        assert!(out.domain_rows.is_empty());

        classify_structured(
            "acme",
            &structured("*.acme.com", "Wildcard", Some(true), None),
            &mut out,
        );
        assert!(out.targets.domains.is_empty());
    }

    #[test]
    fn structured_wildcard_is_a_domain() {
        let mut out = ScopeCollector::new(true);
        classify_structured(
            "acme",
            &structured("*.acme.com", "Wildcard", Some(true), Some(true)),
            &mut out,
        );
        assert_eq!(out.targets.domains.items(), &["*.acme.com".to_string()]);
        assert_eq!(out.targets.with_bounty.items(), &["*.acme.com".to_string()]);
    }

    #[test]
    fn null_bounty_is_false() {
        let mut out = ScopeCollector::new(true);
        classify_structured(
            "acme",
            &structured("acme.com,www.acme.com", "Domain", None, Some(true)),
            &mut out,
        );
        assert_eq!(out.targets.domains.len(), 2);
        assert!(out.targets.with_bounty.is_empty());
        assert!(out.domain_rows.iter().all(|row| !row.eligible_for_bounty));
    }

    #[test]
    fn structured_source_code_is_normalized() {
        let mut out = ScopeCollector::new(true);
        let emitted = classify_structured(
            "acme",
            &structured(
                "acme/app, gitlab.com/acme/infra, see README",
                "SourceCode",
                Some(true),
                Some(true),
            ),
            &mut out,
        );
        assert_eq!(emitted, 2);
        assert_eq!(
            out.targets.source_code.items(),
            &[
                "https://github.com/acme/app".to_string(),
                "https://gitlab.com/acme/infra".to_string()
            ]
        );
        assert_eq!(out.targets.source_code_with_bounty.len(), 2);
        assert!(out.targets.domains.is_empty());
    }

    #[test]
    fn duplicate_normalized_source_code_survives_once() {
        let mut out = ScopeCollector::new(true);
        classify_structured(
            "acme",
            &structured("acme/app", "SourceCode", Some(false), Some(true)),
            &mut out,
        );
        classify_in_scope_asset(
            "acme",
            &asset("https://github.com/acme/app", "SOURCE_CODE", Some(false)),
            &mut out,
        );
        assert_eq!(out.targets.source_code.len(), 1);
        assert_eq!(out.source_code_rows.len(), 2);
    }

    #[test]
    fn legacy_accepts_domain_url_and_wildcard() {
        let mut out = ScopeCollector::new(true);
        classify_in_scope_asset("acme", &asset("acme.com", "Domain", Some(true)), &mut out);
        classify_in_scope_asset("acme", &asset("https://app.acme.com", "URL", None), &mut out);
        classify_in_scope_asset("acme", &asset("*.acme.io", "WILDCARD", Some(false)), &mut out);
        let app = asset("com.acme.android", "GOOGLE_PLAY_APP_ID", Some(true));
        classify_in_scope_asset("acme", &app, &mut out);

        assert_eq!(
            out.targets.domains.items(),
            &[
                "acme.com".to_string(),
                "https://app.acme.com".to_string(),
                "*.acme.io".to_string()
            ]
        );
        assert_eq!(out.targets.with_bounty.items(), &["acme.com".to_string()]);
    }

    #[test]
    fn bounty_sets_are_subsets() {
        let mut out = ScopeCollector::new(true);
        let both = structured("a.com,b.com", "Domain", Some(true), Some(true));
        classify_structured("a", &both, &mut out);
        classify_structured("a", &structured("c.com", "Domain", Some(false), Some(true)), &mut out);
        let repos = asset("x/y,www.z.org/r", "SOURCE_CODE", Some(true));
        classify_in_scope_asset("b", &repos, &mut out);
        classify_in_scope_asset("b", &asset("q/r", "SOURCE_CODE", None), &mut out);

        for item in out.targets.with_bounty.items() {
            assert!(out.targets.domains.contains(item));
        }
        for item in out.targets.source_code_with_bounty.items() {
            assert!(out.targets.source_code.contains(item));
        }
        assert!(
            out.targets
                .source_code
                .items()
                .iter()
                .all(|url| url.starts_with("https://"))
        );
    }
}
