//! Init command implementation

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use scopecrawl::config::Config;

/// Default configuration content for scopecrawl init
pub const DEFAULT_CONFIG: &str = r#"# scopecrawl configuration
# =======================

# ============================================================================
# SOURCE - Where programs and scopes are fetched from
# ============================================================================
#
# Available options:
#   base_url      - Site root; /programs/search and /graphql hang off it
#   search_query  - Directory search filter
#   sort          - Directory search ordering
#   user_agent    - User-Agent header sent with every request
#   timeout_secs  - Per-request timeout in seconds (default: 30)
#   max_pages     - Stop after this many search pages (default: unbounded)
#   legacy_query  - Also run the older in-scope assets query (default: true)

[source]
base_url = "https://hackerone.com"
search_query = "type:hackerone"
sort = "published_at:descending"
timeout_secs = 30
legacy_query = true
# max_pages = 5

# ============================================================================
# OUTPUT - Result files
# ============================================================================
#
# Available options:
#   dir      - Directory for the .txt and .csv files (default: current directory)
#   dedupe   - Drop duplicate identifiers, ignoring case (default: true)
#   summary  - Also write summary.json (default: false)

[output]
dir = "."
dedupe = true
summary = false
"#;

/// Write the default configuration file
pub fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created: {}", config_path.display());

    Ok(())
}
