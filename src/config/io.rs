//! Configuration file locations

use std::path::PathBuf;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.scopecrawl/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".scopecrawl")
    }

    /// Get the global config file path (~/.scopecrawl/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_config_lives_in_dot_dir() {
        let path = Config::global_config_path();
        assert!(path.ends_with(".scopecrawl/config.toml"));
    }
}
