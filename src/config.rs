//! Portfolio configuration, loaded once from a TOML file.

use crate::error::{PortfolioError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Profile whose public repositories are listed. Empty disables the fetch.
    pub github_username: String,
    /// Names shown before every other repository.
    pub pinned_repos: Vec<String>,
    pub exclude_forks: bool,
    pub max_repos: usize,
    pub email: String,
    /// Social link name (`github`, `linkedin`, `x`, ...) to URL.
    pub links: BTreeMap<String, String>,
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            github_username: String::new(),
            pinned_repos: Vec::new(),
            exclude_forks: true,
            max_repos: 9,
            email: String::new(),
            links: BTreeMap::new(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| PortfolioError::Config(format!("Failed to parse config: {e}")))
    }

    pub fn is_pinned(&self, name: &str) -> bool {
        self.pinned_repos.iter().any(|p| p == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config = Config::from_toml(r#"github_username = "octocat""#).unwrap();
        assert_eq!(config.github_username, "octocat");
        assert!(config.exclude_forks);
        assert_eq!(config.max_repos, 9);
        assert!(config.pinned_repos.is_empty());
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn load_reads_links_table() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("portfolio.toml");
        fs::write(
            &path,
            r#"
github_username = "octocat"
pinned_repos = ["hello-world"]
exclude_forks = false
max_repos = 3
email = "me@example.com"

[links]
github = "https://github.com/octocat"
x = "https://x.com/octocat"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.exclude_forks);
        assert_eq!(config.max_repos, 3);
        assert!(config.is_pinned("hello-world"));
        assert!(!config.is_pinned("other"));
        assert_eq!(config.links.len(), 2);
        assert_eq!(config.links["x"], "https://x.com/octocat");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let err = Config::from_toml("max_repos = \"nine\"").unwrap_err();
        assert!(matches!(err, PortfolioError::Config(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, PortfolioError::Io(_)));
    }
}
