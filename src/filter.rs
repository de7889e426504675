//! Language chips and free-text search over the repository cache.

use crate::repo::{self, RepoSummary};

pub const ALL_LANGUAGES: &str = "All";

/// Chip labels for a cache: "All" first, then each language alphabetically.
pub fn chip_labels(repos: &[RepoSummary]) -> Vec<String> {
    let mut labels = vec![ALL_LANGUAGES.to_string()];
    labels.extend(repo::languages(repos));
    labels
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub language: String,
    pub query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            language: ALL_LANGUAGES.to_string(),
            query: String::new(),
        }
    }
}

impl FilterState {
    pub fn new(language: impl Into<String>, query: impl Into<String>) -> Self {
        FilterState {
            language: language.into(),
            query: query.into(),
        }
    }

    pub fn matches(&self, repo: &RepoSummary) -> bool {
        let lang_ok =
            self.language == ALL_LANGUAGES || repo.language() == Some(self.language.as_str());
        if !lang_ok {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }
        let haystack =
            format!("{} {}", repo.name, repo.description().unwrap_or("")).to_lowercase();
        haystack.contains(&self.query.to_lowercase())
    }

    /// The cache entries this filter lets through, in cache order.
    pub fn apply<'a>(&self, repos: &'a [RepoSummary]) -> Vec<&'a RepoSummary> {
        repos.iter().filter(|r| self.matches(r)).collect()
    }
}
