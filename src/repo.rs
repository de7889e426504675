//! Repository summaries as returned by the GitHub REST API, and the selection
//! rules that turn the raw listing into the portfolio's repository cache.

use crate::config::Config;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    /// Null for repositories that were never pushed to.
    #[serde(deserialize_with = "nullable")]
    pub pushed_at: Option<DateTime<Utc>>,
    pub html_url: String,
    #[serde(deserialize_with = "nullable")]
    pub homepage: Option<String>,
    pub archived: bool,
    pub disabled: bool,
    pub fork: bool,
}

/// The field must be present, but may be null.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl RepoSummary {
    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn language(&self) -> Option<&str> {
        non_empty(&self.language)
    }

    /// Live demo URL, if the repository advertises one.
    pub fn homepage(&self) -> Option<&str> {
        non_empty(&self.homepage)
    }

    fn pushed_or_epoch(&self) -> DateTime<Utc> {
        self.pushed_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Filter, order and truncate a raw listing.
///
/// Archived and disabled repositories are dropped, and forks too when the config
/// excludes them. Pinned names come first; inside each group the most recently
/// pushed repository leads. At most `max_repos` entries are kept.
pub fn select(repos: Vec<RepoSummary>, config: &Config) -> Vec<RepoSummary> {
    let mut kept: Vec<RepoSummary> = repos
        .into_iter()
        .filter(|r| !r.archived && !r.disabled)
        .filter(|r| !(config.exclude_forks && r.fork))
        .collect();

    // sort_by is stable, so equal keys keep their API order
    if config.pinned_repos.is_empty() {
        kept.sort_by(|a, b| b.pushed_or_epoch().cmp(&a.pushed_or_epoch()));
    } else {
        kept.sort_by(|a, b| {
            let ap = !config.is_pinned(&a.name);
            let bp = !config.is_pinned(&b.name);
            ap.cmp(&bp)
                .then_with(|| b.pushed_or_epoch().cmp(&a.pushed_or_epoch()))
        });
    }

    kept.truncate(config.max_repos);
    kept
}

/// Distinct non-empty languages, alphabetically.
pub fn languages(repos: &[RepoSummary]) -> Vec<String> {
    let mut langs: Vec<String> = repos
        .iter()
        .filter_map(|r| r.language())
        .map(str::to_string)
        .collect();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, pushed: &str) -> RepoSummary {
        RepoSummary {
            name: name.to_string(),
            description: None,
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            pushed_at: Some(pushed.parse().unwrap()),
            html_url: format!("https://github.com/me/{name}"),
            homepage: None,
            archived: false,
            disabled: false,
            fork: false,
        }
    }

    const LISTED: &str = r#"{"name":"a","description":null,"language":null,
        "stargazers_count":0,"forks_count":0,"pushed_at":null,
        "html_url":"https://github.com/me/a","homepage":null,
        "archived":false,"disabled":false,"fork":false}"#;

    #[test]
    fn null_fields_parse_as_absent() {
        let r: RepoSummary = serde_json::from_str(LISTED).unwrap();
        assert_eq!(r.description, None);
        assert_eq!(r.pushed_at, None);
    }

    #[test]
    fn missing_fields_are_rejected() {
        for field in ["description", "language", "pushed_at", "homepage"] {
            let mut value: serde_json::Value = serde_json::from_str(LISTED).unwrap();
            value.as_object_mut().unwrap().remove(field);
            let parsed = serde_json::from_value::<RepoSummary>(value);
            assert!(parsed.is_err(), "{field} may not be omitted");
        }
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let mut r = repo("a", "2024-01-01T00:00:00Z");
        r.description = Some(String::new());
        r.language = Some(String::new());
        r.homepage = Some(String::new());
        assert_eq!(r.description(), None);
        assert_eq!(r.language(), None);
        assert_eq!(r.homepage(), None);
    }

    #[test]
    fn never_pushed_sorts_last() {
        let mut fresh = repo("fresh", "2024-01-01T00:00:00Z");
        fresh.pushed_at = None;
        let old = repo("old", "2001-01-01T00:00:00Z");
        let picked = select(vec![fresh, old], &Config::default());
        let names: Vec<_> = picked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["old", "fresh"]);
    }

    #[test]
    fn languages_are_sorted_and_unique() {
        let mut a = repo("a", "2024-01-01T00:00:00Z");
        a.language = Some("Rust".into());
        let mut b = repo("b", "2024-01-01T00:00:00Z");
        b.language = Some("Go".into());
        let mut c = repo("c", "2024-01-01T00:00:00Z");
        c.language = Some("Rust".into());
        let d = repo("d", "2024-01-01T00:00:00Z");
        assert_eq!(languages(&[a, b, c, d]), ["Go", "Rust"]);
    }
}
