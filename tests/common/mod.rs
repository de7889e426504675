#![allow(dead_code)]

use axum::Router;
use portfolio::RepoSummary;
use portfolio::app::{Environment, Portfolio};
use portfolio::config::Config;
use portfolio::page::{self, Page};
use portfolio::theme::MemoryStore;

pub fn repo(name: &str, pushed: &str) -> RepoSummary {
    RepoSummary {
        name: name.to_string(),
        description: None,
        language: None,
        stargazers_count: 0,
        forks_count: 0,
        pushed_at: Some(format!("{pushed}T00:00:00Z").parse().unwrap()),
        html_url: format!("https://github.com/me/{name}"),
        homepage: None,
        archived: false,
        disabled: false,
        fork: false,
    }
}

pub fn with_lang(mut r: RepoSummary, lang: &str) -> RepoSummary {
    r.language = Some(lang.to_string());
    r
}

pub fn with_desc(mut r: RepoSummary, desc: &str) -> RepoSummary {
    r.description = Some(desc.to_string());
    r
}

/// API-shaped JSON for a repository.
pub fn repo_json(name: &str, pushed: &str, fork: bool) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": null,
        "language": "Rust",
        "stargazers_count": 3,
        "forks_count": 1,
        "pushed_at": format!("{pushed}T00:00:00Z"),
        "html_url": format!("https://github.com/me/{name}"),
        "homepage": "",
        "archived": false,
        "disabled": false,
        "fork": fork,
    })
}

pub fn config() -> Config {
    Config {
        github_username: "me".into(),
        email: "me@example.com".into(),
        links: [
            ("github".to_string(), "https://github.com/me".to_string()),
            ("x".to_string(), "https://x.com/me".to_string()),
        ]
        .into_iter()
        .collect(),
        ..Config::default()
    }
}

pub fn env() -> Environment {
    Environment {
        year: 2024,
        reduced_motion: false,
    }
}

/// Portfolio with a volatile preference store, not yet initialized.
pub fn portfolio(config: Config, page: Page, env: Environment) -> Portfolio<MemoryStore> {
    Portfolio::new(config, page, MemoryStore::default(), env)
}

/// A portfolio on the stock page, already initialized.
pub fn app() -> Portfolio<MemoryStore> {
    let mut app = portfolio(config(), page::skeleton("Me"), env());
    app.init();
    app
}

/// Serve `router` on a loopback port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{addr}")
}
