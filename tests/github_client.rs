mod common;

use axum::Router;
use axum::extract::{Path, RawQuery};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;
use common::repo_json;
use portfolio::config::Config;
use portfolio::error::PortfolioError;
use portfolio::github::GithubClient;

async fn repos_handler(
    Path(user): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if accept != "application/vnd.github+json" {
        return (StatusCode::NOT_ACCEPTABLE, String::new());
    }
    if query.as_deref() != Some("per_page=100&sort=updated") {
        return (StatusCode::BAD_REQUEST, String::new());
    }
    match user.as_str() {
        "me" => {
            let body = serde_json::json!([
                repo_json("A", "2024-01-01", false),
                repo_json("B", "2024-02-01", true),
                repo_json("C", "2024-03-01", false),
            ]);
            (StatusCode::OK, body.to_string())
        }
        "empty" => (StatusCode::OK, "[]".into()),
        "garbled" => (StatusCode::OK, r#"{"message":"not a list"}"#.into()),
        "partial" => {
            let mut repo = repo_json("A", "2024-01-01", false);
            repo.as_object_mut().unwrap().remove("description");
            (StatusCode::OK, serde_json::json!([repo]).to_string())
        }
        "a b/c" => (StatusCode::OK, "[]".into()),
        _ => (StatusCode::NOT_FOUND, r#"{"message":"Not Found"}"#.into()),
    }
}

async fn api() -> String {
    common::serve(Router::new().route("/users/:user/repos", get(repos_handler))).await
}

fn config_for(user: &str) -> Config {
    Config {
        github_username: user.into(),
        ..Config::default()
    }
}

#[tokio::test]
async fn lists_raw_repositories() {
    let client = GithubClient::new(&api().await);
    let repos = client.list_user_repos("me").await.expect("listing");
    assert_eq!(repos.len(), 3);
    assert_eq!(repos[0].name, "A");
    assert_eq!(repos[0].homepage(), None);
    assert_eq!(repos[0].language(), Some("Rust"));
}

#[tokio::test]
async fn portfolio_repos_applies_selection() {
    let client = GithubClient::new(&api().await);
    let repos = client.portfolio_repos(&config_for("me")).await.expect("listing");
    let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["C", "A"]);
}

#[tokio::test]
async fn omitted_field_is_a_parse_error() {
    let client = GithubClient::new(&api().await);
    match client.list_user_repos("partial").await {
        Err(PortfolioError::Parse(_)) => {}
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn username_reaches_the_server_as_one_segment() {
    let client = GithubClient::new(&api().await);
    let repos = client.list_user_repos("a b/c").await.expect("listing");
    assert!(repos.is_empty());
}

#[tokio::test]
async fn not_found_is_a_status_error() {
    let client = GithubClient::new(&api().await);
    match client.portfolio_repos(&config_for("nobody")).await {
        Err(PortfolioError::Status(404)) => {}
        other => panic!("expected 404, got {other:?}"),
    }
}

#[tokio::test]
async fn wrong_shape_is_a_parse_error() {
    let client = GithubClient::new(&api().await);
    match client.portfolio_repos(&config_for("garbled")).await {
        Err(PortfolioError::Parse(_)) => {}
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_listing_is_ok() {
    let client = GithubClient::new(&api().await);
    let repos = client.portfolio_repos(&config_for("empty")).await.unwrap();
    assert!(repos.is_empty());
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let client = GithubClient::new("http://127.0.0.1:9");
    match client.list_user_repos("me").await {
        Err(PortfolioError::Network(_)) => {}
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn abortable_fetch_completes_when_left_alone() {
    let client = GithubClient::new(&api().await);
    let (fut, _handle) = client.portfolio_repos_abortable(config_for("me"));
    assert_eq!(fut.await.unwrap().len(), 2);
}
