use crate::config::Config;
use crate::error::{PortfolioError, Result};
use crate::repo::{self, RepoSummary};
use futures::future::{AbortHandle, Abortable};
use reqwest::{Client, Url};
use reqwest::header::{ACCEPT, USER_AGENT};
use std::future::Future;
use std::sync::Arc;

const PER_PAGE: u32 = 100;
const MEDIA_TYPE: &str = "application/vnd.github+json";

#[derive(Clone)]
pub struct GithubClient {
    base: Arc<String>,
    http: Arc<Client>,
}

impl GithubClient {
    /// Create a REST client against `api_base` (normally `https://api.github.com`).
    pub fn new(api_base: &str) -> Self {
        Self {
            base: Arc::new(api_base.trim_end_matches('/').to_string()),
            http: Arc::new(Client::new()),
        }
    }

    /// Listing URL for `username`, with the name percent-encoded as one path segment.
    pub fn repos_url(&self, username: &str) -> Result<Url> {
        let invalid = || PortfolioError::Config(format!("invalid api_base {}", self.base));
        let mut url = Url::parse(&self.base).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .extend(["users", username, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &PER_PAGE.to_string())
            .append_pair("sort", "updated");
        Ok(url)
    }

    /// One GET of the user's public repositories, most recently updated first.
    /// No retry: any failure is reported straight back.
    pub async fn list_user_repos(&self, username: &str) -> Result<Vec<RepoSummary>> {
        let url = self.repos_url(username)?;
        tracing::debug!(%url, "requesting repositories");

        let resp = self
            .http
            .get(url)
            .header(ACCEPT, MEDIA_TYPE)
            .header(USER_AGENT, concat!("portfolio/", env!("CARGO_PKG_VERSION")))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PortfolioError::Status(status.as_u16()));
        }

        // Read the text first so a bad body surfaces as a parse error, not a transport one.
        let body = resp.text().await?;
        let repos: Vec<RepoSummary> = serde_json::from_str(&body)?;
        tracing::debug!(count = repos.len(), "repositories received");
        Ok(repos)
    }

    /// Fetch and select the repositories the portfolio shows.
    ///
    /// An empty username yields an empty list without touching the network.
    pub async fn portfolio_repos(&self, config: &Config) -> Result<Vec<RepoSummary>> {
        if config.github_username.is_empty() {
            tracing::info!("no github_username configured; skipping fetch");
            return Ok(Vec::new());
        }
        let raw = self.list_user_repos(&config.github_username).await?;
        Ok(repo::select(raw, config))
    }

    /// Like [`portfolio_repos`](Self::portfolio_repos), but hands back an abort handle
    /// alongside the future. An aborted fetch resolves to `PortfolioError::Cancelled`.
    pub fn portfolio_repos_abortable(
        &self,
        config: Config,
    ) -> (
        impl Future<Output = Result<Vec<RepoSummary>>> + Send + use<>,
        AbortHandle,
    ) {
        let (handle, registration) = AbortHandle::new_pair();
        let client = self.clone();
        let fut = async move {
            Abortable::new(
                async move { client.portfolio_repos(&config).await },
                registration,
            )
            .await
            .unwrap_or_else(|_aborted| Err(PortfolioError::Cancelled))
        };
        (fut, handle)
    }
}
