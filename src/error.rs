use thiserror::Error;

/// Failures the portfolio can run into while loading its data.
///
/// Everything that reaches the page collapses into one "could not load" message;
/// the variants exist so the cause can be logged.
#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("GitHub API returned HTTP {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Repository fetch was cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
