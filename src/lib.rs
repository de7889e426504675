//! Personal portfolio page: a profile's GitHub repositories rendered as project
//! cards, with language chips, search, a persisted dark/light theme and the
//! small interactive bits of the page modelled without a browser.

pub mod app;
pub mod card;
pub mod config;
pub mod error;
pub mod events;
pub mod filter;
pub mod github;
pub mod html;
pub mod menu;
pub mod page;
pub mod render;
pub mod repo;
pub mod reveal;
pub mod theme;

pub use app::{Environment, Portfolio};
pub use config::Config;
pub use error::{PortfolioError, Result};
pub use repo::RepoSummary;
