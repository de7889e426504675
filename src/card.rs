//! Repository cards as plain view-models, independent of any page.

use crate::repo::RepoSummary;

pub const NO_DESCRIPTION: &str = "No description";
/// Outbound links never leak the referrer nor hand the opener to the new page.
pub const LINK_REL: &str = "noreferrer noopener";
pub const LINK_TARGET: &str = "_blank";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Demo,
    Code,
}

impl LinkKind {
    pub fn label(self) -> &'static str {
        match self {
            LinkKind::Demo => "Demo",
            LinkKind::Code => "Code",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            LinkKind::Demo => "btn-primary",
            LinkKind::Code => "btn-secondary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLink {
    pub kind: LinkKind,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub body: String,
    pub meta: String,
    pub links: Vec<CardLink>,
}

/// 999 -> "999", 1000 -> "1k", 1500 -> "1.5k"
pub fn format_count(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let thousands = n as f64 / 1000.0;
    if n % 1000 == 0 {
        format!("{thousands:.0}k")
    } else {
        format!("{thousands:.1}k")
    }
}

pub fn card_for(repo: &RepoSummary) -> CardView {
    let mut meta = format!(
        "{} ★ · {} forks",
        format_count(repo.stargazers_count),
        format_count(repo.forks_count)
    );
    if let Some(lang) = repo.language() {
        meta.push_str(" · ");
        meta.push_str(lang);
    }

    let mut links = Vec::with_capacity(2);
    if let Some(home) = repo.homepage() {
        links.push(CardLink {
            kind: LinkKind::Demo,
            href: home.to_string(),
        });
    }
    links.push(CardLink {
        kind: LinkKind::Code,
        href: repo.html_url.clone(),
    });

    CardView {
        title: repo.name.clone(),
        body: repo.description().unwrap_or(NO_DESCRIPTION).to_string(),
        meta,
        links,
    }
}
