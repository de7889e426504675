//! Pure mapping from (repository cache, filter state) to what the project grid shows.

use crate::card::{self, CardView};
use crate::filter::FilterState;
use crate::repo::RepoSummary;

/// Loading cards shown while the fetch is outstanding.
pub const SKELETON_COUNT: usize = 6;

/// The three distinct messages the grid can fall back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoadFailed,
    NoProjects,
    NoMatches,
}

impl Notice {
    pub fn text(self) -> &'static str {
        match self {
            Notice::LoadFailed => "Could not load projects.",
            Notice::NoProjects => "No projects to show yet.",
            Notice::NoMatches => "No projects found.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridView {
    Loading(usize),
    Cards(Vec<CardView>),
    Notice(Notice),
}

impl GridView {
    pub fn cards(&self) -> &[CardView] {
        match self {
            GridView::Cards(cards) => cards,
            _ => &[],
        }
    }
}

/// Grid right after a successful fetch: every cached repository.
pub fn fetched(cache: &[RepoSummary]) -> GridView {
    if cache.is_empty() {
        return GridView::Notice(Notice::NoProjects);
    }
    GridView::Cards(cache.iter().map(card::card_for).collect())
}

/// Grid for a filter applied to the cache.
pub fn filtered(cache: &[RepoSummary], filter: &FilterState) -> GridView {
    let visible = filter.apply(cache);
    if visible.is_empty() {
        return GridView::Notice(Notice::NoMatches);
    }
    GridView::Cards(visible.into_iter().map(card::card_for).collect())
}
