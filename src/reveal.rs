//! One-shot reveal of page sections as they scroll into view.

use crate::page::{NodeId, Page};
use std::collections::BTreeSet;

pub const REVEAL_CLASS: &str = "reveal";
pub const VISIBLE_CLASS: &str = "reveal-visible";
/// Fraction of an element that must be in the viewport before it is revealed.
pub const THRESHOLD: f64 = 0.15;

#[derive(Debug, Default)]
pub struct RevealObserver {
    observed: BTreeSet<NodeId>,
}

impl RevealObserver {
    /// Observe every `.reveal` element on the page.
    pub fn attach(page: &Page) -> Self {
        RevealObserver {
            observed: page.by_class(page.root(), REVEAL_CLASS).into_iter().collect(),
        }
    }

    pub fn is_observing(&self, node: NodeId) -> bool {
        self.observed.contains(&node)
    }

    /// Report an intersection. Returns true when this reveals the element;
    /// it is then no longer observed.
    pub fn intersect(&mut self, page: &mut Page, node: NodeId, ratio: f64) -> bool {
        if ratio < THRESHOLD || !self.observed.remove(&node) {
            return false;
        }
        page.add_class(node, VISIBLE_CLASS);
        true
    }
}

/// Mark freshly inserted `.reveal` children visible without observing them.
pub fn reveal_now(page: &mut Page, parent: NodeId) {
    let children = page.children(parent).to_vec();
    for c in children {
        if page.has_class(c, REVEAL_CLASS) {
            page.add_class(c, VISIBLE_CLASS);
        }
    }
}
