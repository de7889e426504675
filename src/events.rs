//! Explicit event dispatch table: (target, event kind) -> actions.

use crate::page::{NodeId, Page};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Node(NodeId),
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    KeyDown,
    /// Resource failed to load (images).
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub target: Target,
    pub kind: EventKind,
    pub key: Option<String>,
}

impl Event {
    pub fn click(node: NodeId) -> Self {
        Event {
            target: Target::Node(node),
            kind: EventKind::Click,
            key: None,
        }
    }

    pub fn input(node: NodeId) -> Self {
        Event {
            target: Target::Node(node),
            kind: EventKind::Input,
            key: None,
        }
    }

    pub fn error(node: NodeId) -> Self {
        Event {
            target: Target::Node(node),
            kind: EventKind::Error,
            key: None,
        }
    }

    /// Key press with no focused element; it lands on the document.
    pub fn key(key: &str) -> Self {
        Event {
            target: Target::Document,
            kind: EventKind::KeyDown,
            key: Some(key.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleTheme,
    ToggleMenu,
    CloseMenu,
    CloseMenuOnEscape,
    SmoothScroll,
    SelectChip,
    ApplyFilters,
    HideAvatar,
}

/// An action together with the node it was registered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routed {
    pub action: Action,
    pub current: Target,
}

#[derive(Debug, Default)]
pub struct Dispatch {
    table: HashMap<(Target, EventKind), Vec<Action>>,
}

impl Dispatch {
    pub fn on(&mut self, target: Target, kind: EventKind, action: Action) {
        let actions = self.table.entry((target, kind)).or_default();
        if !actions.contains(&action) {
            actions.push(action);
        }
    }

    pub fn handlers(&self, target: Target, kind: EventKind) -> &[Action] {
        self.table.get(&(target, kind)).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Actions an event triggers, in bubbling order: the target node, its
    /// ancestors, then the document.
    pub fn route(&self, page: &Page, event: &Event) -> Vec<Routed> {
        let mut path = Vec::new();
        if let Target::Node(mut node) = event.target {
            path.push(Target::Node(node));
            while let Some(parent) = page.parent(node) {
                path.push(Target::Node(parent));
                node = parent;
            }
        }
        path.push(Target::Document);

        path.into_iter()
            .flat_map(|current| {
                self.handlers(current, event.kind)
                    .iter()
                    .map(move |&action| Routed { action, current })
            })
            .collect()
    }
}
