//! In-memory page model.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Removing a node only
//! detaches it; lookups by id and class walk from the root, so detached nodes
//! become invisible.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub hidden: bool,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Page {
    nodes: Vec<Element>,
    root: NodeId,
    /// Element most recently scrolled into view.
    pub scrolled_to: Option<NodeId>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Empty page holding just an `<html>` root.
    pub fn new() -> Self {
        Page {
            nodes: vec![Element {
                tag: "html".into(),
                ..Element::default()
            }],
            root: NodeId(0),
            scrolled_to: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn el(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    pub fn el_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    /// Create a detached element.
    pub fn create(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Element {
            tag: tag.into(),
            ..Element::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.nodes[child.0].parent {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Create an element and append it in one go.
    pub fn append_new(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create(tag);
        self.append(parent, id);
        id
    }

    /// Remove a node from its parent, if attached.
    pub fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != child);
        }
    }

    pub fn clear_children(&mut self, parent: NodeId) {
        let children = std::mem::take(&mut self.nodes[parent.0].children);
        for c in children {
            self.nodes[c.0].parent = None;
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// All attached nodes below `from`, depth first, document order.
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(from).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|n| self.attr(*n, "id") == Some(id))
    }

    pub fn by_class(&self, from: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(from)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    /// `a[href^="#"]` below `from`.
    pub fn hash_anchors(&self, from: NodeId) -> Vec<NodeId> {
        self.descendants(from)
            .into_iter()
            .filter(|n| {
                self.el(*n).tag == "a" && self.attr(*n, "href").is_some_and(|h| h.starts_with('#'))
            })
            .collect()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        self.nodes[id.0].attrs.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        self.nodes[id.0].attrs.remove(name);
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes[id.0].classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            self.nodes[id.0].classes.push(class.into());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.nodes[id.0].classes.retain(|c| c != class);
    }

    pub fn set_classes(&mut self, id: NodeId, classes: &str) {
        self.nodes[id.0].classes = classes.split_whitespace().map(str::to_string).collect();
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.nodes[id.0].text = text.into();
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.nodes[id.0].hidden
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        self.nodes[id.0].hidden = hidden;
    }

    /// Current value of a form control.
    pub fn value(&self, id: NodeId) -> &str {
        self.attr(id, "value").unwrap_or("")
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) {
        self.set_attr(id, "value", value);
    }
}

/// Element ids the portfolio wires up when present.
pub mod ids {
    pub const YEAR: &str = "year";
    pub const THEME_TOGGLE: &str = "theme-toggle";
    pub const CONTACT_EMAIL: &str = "contact-email";
    pub const PROJECTS_GRID: &str = "projects-grid";
    pub const PROJECTS_EMPTY: &str = "projects-empty";
    pub const LANGUAGE_CHIPS: &str = "language-chips";
    pub const SEARCH_INPUT: &str = "search-input";
    pub const AVATAR: &str = "avatar";
    pub const MENU_TOGGLE: &str = "menu-toggle";
    pub const SITE_MENU: &str = "site-menu";

    /// Social anchor for a configured link name, e.g. `link-github`.
    pub fn social(name: &str) -> String {
        format!("link-{name}")
    }
}

fn with_id(page: &mut Page, parent: NodeId, tag: &str, id: &str) -> NodeId {
    let node = page.append_new(parent, tag);
    page.set_attr(node, "id", id);
    node
}

/// The stock portfolio page: header with menu and theme toggle, an about
/// section, the projects section, and a contact footer.
pub fn skeleton(title: &str) -> Page {
    let mut page = Page::new();
    let root = page.root();
    page.set_attr(root, "lang", "en");

    let head = page.append_new(root, "head");
    let t = page.append_new(head, "title");
    page.set_text(t, title);
    let body = page.append_new(root, "body");

    let header = page.append_new(body, "header");
    let toggle = with_id(&mut page, header, "button", ids::MENU_TOGGLE);
    page.set_attr(toggle, "aria-expanded", "false");
    page.set_attr(toggle, "aria-label", "Open menu");
    page.set_text(toggle, "☰");
    let nav = with_id(&mut page, header, "nav", ids::SITE_MENU);
    for (href, label) in [("#about", "About"), ("#projects", "Projects"), ("#contact", "Contact")] {
        let a = page.append_new(nav, "a");
        page.set_attr(a, "href", href);
        page.set_text(a, label);
    }
    let theme = with_id(&mut page, header, "button", ids::THEME_TOGGLE);
    page.set_attr(theme, "aria-label", "Toggle theme");
    page.set_text(theme, "◐");

    let about = with_id(&mut page, body, "section", "about");
    page.set_classes(about, "reveal");
    let avatar = with_id(&mut page, about, "img", ids::AVATAR);
    page.set_attr(avatar, "src", "avatar.png");
    page.set_attr(avatar, "alt", title);
    let h1 = page.append_new(about, "h1");
    page.set_text(h1, title);

    let projects = with_id(&mut page, body, "section", "projects");
    page.set_classes(projects, "reveal");
    let h2 = page.append_new(projects, "h2");
    page.set_text(h2, "Projects");
    let search = with_id(&mut page, projects, "input", ids::SEARCH_INPUT);
    page.set_attr(search, "type", "search");
    page.set_attr(search, "placeholder", "Search projects");
    with_id(&mut page, projects, "div", ids::LANGUAGE_CHIPS);
    let grid = with_id(&mut page, projects, "div", ids::PROJECTS_GRID);
    page.set_classes(grid, "grid");
    let empty = with_id(&mut page, projects, "p", ids::PROJECTS_EMPTY);
    page.set_hidden(empty, true);

    let contact = with_id(&mut page, body, "footer", "contact");
    let mail = with_id(&mut page, contact, "a", ids::CONTACT_EMAIL);
    page.set_text(mail, "Email");
    for (name, label) in [("github", "GitHub"), ("linkedin", "LinkedIn"), ("x", "X")] {
        let a = with_id(&mut page, contact, "a", &ids::social(name));
        page.set_text(a, label);
    }
    let small = page.append_new(contact, "small");
    page.set_text(small, "© ");
    with_id(&mut page, small, "span", ids::YEAR);

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_carries_every_wired_id() {
        let page = skeleton("Me");
        for id in [
            ids::YEAR,
            ids::THEME_TOGGLE,
            ids::CONTACT_EMAIL,
            ids::PROJECTS_GRID,
            ids::PROJECTS_EMPTY,
            ids::LANGUAGE_CHIPS,
            ids::SEARCH_INPUT,
            ids::AVATAR,
            ids::MENU_TOGGLE,
            ids::SITE_MENU,
            "link-github",
            "link-linkedin",
            "link-x",
        ] {
            assert!(page.by_id(id).is_some(), "missing #{id}");
        }
    }

    #[test]
    fn cleared_children_drop_out_of_lookups() {
        let mut page = Page::new();
        let root = page.root();
        let box_ = page.append_new(root, "div");
        let inner = page.append_new(box_, "span");
        page.set_attr(inner, "id", "inner");
        page.add_class(inner, "x");
        assert_eq!(page.by_id("inner"), Some(inner));

        page.detach(inner);
        assert_eq!(page.by_id("inner"), None);
        page.append(box_, inner);
        assert_eq!(page.by_id("inner"), Some(inner));

        page.clear_children(box_);
        assert_eq!(page.by_id("inner"), None);
        assert!(page.by_class(root, "x").is_empty());
        assert_eq!(page.parent(inner), None);
    }

    #[test]
    fn hash_anchors_skip_external_links() {
        let page = skeleton("Me");
        let anchors = page.hash_anchors(page.root());
        assert_eq!(anchors.len(), 3);
        assert!(anchors.iter().all(|a| page.attr(*a, "href").unwrap().starts_with('#')));
    }

    #[test]
    fn class_helpers_do_not_duplicate() {
        let mut page = Page::new();
        let n = page.append_new(page.root(), "div");
        page.add_class(n, "open");
        page.add_class(n, "open");
        assert_eq!(page.el(n).classes, ["open"]);
        page.remove_class(n, "open");
        assert!(!page.has_class(n, "open"));
    }
}
