//! The portfolio application: owns the page, the repository cache and the
//! event table, and wires them together.

use crate::card::{CardView, LINK_REL, LINK_TARGET};
use crate::config::Config;
use crate::error::Result;
use crate::events::{Action, Dispatch, Event, EventKind, Routed, Target};
use crate::filter::{self, ALL_LANGUAGES, FilterState};
use crate::github::GithubClient;
use crate::menu::{MenuState, OPEN_CLASS};
use crate::page::{NodeId, Page, ids};
use crate::render::{self, GridView, Notice, SKELETON_COUNT};
use crate::repo::RepoSummary;
use crate::reveal::{self, RevealObserver};
use crate::theme::{self, PreferenceStore, THEME_ATTR, THEME_KEY, Theme};
use chrono::Datelike;

const CHIP_CLASS: &str = "chip";
const ACTIVE_CLASS: &str = "active";

/// Facts about the host the page runs on.
#[derive(Debug, Clone, Copy)]
pub struct Environment {
    pub year: i32,
    pub reduced_motion: bool,
}

impl Environment {
    pub fn now() -> Self {
        Environment {
            year: chrono::Local::now().year(),
            reduced_motion: false,
        }
    }
}

pub struct Portfolio<S: PreferenceStore> {
    config: Config,
    page: Page,
    store: S,
    env: Environment,
    cache: Vec<RepoSummary>,
    events: Dispatch,
    reveal: Option<RevealObserver>,
}

impl<S: PreferenceStore> Portfolio<S> {
    pub fn new(config: Config, page: Page, store: S, env: Environment) -> Self {
        Portfolio {
            config,
            page,
            store,
            env,
            cache: Vec::new(),
            events: Dispatch::default(),
            reveal: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Repositories from the last successful fetch.
    pub fn cache(&self) -> &[RepoSummary] {
        &self.cache
    }

    pub fn dispatch_table(&self) -> &Dispatch {
        &self.events
    }

    /// Page-ready: wire every affordance whose element exists, then put the
    /// grid into its loading state. The fetch itself is driven by the caller.
    pub fn init(&mut self) {
        self.init_theme();
        self.init_year();
        self.init_links();
        self.observe_reveals();
        self.enable_smooth_scroll();
        self.init_mobile_menu();
        self.ensure_avatar_fallback();
        self.begin_fetch();
    }

    /// [`init`](Self::init), then one fetch through `client`. Returns the
    /// notice the grid fell back to, if any.
    pub async fn load(&mut self, client: &GithubClient) -> Option<Notice> {
        self.init();
        let result = client.portfolio_repos(&self.config).await;
        self.complete_fetch(result)
    }

    fn init_theme(&mut self) {
        if let Some(saved) = theme::saved_theme(&self.store) {
            self.apply_theme(saved);
        }
        if let Some(btn) = self.page.by_id(ids::THEME_TOGGLE) {
            self.events.on(Target::Node(btn), EventKind::Click, Action::ToggleTheme);
        }
    }

    fn init_year(&mut self) {
        if let Some(el) = self.page.by_id(ids::YEAR) {
            self.page.set_text(el, self.env.year.to_string());
        }
    }

    fn init_links(&mut self) {
        if !self.config.email.is_empty() {
            if let Some(el) = self.page.by_id(ids::CONTACT_EMAIL) {
                self.page.set_attr(el, "href", format!("mailto:{}", self.config.email));
            }
        }
        for (name, url) in &self.config.links {
            if let Some(el) = self.page.by_id(&ids::social(name)) {
                self.page.set_attr(el, "href", url.as_str());
            }
        }
    }

    fn observe_reveals(&mut self) {
        if self.env.reduced_motion {
            tracing::debug!("reduced motion requested; reveal animations off");
            for node in self.page.by_class(self.page.root(), reveal::REVEAL_CLASS) {
                self.page.add_class(node, reveal::VISIBLE_CLASS);
            }
            return;
        }
        self.reveal = Some(RevealObserver::attach(&self.page));
    }

    fn enable_smooth_scroll(&mut self) {
        for a in self.page.hash_anchors(self.page.root()) {
            self.events.on(Target::Node(a), EventKind::Click, Action::SmoothScroll);
        }
    }

    fn init_mobile_menu(&mut self) {
        let (Some(toggle), Some(menu)) = (
            self.page.by_id(ids::MENU_TOGGLE),
            self.page.by_id(ids::SITE_MENU),
        ) else {
            return;
        };
        self.events.on(Target::Node(toggle), EventKind::Click, Action::ToggleMenu);
        for link in self.page.hash_anchors(menu) {
            self.events.on(Target::Node(link), EventKind::Click, Action::CloseMenu);
        }
        self.events.on(Target::Document, EventKind::KeyDown, Action::CloseMenuOnEscape);
    }

    fn ensure_avatar_fallback(&mut self) {
        if let Some(img) = self.page.by_id(ids::AVATAR) {
            self.events.on(Target::Node(img), EventKind::Error, Action::HideAvatar);
        }
    }

    fn begin_fetch(&mut self) {
        self.paint_grid(&GridView::Loading(SKELETON_COUNT));
    }

    /// Fetch finished: replace the cache and redraw, or show the load failure.
    /// Returns the notice shown instead of cards, if any.
    pub fn complete_fetch(&mut self, result: Result<Vec<RepoSummary>>) -> Option<Notice> {
        let view = match result {
            Ok(repos) => {
                tracing::info!(count = repos.len(), "projects loaded");
                self.cache = repos;
                self.setup_filters();
                render::fetched(&self.cache)
            }
            Err(err) => {
                tracing::error!(error = %err, "could not load projects");
                GridView::Notice(Notice::LoadFailed)
            }
        };
        self.paint_grid(&view);
        match view {
            GridView::Notice(notice) => Some(notice),
            _ => None,
        }
    }

    /// Text of the grid's fallback message while it is shown.
    pub fn notice_text(&self) -> Option<&str> {
        let empty = self.page.by_id(ids::PROJECTS_EMPTY)?;
        (!self.page.is_hidden(empty)).then(|| self.page.text(empty))
    }

    /// Freeze the page for painting without a runtime: every reveal section is
    /// shown and controls that only work with event handling are detached.
    pub fn prepare_static(&mut self) {
        for node in self.page.by_class(self.page.root(), reveal::REVEAL_CLASS) {
            self.page.add_class(node, reveal::VISIBLE_CLASS);
        }
        self.reveal = None;
        for id in [
            ids::THEME_TOGGLE,
            ids::MENU_TOGGLE,
            ids::SEARCH_INPUT,
            ids::LANGUAGE_CHIPS,
        ] {
            if let Some(node) = self.page.by_id(id) {
                self.page.detach(node);
            }
        }
        self.events = Dispatch::default();
    }

    // Theme

    pub fn current_theme(&self) -> Theme {
        match self.page.attr(self.page.root(), THEME_ATTR) {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        let root = self.page.root();
        match theme {
            Theme::Light => self.page.set_attr(root, THEME_ATTR, Theme::Light.as_str()),
            Theme::Dark => self.page.remove_attr(root, THEME_ATTR),
        }
    }

    /// Flip light/dark, apply it to the root and persist the new value.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.current_theme().flipped();
        self.apply_theme(next);
        self.store.set(THEME_KEY, next.as_str())?;
        tracing::debug!(theme = next.as_str(), "theme toggled");
        Ok(next)
    }

    // Mobile menu

    pub fn menu_state(&self) -> MenuState {
        match self.page.by_id(ids::SITE_MENU) {
            Some(menu) if self.page.has_class(menu, OPEN_CLASS) => MenuState::Open,
            _ => MenuState::Closed,
        }
    }

    fn set_menu(&mut self, state: MenuState) {
        let (Some(toggle), Some(menu)) = (
            self.page.by_id(ids::MENU_TOGGLE),
            self.page.by_id(ids::SITE_MENU),
        ) else {
            return;
        };
        match state {
            MenuState::Open => self.page.add_class(menu, OPEN_CLASS),
            MenuState::Closed => self.page.remove_class(menu, OPEN_CLASS),
        }
        self.page.set_attr(toggle, "aria-expanded", state.aria_expanded());
        self.page.set_attr(toggle, "aria-label", state.toggle_label());
    }

    // Reveal

    /// Viewport reports `node` intersecting by `ratio`. True if it got revealed.
    pub fn intersect(&mut self, node: NodeId, ratio: f64) -> bool {
        match self.reveal.as_mut() {
            Some(observer) => observer.intersect(&mut self.page, node, ratio),
            None => false,
        }
    }

    pub fn is_observing(&self, node: NodeId) -> bool {
        self.reveal.as_ref().is_some_and(|o| o.is_observing(node))
    }

    // Filters

    fn setup_filters(&mut self) {
        let (Some(chips), Some(search)) = (
            self.page.by_id(ids::LANGUAGE_CHIPS),
            self.page.by_id(ids::SEARCH_INPUT),
        ) else {
            return;
        };
        self.page.clear_children(chips);
        for label in filter::chip_labels(&self.cache) {
            let active = label == ALL_LANGUAGES;
            let chip = self.page.append_new(chips, "button");
            self.page.set_attr(chip, "type", "button");
            self.page.add_class(chip, CHIP_CLASS);
            if active {
                self.page.add_class(chip, ACTIVE_CLASS);
            }
            self.page.set_attr(chip, "aria-pressed", active.to_string());
            self.page.set_text(chip, label);
        }
        self.events.on(Target::Node(chips), EventKind::Click, Action::SelectChip);
        self.events.on(Target::Node(search), EventKind::Input, Action::ApplyFilters);
    }

    /// Filter state as currently shown on the page.
    pub fn filter_state(&self) -> FilterState {
        let language = self
            .page
            .by_id(ids::LANGUAGE_CHIPS)
            .and_then(|chips| {
                self.page
                    .by_class(chips, CHIP_CLASS)
                    .into_iter()
                    .find(|c| self.page.has_class(*c, ACTIVE_CLASS))
            })
            .map(|c| self.page.text(c).to_string())
            .unwrap_or_else(|| ALL_LANGUAGES.to_string());
        let query = self
            .page
            .by_id(ids::SEARCH_INPUT)
            .map(|s| self.page.value(s).to_string())
            .unwrap_or_default();
        FilterState { language, query }
    }

    /// Cached repositories that pass the filter shown on the page.
    pub fn visible(&self) -> Vec<&RepoSummary> {
        self.filter_state().apply(&self.cache)
    }

    pub fn chip(&self, label: &str) -> Option<NodeId> {
        let chips = self.page.by_id(ids::LANGUAGE_CHIPS)?;
        self.page
            .by_class(chips, CHIP_CLASS)
            .into_iter()
            .find(|c| self.page.text(*c) == label)
    }

    /// Type into the search box: set its value and fire `input`.
    pub fn type_search(&mut self, text: &str) {
        if let Some(search) = self.page.by_id(ids::SEARCH_INPUT) {
            self.page.set_value(search, text);
            self.dispatch(Event::input(search));
        }
    }

    fn select_chip(&mut self, chip: NodeId) {
        if !self.page.has_class(chip, CHIP_CLASS) {
            return;
        }
        let Some(chips) = self.page.by_id(ids::LANGUAGE_CHIPS) else {
            return;
        };
        for c in self.page.by_class(chips, CHIP_CLASS) {
            self.page.remove_class(c, ACTIVE_CLASS);
            self.page.set_attr(c, "aria-pressed", "false");
        }
        self.page.add_class(chip, ACTIVE_CLASS);
        self.page.set_attr(chip, "aria-pressed", "true");
        self.apply_filters();
    }

    fn apply_filters(&mut self) {
        if self.page.by_id(ids::PROJECTS_GRID).is_none() {
            return;
        }
        let view = render::filtered(&self.cache, &self.filter_state());
        self.paint_grid(&view);
    }

    // Events

    /// Run every action the event reaches. Returns true if the default
    /// browser action was prevented.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let routed = self.events.route(&self.page, &event);
        let mut prevented = false;
        for Routed { action, current } in routed {
            match action {
                Action::ToggleTheme => {
                    if let Err(e) = self.toggle_theme() {
                        tracing::warn!(error = %e, "failed to persist theme preference");
                    }
                }
                Action::ToggleMenu => self.set_menu(self.menu_state().toggled()),
                Action::CloseMenu => self.set_menu(MenuState::Closed),
                Action::CloseMenuOnEscape => {
                    if event.key.as_deref() == Some("Escape") {
                        self.set_menu(MenuState::Closed);
                    }
                }
                Action::SmoothScroll => {
                    if let Target::Node(anchor) = current {
                        prevented |= self.smooth_scroll(anchor);
                    }
                }
                Action::SelectChip => {
                    if let Target::Node(clicked) = event.target {
                        self.select_chip(clicked);
                    }
                }
                Action::ApplyFilters => self.apply_filters(),
                Action::HideAvatar => {
                    if let Target::Node(img) = current {
                        self.page.set_attr(img, "style", "display:none");
                    }
                }
            }
        }
        prevented
    }

    fn smooth_scroll(&mut self, anchor: NodeId) -> bool {
        let Some(id) = self
            .page
            .attr(anchor, "href")
            .and_then(|h| h.strip_prefix('#'))
            .filter(|id| !id.is_empty())
        else {
            return false;
        };
        let Some(target) = self.page.by_id(id) else {
            return false;
        };
        self.page.scrolled_to = Some(target);
        true
    }

    // Grid painting

    fn paint_grid(&mut self, view: &GridView) {
        let Some(grid) = self.page.by_id(ids::PROJECTS_GRID) else {
            return;
        };
        let empty = self.page.by_id(ids::PROJECTS_EMPTY);
        self.page.clear_children(grid);

        match view {
            GridView::Loading(count) => {
                for _ in 0..*count {
                    self.paint_skeleton(grid);
                }
            }
            GridView::Cards(cards) => {
                for card in cards {
                    self.paint_card(grid, card);
                }
                reveal::reveal_now(&mut self.page, grid);
                if let Some(empty) = empty {
                    self.page.set_hidden(empty, true);
                }
            }
            GridView::Notice(notice) => {
                if let Some(empty) = empty {
                    self.page.set_hidden(empty, false);
                    self.page.set_text(empty, notice.text());
                }
            }
        }
    }

    fn paint_skeleton(&mut self, grid: NodeId) {
        let sk = self.page.append_new(grid, "div");
        self.page.add_class(sk, "skeleton");
        for classes in ["line wide", "line", "line"] {
            let line = self.page.append_new(sk, "div");
            self.page.set_classes(line, classes);
        }
    }

    fn paint_card(&mut self, grid: NodeId, card: &CardView) {
        let page = &mut self.page;
        let article = page.append_new(grid, "article");
        page.set_classes(article, "card reveal");

        let title = page.append_new(article, "h3");
        page.set_text(title, card.title.as_str());
        let body = page.append_new(article, "p");
        page.set_text(body, card.body.as_str());
        let meta = page.append_new(article, "div");
        page.add_class(meta, "meta");
        page.set_text(meta, card.meta.as_str());

        let actions = page.append_new(article, "div");
        page.add_class(actions, "actions");
        for link in &card.links {
            let a = page.append_new(actions, "a");
            page.add_class(a, link.kind.class());
            page.set_attr(a, "href", link.href.as_str());
            page.set_attr(a, "target", LINK_TARGET);
            page.set_attr(a, "rel", LINK_REL);
            page.set_text(a, link.kind.label());
        }
    }
}
