#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

pub const OPEN_CLASS: &str = "open";

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    pub fn aria_expanded(self) -> &'static str {
        match self {
            MenuState::Closed => "false",
            MenuState::Open => "true",
        }
    }

    /// Accessible label of the toggle: what clicking it would do next.
    pub fn toggle_label(self) -> &'static str {
        match self {
            MenuState::Closed => "Open menu",
            MenuState::Open => "Close menu",
        }
    }
}
