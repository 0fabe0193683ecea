pub const BRAND_NAME: &str = "Nexo";
pub const NEW_CHAT_LABEL: &str = "New Chat";
pub const RECENT_HEADING: &str = "Recent";
pub const RECENT_PLACEHOLDER_COUNT: usize = 3;

/// Footer actions. None of them do anything yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationAction {
    Settings,
    LogOut,
}

impl NavigationAction {
    pub const ALL: [Self; 2] = [Self::Settings, Self::LogOut];

    pub fn label(self) -> &'static str {
        match self {
            Self::Settings => "Settings",
            Self::LogOut => "Log out",
        }
    }
}

/// Sidebar state. Only open/closed is tracked; entries are placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationPanel {
    open: bool,
}

impl Default for NavigationPanel {
    fn default() -> Self {
        Self { open: true }
    }
}

impl NavigationPanel {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        tracing::trace!(open = self.open, "navigation panel toggled");
    }

    pub fn recent_conversations(&self) -> impl Iterator<Item = String> {
        (1..=RECENT_PLACEHOLDER_COUNT).map(|index| format!("Previous Conversation {index}"))
    }

    pub fn actions(&self) -> [NavigationAction; 2] {
        NavigationAction::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_open_state() {
        let mut panel = NavigationPanel::default();
        assert!(panel.is_open());

        panel.toggle();
        assert!(!panel.is_open());

        panel.toggle();
        assert!(panel.is_open());
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let mut panel = NavigationPanel::new(false);
        panel.close();
        assert!(!panel.is_open());

        panel.open();
        panel.open();
        assert!(panel.is_open());
    }

    #[test]
    fn placeholders_and_actions_are_fixed() {
        let panel = NavigationPanel::default();

        assert_eq!(
            panel.recent_conversations().collect::<Vec<_>>(),
            vec![
                "Previous Conversation 1",
                "Previous Conversation 2",
                "Previous Conversation 3"
            ]
        );
        assert_eq!(
            panel.actions().map(NavigationAction::label),
            ["Settings", "Log out"]
        );
    }
}
