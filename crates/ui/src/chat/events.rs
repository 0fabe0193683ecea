/// Emitted when the user presses Enter or clicks Send in the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Submit;

/// Emitted whenever the composer text changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftChanged {
    pub text: String,
}

impl DraftChanged {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Emitted when the navigation panel opens or closes from inside the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigationChanged {
    pub open: bool,
}
