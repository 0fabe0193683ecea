use gpui::ScrollHandle;

/// Keeps the conversation pinned to the newest row.
pub struct ScrollManager {
    scroll_handle: ScrollHandle,
    pending_scroll_to_bottom: bool,
    last_row_count: usize,
}

impl ScrollManager {
    pub fn new() -> Self {
        Self {
            scroll_handle: ScrollHandle::new(),
            pending_scroll_to_bottom: true,
            last_row_count: 0,
        }
    }

    pub fn handle(&self) -> &ScrollHandle {
        &self.scroll_handle
    }

    /// Requests a jump to the tail whenever the number of rows changes.
    pub fn observe_row_count(&mut self, row_count: usize) {
        if row_count != self.last_row_count {
            self.pending_scroll_to_bottom = true;
        }
        self.last_row_count = row_count;
    }

    /// Scroll is resolved at layout time so freshly appended rows are measured first.
    pub fn apply_pending_scroll(&mut self) {
        if self.pending_scroll_to_bottom {
            self.scroll_handle.scroll_to_bottom();
            self.pending_scroll_to_bottom = false;
        }
    }
}

impl Default for ScrollManager {
    fn default() -> Self {
        Self::new()
    }
}
