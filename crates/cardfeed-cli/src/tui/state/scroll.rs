//! Scroll State - viewport position of the listing
//!
//! Tracks the scroll offset in rows and keeps it inside the bounds given by
//! the content height and the viewport height.

/// Manages scroll state for the listing area
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Current scroll offset (0 = top, max = bottom)
    pub offset: usize,
    /// Maximum scroll offset for bounds checking
    pub max_scroll: usize,
    /// Rows visible at once
    pub viewport: usize,
    /// Total rows of content
    pub content: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Core Scroll Operations
    // =========================================================================

    /// Scroll up by the given amount
    pub fn scroll_up(&mut self, amount: usize) {
        self.offset = self.offset.saturating_sub(amount);
    }

    /// Scroll down by the given amount
    pub fn scroll_down(&mut self, amount: usize) {
        self.offset = self.offset.saturating_add(amount).min(self.max_scroll);
    }

    /// Scroll one viewport up
    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport.max(1));
    }

    /// Scroll one viewport down
    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport.max(1));
    }

    /// Jump to the top
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Jump to the bottom
    pub fn scroll_to_end(&mut self) {
        self.offset = self.max_scroll;
    }

    // =========================================================================
    // Bounds Updates
    // =========================================================================

    /// Update content and viewport sizes, clamping the offset
    pub fn update_bounds(&mut self, content: usize, viewport: usize) {
        self.content = content;
        self.viewport = viewport;
        self.max_scroll = content.saturating_sub(viewport);

        if self.offset > self.max_scroll {
            self.offset = self.max_scroll;
        }
    }
}
