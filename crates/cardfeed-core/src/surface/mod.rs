//! Display surface abstraction
//!
//! The scroll controller and the clock never touch a concrete display. They
//! go through [`Surface`], which exposes the handful of capabilities the
//! listing page offers: query an element, set its text or visibility, append
//! a card to the grid and read the container's scroll metrics.

mod memory;

pub use memory::MemorySurface;

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cards::Card;
use crate::constants::selectors;
use crate::error::Result;

/// Surface shared between the clock task and the scroll controller
pub type SharedSurface<S> = Arc<Mutex<S>>;

/// Wrap a surface for sharing
pub fn shared<S: Surface>(surface: S) -> SharedSurface<S> {
    Arc::new(Mutex::new(surface))
}

/// Elements of the listing page the components talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// Clock display
    DateTime,
    /// Scrollable viewport
    Container,
    /// Append target for cards
    Grid,
    /// Optional loading / status indicator
    LoadingIndicator,
}

impl Element {
    pub const ALL: [Element; 4] = [
        Element::DateTime,
        Element::Container,
        Element::Grid,
        Element::LoadingIndicator,
    ];

    /// CSS selector of the element on the listing page
    pub fn selector(self) -> &'static str {
        match self {
            Element::DateTime => selectors::DATETIME,
            Element::Container => selectors::CONTAINER,
            Element::Grid => selectors::GRID,
            Element::LoadingIndicator => selectors::LOADING,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Scroll position of the container, in surface units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Offset of the visible window from the top
    pub scroll_top: u32,
    /// Height of the visible window
    pub client_height: u32,
    /// Total scrollable height
    pub scroll_height: u32,
}

impl ScrollMetrics {
    pub fn new(scroll_top: u32, client_height: u32, scroll_height: u32) -> Self {
        Self {
            scroll_top,
            client_height,
            scroll_height,
        }
    }

    /// True when the bottom of the visible window is within `threshold` of
    /// the end of the content
    pub fn near_bottom(&self, threshold: u32) -> bool {
        let visible_bottom = self.scroll_top.saturating_add(self.client_height);
        visible_bottom.saturating_add(threshold) >= self.scroll_height
    }
}

/// Capabilities the components need from the display
pub trait Surface {
    /// Whether the element exists on this surface
    fn contains(&self, element: Element) -> bool;

    /// Replace the element's text
    fn set_text(&mut self, element: Element, text: &str) -> Result<()>;

    /// Show or hide the element
    fn set_visible(&mut self, element: Element, visible: bool) -> Result<()>;

    /// Append a card as the last child of the element
    fn append_child(&mut self, element: Element, card: Card) -> Result<()>;

    /// Current scroll metrics of the container
    fn scroll_metrics(&self) -> Result<ScrollMetrics>;
}
