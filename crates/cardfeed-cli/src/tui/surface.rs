//! Terminal rendition of the listing page
//!
//! Holds what the browser page would hold: the datetime text, the grid of
//! cards, the loading indicator and the scroll position of the content
//! panel. Rows are reported to the scroll controller as [`ROW_UNITS`] units
//! each, so pixel thresholds keep their meaning.

use cardfeed_core::constants::scroll::LOADING_MESSAGE;
use cardfeed_core::{Card, Element, ScrollMetrics, Surface};

use crate::tui::components::listing::card_rows;
use crate::tui::state::ScrollState;

/// Surface units per terminal row
pub const ROW_UNITS: u32 = 20;

/// Status line under the listing
#[derive(Debug, Clone)]
pub struct Indicator {
    pub text: String,
    pub visible: bool,
}

/// Listing page state drawn by the TUI
#[derive(Debug)]
pub struct TerminalSurface {
    pub datetime: String,
    pub cards: Vec<Card>,
    pub indicator: Indicator,
    pub scroll: ScrollState,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            datetime: String::new(),
            cards: Vec::new(),
            indicator: Indicator {
                text: LOADING_MESSAGE.to_string(),
                visible: false,
            },
            scroll: ScrollState::new(),
        }
    }

    /// Recompute scroll bounds for the current viewport height
    pub fn set_viewport(&mut self, rows: usize) {
        let content = self.scroll.content;
        self.scroll.update_bounds(content, rows);
    }
}

impl Surface for TerminalSurface {
    fn contains(&self, _element: Element) -> bool {
        true
    }

    fn set_text(&mut self, element: Element, text: &str) -> cardfeed_core::Result<()> {
        match element {
            Element::DateTime => self.datetime = text.to_string(),
            Element::LoadingIndicator => self.indicator.text = text.to_string(),
            // Container and grid show their children, not text
            Element::Container | Element::Grid => {}
        }
        Ok(())
    }

    fn set_visible(&mut self, element: Element, visible: bool) -> cardfeed_core::Result<()> {
        if element == Element::LoadingIndicator {
            self.indicator.visible = visible;
        }
        Ok(())
    }

    fn append_child(&mut self, element: Element, card: Card) -> cardfeed_core::Result<()> {
        if element == Element::Grid {
            let content = self.scroll.content + card_rows(&card).len();
            let viewport = self.scroll.viewport;
            self.cards.push(card);
            self.scroll.update_bounds(content, viewport);
        }
        Ok(())
    }

    fn scroll_metrics(&self) -> cardfeed_core::Result<ScrollMetrics> {
        let units = |rows: usize| {
            u32::try_from(rows)
                .unwrap_or(u32::MAX)
                .saturating_mul(ROW_UNITS)
        };
        Ok(ScrollMetrics::new(
            units(self.scroll.offset),
            units(self.scroll.viewport),
            units(self.scroll.content),
        ))
    }
}
