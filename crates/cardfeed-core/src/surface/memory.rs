//! In-memory surface for headless hosts and tests

use std::collections::{HashMap, HashSet};

use super::{Element, ScrollMetrics, Surface};
use crate::cards::Card;
use crate::error::{FeedError, Result};

/// Surface that keeps element state in plain collections
///
/// Every element starts present, empty and visible. The loading indicator
/// starts hidden, matching the listing page's initial markup.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    present: HashSet<Element>,
    text: HashMap<Element, String>,
    visible: HashMap<Element, bool>,
    children: HashMap<Element, Vec<Card>>,
    metrics: ScrollMetrics,
    mutations: usize,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        let mut visible = HashMap::new();
        visible.insert(Element::LoadingIndicator, false);

        Self {
            present: Element::ALL.into_iter().collect(),
            text: HashMap::new(),
            visible,
            children: HashMap::new(),
            metrics: ScrollMetrics::default(),
            mutations: 0,
        }
    }

    /// Remove an element from the surface
    pub fn without(mut self, element: Element) -> Self {
        self.present.remove(&element);
        self
    }

    /// Set the container's scroll metrics
    pub fn set_metrics(&mut self, metrics: ScrollMetrics) {
        self.metrics = metrics;
    }

    /// Current text of an element, if any was set
    pub fn text(&self, element: Element) -> Option<&str> {
        self.text.get(&element).map(String::as_str)
    }

    /// Visibility of an element; `None` when absent
    pub fn is_visible(&self, element: Element) -> Option<bool> {
        self.present
            .contains(&element)
            .then(|| self.visible.get(&element).copied().unwrap_or(true))
    }

    /// Children appended to an element, in order
    pub fn children(&self, element: Element) -> &[Card] {
        self.children.get(&element).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of state changes applied through [`Surface`]
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    fn require(&self, element: Element) -> Result<()> {
        if self.present.contains(&element) {
            Ok(())
        } else {
            Err(FeedError::MissingElement(element))
        }
    }
}

impl Surface for MemorySurface {
    fn contains(&self, element: Element) -> bool {
        self.present.contains(&element)
    }

    fn set_text(&mut self, element: Element, text: &str) -> Result<()> {
        self.require(element)?;
        self.text.insert(element, text.to_string());
        self.mutations += 1;
        Ok(())
    }

    fn set_visible(&mut self, element: Element, visible: bool) -> Result<()> {
        self.require(element)?;
        self.visible.insert(element, visible);
        self.mutations += 1;
        Ok(())
    }

    fn append_child(&mut self, element: Element, card: Card) -> Result<()> {
        self.require(element)?;
        self.children.entry(element).or_default().push(card);
        self.mutations += 1;
        Ok(())
    }

    fn scroll_metrics(&self) -> Result<ScrollMetrics> {
        self.require(Element::Container)?;
        Ok(self.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_starts_hidden() {
        let surface = MemorySurface::new();
        assert_eq!(surface.is_visible(Element::LoadingIndicator), Some(false));
        assert_eq!(surface.is_visible(Element::Grid), Some(true));
    }

    #[test]
    fn test_missing_element_rejects_writes() {
        let mut surface = MemorySurface::new().without(Element::DateTime);
        assert!(!surface.contains(Element::DateTime));
        assert!(matches!(
            surface.set_text(Element::DateTime, "now"),
            Err(FeedError::MissingElement(Element::DateTime))
        ));
        assert_eq!(surface.mutations(), 0);
        assert_eq!(surface.is_visible(Element::DateTime), None);
    }

    #[test]
    fn test_missing_container_has_no_metrics() {
        let surface = MemorySurface::new().without(Element::Container);
        assert!(surface.scroll_metrics().is_err());
    }

    #[test]
    fn test_append_keeps_order() {
        let cards = crate::cards::CardSelector::parse(".inventory-card")
            .unwrap()
            .extract(
                r#"<div class="inventory-card">a</div>
                <div class="inventory-card">b</div>
                <div class="inventory-card">c</div>"#,
            );

        let mut surface = MemorySurface::new();
        for card in cards {
            surface.append_child(Element::Grid, card).unwrap();
        }
        let labels: Vec<_> = surface
            .children(Element::Grid)
            .iter()
            .map(Card::label)
            .collect();
        assert_eq!(labels, ["a", "b", "c"]);
        assert_eq!(surface.mutations(), 3);
    }
}
