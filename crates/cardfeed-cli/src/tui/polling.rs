//! Channel Polling
//!
//! Page fetches run on spawned tasks and report back over a channel. The
//! event loop drains it every iteration and hands each result to the scroll
//! controller.

use tokio::sync::mpsc::UnboundedReceiver;

use cardfeed_core::{InfiniteScroll, PageOutcome, PageRequest, Surface};

/// Result of one dispatched page fetch
#[derive(Debug)]
pub struct PageResult {
    pub request: PageRequest,
    pub result: cardfeed_core::Result<String>,
}

/// Result of a polling operation
#[derive(Debug, Default)]
pub struct PollResult {
    /// Outcomes of completed fetches, in arrival order
    pub outcomes: Vec<PageOutcome>,
}

impl PollResult {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Apply every completed fetch waiting in the channel
pub fn poll_page_results<S: Surface>(
    rx: &mut UnboundedReceiver<PageResult>,
    scroll: &mut InfiniteScroll<S>,
) -> PollResult {
    let mut result = PollResult::new();

    while let Ok(PageResult { request, result: fetched }) = rx.try_recv() {
        let applied = match fetched {
            Ok(html) => scroll.on_response(request, &html),
            Err(e) => scroll.on_failure(request, &e),
        };

        match applied {
            Ok(outcome) => result.outcomes.push(outcome),
            Err(e) => tracing::warn!(page = request.page, error = %e, "Dropped page result"),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardfeed_core::surface::shared;
    use cardfeed_core::{FeedConfig, FeedError, MemorySurface, ScrollMetrics};
    use tokio::sync::mpsc;

    fn scroll_at_bottom() -> InfiniteScroll<MemorySurface> {
        let mut surface = MemorySurface::new();
        surface.set_metrics(ScrollMetrics::new(0, 100, 100));
        InfiniteScroll::new(shared(surface), &FeedConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_channel() {
        let (_tx, mut rx) = mpsc::unbounded_channel();
        let mut scroll = scroll_at_bottom();

        let result = poll_page_results(&mut rx, &mut scroll);
        assert!(result.outcomes.is_empty());
    }

    #[test]
    fn test_applies_response() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scroll = scroll_at_bottom();
        let request = scroll.on_scroll().unwrap().unwrap();

        tx.send(PageResult {
            request,
            result: Ok(r#"<div class="inventory-card">Lamp</div>"#.to_string()),
        })
        .unwrap();

        let result = poll_page_results(&mut rx, &mut scroll);
        assert_eq!(result.outcomes, [PageOutcome::Appended { page: 2, cards: 1 }]);
        assert!(!scroll.is_loading());
    }

    #[test]
    fn test_applies_failure_and_drops_stale() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scroll = scroll_at_bottom();
        let request = scroll.on_scroll().unwrap().unwrap();

        tx.send(PageResult {
            request,
            result: Err(FeedError::Config("offline".into())),
        })
        .unwrap();
        // Second result for the same request no longer matches anything
        tx.send(PageResult {
            request,
            result: Ok(String::new()),
        })
        .unwrap();

        let result = poll_page_results(&mut rx, &mut scroll);
        assert_eq!(result.outcomes.len(), 1);
        assert!(matches!(result.outcomes[0], PageOutcome::Failed { page: 2, .. }));
        assert!(!scroll.is_loading());
    }
}
