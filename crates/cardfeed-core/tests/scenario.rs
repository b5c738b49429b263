//! End-to-end pagination against a scripted page source

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use cardfeed_core::surface::shared;
use cardfeed_core::{
    Element, FeedConfig, FeedError, InfiniteScroll, MemorySurface, PageOutcome, PageSource,
    ScrollMetrics,
};

/// Serves queued responses and records requested pages
#[derive(Default)]
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<String, u16>>>,
    requested: Mutex<Vec<u32>>,
}

impl ScriptedSource {
    fn then_cards(self, titles: &[&str]) -> Self {
        let cards: String = titles
            .iter()
            .map(|t| format!(r#"<article class="inventory-card"><h2>{t}</h2><p>$1.00</p></article>"#))
            .collect();
        let html = format!(
            r#"<html><body><main class="content"><section id="inventoryGrid">{cards}</section></main></body></html>"#
        );
        self.responses.lock().unwrap().push_back(Ok(html));
        self
    }

    fn then_status(self, status: u16) -> Self {
        self.responses.lock().unwrap().push_back(Err(status));
        self
    }

    fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_page(&self, page: u32) -> cardfeed_core::Result<String> {
        self.requested.lock().unwrap().push(page);
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(html)) => Ok(html),
            Some(Err(status)) => Err(FeedError::Status {
                status,
                url: format!("http://shop.test/?page={page}"),
                retry_after: None,
            }),
            None => panic!("unexpected request for page {page}"),
        }
    }
}

fn listing() -> InfiniteScroll<MemorySurface> {
    let mut surface = MemorySurface::new();
    surface.set_metrics(ScrollMetrics::new(900, 300, 1300));
    InfiniteScroll::new(shared(surface), &FeedConfig::default()).unwrap()
}

fn grid_labels(scroll: &InfiniteScroll<MemorySurface>) -> Vec<String> {
    scroll
        .surface()
        .lock()
        .children(Element::Grid)
        .iter()
        .map(|c| c.label().to_string())
        .collect()
}

#[tokio::test]
async fn loads_until_listing_is_exhausted() {
    let source = ScriptedSource::default()
        .then_cards(&["Lamp", "Shelf", "Rug"])
        .then_cards(&[]);
    let mut scroll = listing();

    let first = scroll.load_next(&source).await.unwrap();
    assert_eq!(first, Some(PageOutcome::Appended { page: 2, cards: 3 }));
    assert_eq!(scroll.page(), 2);
    assert!(!scroll.is_loading());
    assert_eq!(grid_labels(&scroll), ["Lamp", "Shelf", "Rug"]);

    let second = scroll.load_next(&source).await.unwrap();
    assert_eq!(second, Some(PageOutcome::Exhausted { page: 3 }));
    assert!(scroll.is_loading());
    assert_eq!(
        scroll.surface().lock().text(Element::LoadingIndicator),
        Some("No more products")
    );

    for _ in 0..3 {
        assert_eq!(scroll.load_next(&source).await.unwrap(), None);
    }
    assert_eq!(source.requested(), [2, 3]);
    assert_eq!(grid_labels(&scroll).len(), 3);
}

#[tokio::test]
async fn failed_page_is_requested_again() {
    let source = ScriptedSource::default()
        .then_cards(&["Lamp"])
        .then_status(500)
        .then_cards(&["Desk", "Chair"])
        .then_cards(&["Mirror"]);
    let mut scroll = listing();

    scroll.load_next(&source).await.unwrap();
    let failed = scroll.load_next(&source).await.unwrap();
    assert!(matches!(failed, Some(PageOutcome::Failed { page: 3, .. })));
    assert!(!scroll.is_loading());
    assert_eq!(scroll.page(), 3);
    assert_eq!(grid_labels(&scroll), ["Lamp"]);

    scroll.load_next(&source).await.unwrap();
    scroll.load_next(&source).await.unwrap();

    // Cursor advances by one per successful cycle; the failed page is retried
    assert_eq!(source.requested(), [2, 3, 3, 4]);
    assert_eq!(scroll.page(), 4);
    assert_eq!(grid_labels(&scroll), ["Lamp", "Desk", "Chair", "Mirror"]);
    assert_eq!(
        scroll.surface().lock().is_visible(Element::LoadingIndicator),
        Some(false)
    );
}

#[tokio::test]
async fn no_request_until_threshold() {
    let source = ScriptedSource::default().then_cards(&["Lamp"]);
    let mut surface = MemorySurface::new();
    surface.set_metrics(ScrollMetrics::new(0, 300, 1300));
    let surface = shared(surface);
    let mut scroll = InfiniteScroll::new(surface.clone(), &FeedConfig::default()).unwrap();

    assert_eq!(scroll.load_next(&source).await.unwrap(), None);
    assert!(source.requested().is_empty());

    // 800 + 300 + 200 >= 1300
    surface.lock().set_metrics(ScrollMetrics::new(800, 300, 1300));
    assert!(scroll.load_next(&source).await.unwrap().is_some());
    assert_eq!(source.requested(), [2]);
}
