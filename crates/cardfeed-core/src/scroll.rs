//! Infinite scroll controller
//!
//! Owns the page cursor and the loading guard. The host calls
//! [`InfiniteScroll::on_scroll`] for every scroll event of the container,
//! dispatches the returned [`PageRequest`], and reports back with
//! [`InfiniteScroll::on_response`] or [`InfiniteScroll::on_failure`].
//! Scroll events that arrive while a request is in flight are dropped.

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::cards::CardSelector;
use crate::config::FeedConfig;
use crate::constants::scroll::LOADING_MESSAGE;
use crate::error::{FeedError, Result};
use crate::source::PageSource;
use crate::surface::{Element, SharedSurface, Surface};

/// Loading guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Ready to fetch when the threshold is reached
    Idle,
    /// One request in flight
    Loading { page: u32 },
    /// The server returned an empty page; no further fetches
    Exhausted,
}

/// A page fetch the host must dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
}

/// What a completed request did to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Cards were appended to the grid
    Appended { page: u32, cards: usize },
    /// Empty page: the listing is over
    Exhausted { page: u32 },
    /// The fetch failed; the next trigger requests the same page again
    Failed { page: u32, error: String },
}

/// Infinite scroll state for one listing
pub struct InfiniteScroll<S> {
    surface: SharedSurface<S>,
    page: u32,
    phase: LoadPhase,
    threshold: u32,
    cards: CardSelector,
    end_message: String,
    failure_message: String,
    /// Page whose fetch failed; requested again before the cursor advances
    retry: Option<u32>,
    /// Indicator currently shows the failure message
    showing_failure: bool,
}

impl<S: Surface> InfiniteScroll<S> {
    pub fn new(surface: SharedSurface<S>, config: &FeedConfig) -> Result<Self> {
        Ok(Self {
            surface,
            page: config.start_page,
            phase: LoadPhase::Idle,
            threshold: config.threshold,
            cards: CardSelector::parse(&config.card_selector)?,
            end_message: config.end_message.clone(),
            failure_message: config.failure_message.clone(),
            retry: None,
            showing_failure: false,
        })
    }

    /// Highest page requested so far (the start page before any request)
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page the next trigger will ask for again after a failure
    pub fn pending_retry(&self) -> Option<u32> {
        self.retry
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// True while a request is in flight and forever once exhausted
    pub fn is_loading(&self) -> bool {
        !matches!(self.phase, LoadPhase::Idle)
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == LoadPhase::Exhausted
    }

    pub fn surface(&self) -> &SharedSurface<S> {
        &self.surface
    }

    /// Append the cards of the pre-rendered start page. Cursor and guard are
    /// left alone.
    pub fn render_initial(&mut self, html: &str) -> Result<usize> {
        let cards = self.cards.extract(html);
        let count = cards.len();

        let mut surface = self.surface.lock();
        for card in cards {
            surface.append_child(Element::Grid, card)?;
        }

        info!(page = self.page, cards = count, "Rendered initial page");
        Ok(count)
    }

    /// Handle a scroll event of the container
    ///
    /// Returns the request to dispatch when the guard is free and the
    /// container is within the threshold of its bottom.
    pub fn on_scroll(&mut self) -> Result<Option<PageRequest>> {
        trace!("content scrolling");

        if self.is_loading() {
            return Ok(None);
        }

        let surface = Arc::clone(&self.surface);
        let mut surface = surface.lock();

        let metrics = surface.scroll_metrics()?;
        if !metrics.near_bottom(self.threshold) {
            return Ok(None);
        }

        let page = match self.retry.take() {
            Some(page) => page,
            None => self.page.saturating_add(1),
        };
        self.phase = LoadPhase::Loading { page };
        self.page = self.page.max(page);

        if surface.contains(Element::LoadingIndicator) {
            if self.showing_failure {
                surface.set_text(Element::LoadingIndicator, LOADING_MESSAGE)?;
                self.showing_failure = false;
            }
            surface.set_visible(Element::LoadingIndicator, true)?;
        }

        debug!(page, ?metrics, "Requesting next page");
        Ok(Some(PageRequest { page }))
    }

    /// Process the HTML returned for the in-flight request
    pub fn on_response(&mut self, request: PageRequest, html: &str) -> Result<PageOutcome> {
        self.expect_in_flight(request)?;

        let cards = self.cards.extract(html);
        let page = request.page;

        let surface = Arc::clone(&self.surface);
        let mut surface = surface.lock();

        if cards.is_empty() {
            self.phase = LoadPhase::Exhausted;
            if surface.contains(Element::LoadingIndicator) {
                surface.set_text(Element::LoadingIndicator, &self.end_message)?;
            }
            info!(page, "Listing exhausted");
            return Ok(PageOutcome::Exhausted { page });
        }

        if !surface.contains(Element::Grid) {
            self.release(page);
            return Err(FeedError::MissingElement(Element::Grid));
        }

        let count = cards.len();
        for card in cards {
            surface.append_child(Element::Grid, card)?;
        }

        self.phase = LoadPhase::Idle;
        if surface.contains(Element::LoadingIndicator) {
            surface.set_visible(Element::LoadingIndicator, false)?;
        }

        info!(page, cards = count, "Appended page");
        Ok(PageOutcome::Appended { page, cards: count })
    }

    /// Process a failed fetch of the in-flight request
    ///
    /// Frees the guard and rolls the cursor back so the next trigger asks
    /// for the same page.
    pub fn on_failure(&mut self, request: PageRequest, error: &FeedError) -> Result<PageOutcome> {
        self.expect_in_flight(request)?;

        let page = request.page;
        self.release(page);
        warn!(page, error = %error, "Failed to load page");
        self.show_failure()?;

        Ok(PageOutcome::Failed {
            page,
            error: error.to_string(),
        })
    }

    /// The pre-rendered start page could not be obtained
    ///
    /// The next trigger requests the start page itself instead of the one
    /// after it.
    pub fn on_initial_failure(&mut self, error: &FeedError) -> Result<()> {
        if self.phase != LoadPhase::Idle {
            return Ok(());
        }

        self.retry = Some(self.page);
        warn!(page = self.page, error = %error, "Failed to load start page");
        self.show_failure()
    }

    /// Scroll handling, fetch and completion in one step
    ///
    /// For hosts that have nothing else to do while the request runs.
    pub async fn load_next<P>(&mut self, source: &P) -> Result<Option<PageOutcome>>
    where
        P: PageSource + ?Sized,
    {
        let Some(request) = self.on_scroll()? else {
            return Ok(None);
        };

        let outcome = match source.fetch_page(request.page).await {
            Ok(html) => self.on_response(request, &html)?,
            Err(e) => self.on_failure(request, &e)?,
        };
        Ok(Some(outcome))
    }

    fn expect_in_flight(&self, request: PageRequest) -> Result<()> {
        match self.phase {
            LoadPhase::Loading { page } if page == request.page => Ok(()),
            LoadPhase::Loading { page } => Err(FeedError::UnexpectedPage {
                got: request.page,
                expected: Some(page),
            }),
            _ => Err(FeedError::UnexpectedPage {
                got: request.page,
                expected: None,
            }),
        }
    }

    fn release(&mut self, page: u32) {
        self.phase = LoadPhase::Idle;
        self.retry = Some(page);
    }

    fn show_failure(&mut self) -> Result<()> {
        let mut surface = self.surface.lock();
        if surface.contains(Element::LoadingIndicator) {
            surface.set_text(Element::LoadingIndicator, &self.failure_message)?;
            surface.set_visible(Element::LoadingIndicator, true)?;
            self.showing_failure = true;
        }
        Ok(())
    }
}
