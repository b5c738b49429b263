//! Application state and event loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use cardfeed_core::surface::shared;
use cardfeed_core::{
    ClockTicker, FeedConfig, HttpPageSource, InfiniteScroll, PageOutcome, PageRequest,
    PageSource, SharedSurface, SystemClock,
};

use crate::tui::components::{
    render_header, render_indicator, render_listing, render_status_bar, StatusInfo,
};
use crate::tui::polling::{poll_page_results, PageResult};
use crate::tui::surface::TerminalSurface;
use crate::tui::theme::Theme;

/// Redraw cadence; also how often finished fetches are picked up
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

const HEADER_TITLE: &str = "cardfeed";

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Main application
pub struct App {
    config: FeedConfig,
    pub(crate) surface: SharedSurface<TerminalSurface>,
    scroll: InfiniteScroll<TerminalSurface>,
    source: Arc<HttpPageSource>,
    results_tx: UnboundedSender<PageResult>,
    results_rx: UnboundedReceiver<PageResult>,
    theme: Theme,
    /// Most recent completed fetch, shown in the status bar
    last_outcome: Option<PageOutcome>,
    pub(crate) should_quit: bool,
}

impl App {
    pub fn new(config: FeedConfig) -> Result<Self> {
        let source = Arc::new(HttpPageSource::from_config(&config)?);
        let surface = shared(TerminalSurface::new());
        let scroll = InfiniteScroll::new(Arc::clone(&surface), &config)?;
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            surface,
            scroll,
            source,
            results_tx,
            results_rx,
            theme: Theme::default(),
            last_outcome: None,
            should_quit: false,
        })
    }

    /// Take over the terminal until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let ticker = ClockTicker::start(
            Arc::clone(&self.surface),
            SystemClock::new(),
            self.config.clock_interval(),
        );

        self.surface.lock().indicator.visible = true;
        terminal.draw(|f| self.render(f))?;
        self.load_initial_page().await;

        let mut events = EventStream::new();
        let mut frame_tick = tokio::time::interval(FRAME_INTERVAL);

        while !self.should_quit {
            let poll = poll_page_results(&mut self.results_rx, &mut self.scroll);
            if let Some(outcome) = poll.outcomes.into_iter().last() {
                self.last_outcome = Some(outcome);
            }
            terminal.draw(|f| self.render(f))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                _ = frame_tick.tick() => {}
            }
        }

        ticker.stop().await;
        Ok(())
    }

    /// Fetch and show the start page, the part a browser gets pre-rendered
    async fn load_initial_page(&mut self) {
        let page = self.scroll.page();

        match self.source.fetch_page(page).await {
            Ok(html) => match self.scroll.render_initial(&html) {
                Ok(_) => self.surface.lock().indicator.visible = false,
                Err(e) => warn!(page, error = %e, "Failed to render initial page"),
            },
            Err(e) => {
                // The first scroll asks for the start page again
                if let Err(e) = self.scroll.on_initial_failure(&e) {
                    warn!(page, error = %e, "Failed to report initial page failure");
                }
            }
        }
    }

    /// Container scrolled: let the controller decide whether to fetch
    pub(crate) fn on_container_scrolled(&mut self) {
        match self.scroll.on_scroll() {
            Ok(Some(request)) => self.dispatch(request),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Scroll handling failed"),
        }
    }

    /// Run the fetch on its own task; the result comes back through the
    /// results channel
    fn dispatch(&self, request: PageRequest) {
        info!(page = request.page, "Dispatching page fetch");

        let source = Arc::clone(&self.source);
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_page(request.page).await;
            let _ = tx.send(PageResult { request, result });
        });
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

        let mut surface = self.surface.lock();
        surface.set_viewport(chunks[1].height as usize);

        render_header(f, chunks[0], &self.theme, HEADER_TITLE, &surface.datetime);
        render_listing(f, chunks[1], &self.theme, &surface);
        render_indicator(f, chunks[2], &self.theme, &surface.indicator);
        render_status_bar(
            f,
            chunks[3],
            &self.theme,
            &StatusInfo {
                source: &self.config.base_url,
                page: self.scroll.page(),
                cards: surface.cards.len(),
                phase: self.scroll.phase(),
                last_outcome: self.last_outcome.as_ref(),
            },
        );
    }
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
