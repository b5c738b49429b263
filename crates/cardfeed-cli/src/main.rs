//! cardfeed - product listing in the terminal
//!
//! Browses a server-rendered product listing with:
//! - Infinite scroll: the next page loads as you near the bottom
//! - A live clock in the header
//! - One-shot page fetches for scripting

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cardfeed_core::{
    paths, Card, CardSelector, FeedConfig, HttpPageSource, PageSource, SortOrder,
};

mod tui;

use tui::components::listing::card_rows;

/// cardfeed - infinite-scroll product listing
#[derive(Parser)]
#[command(name = "cardfeed", version)]
#[command(about = "Terminal product listing with infinite scroll", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Listing URL (overrides the config file)
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// Page shown before any scrolling (overrides the config file)
    #[arg(short, long, global = true)]
    start_page: Option<u32>,

    /// Config file (defaults to ~/.cardfeed/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Search text sent with every page request
    #[arg(short = 'q', long, global = true)]
    search: Option<String>,

    /// Sort order: name_asc, name_desc, price_asc, price_desc, date_asc, date_desc
    #[arg(long, global = true)]
    sort: Option<SortOrder>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the listing interactively
    Browse,

    /// Fetch one page and print its cards
    Fetch {
        /// Page to fetch (defaults to the start page)
        #[arg(long)]
        page: Option<u32>,

        /// Print the outer HTML of each card instead of its text
        #[arg(long)]
        html: bool,
    },
}

impl Cli {
    /// Config file values with command line overrides applied
    fn resolve_config(&self) -> FeedConfig {
        let path = self.config.clone().unwrap_or_else(paths::config_file);
        let mut config = FeedConfig::load_or_default(&path);

        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if let Some(start_page) = self.start_page {
            config.start_page = start_page.max(1);
        }
        if let Some(search) = &self.search {
            config.search = Some(search.clone());
        }
        if let Some(sort) = self.sort {
            config.sort = Some(sort);
        }
        config
    }
}

/// Restore terminal state - called on panic or unexpected exit
fn restore_terminal() {
    use crossterm::{
        event::DisableMouseCapture,
        execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Log to a file so output never lands on the TUI
fn init_logging() {
    let log_dir = paths::logs_dir();
    std::fs::create_dir_all(&log_dir).ok();

    let Ok(log_file) = std::fs::File::create(log_dir.join("cardfeed.log")) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

/// Printed form of one card: the same rows the listing shows, or its HTML
fn card_output(card: &Card, html: bool) -> Vec<String> {
    if html {
        return vec![card.html.clone(), String::new()];
    }

    card_rows(card)
        .into_iter()
        .enumerate()
        .map(|(i, row)| match (i, row.is_empty()) {
            (_, true) => row,
            (0, false) => format!("  {row}"),
            (_, false) => format!("    {row}"),
        })
        .collect()
}

async fn fetch(config: &FeedConfig, page: u32, html: bool) -> Result<()> {
    let source = HttpPageSource::from_config(config)?;
    let selector = CardSelector::parse(&config.card_selector)?;

    println!("{}", source.page_url(page));
    let body = source.fetch_page(page).await?;
    let cards = selector.extract(&body);

    if cards.is_empty() {
        println!("  {}", config.end_message);
        return Ok(());
    }

    println!();
    for card in &cards {
        for line in card_output(card, html) {
            println!("{line}");
        }
    }
    println!("  {} item(s) on page {}", cards.len(), page);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up panic hook to restore terminal state
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    init_logging();

    let cli = Cli::parse();
    let config = cli.resolve_config();
    tracing::info!(base_url = %config.base_url, start_page = config.start_page, "Starting cardfeed");

    match cli.command {
        Some(Commands::Fetch { page, html }) => {
            fetch(&config, page.unwrap_or(config.start_page), html).await?;
        }
        Some(Commands::Browse) | None => {
            let mut app = tui::App::new(config)?;
            app.run().await?;
        }
    }

    Ok(())
}
