//! Card extraction from server-rendered listing pages

use scraper::{ElementRef, Html, Selector};

use crate::error::{FeedError, Result};

/// Headings (or an explicit title class) name the card
const TITLE_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, .card-title";

/// One inventory item lifted out of a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Outer HTML of the card element
    pub html: String,
    /// Non-empty text nodes, trimmed, in document order
    pub lines: Vec<String>,
    /// Text of the first heading inside the card
    pub title: Option<String>,
}

impl Card {
    fn from_element(element: ElementRef<'_>, title: &Selector) -> Self {
        let lines: Vec<String> = element
            .text()
            .map(normalize)
            .filter(|line| !line.is_empty())
            .collect();

        let title = element
            .select(title)
            .map(|heading| normalize(&heading.text().collect::<String>()))
            .find(|heading| !heading.is_empty());

        Self {
            html: element.html(),
            lines,
            title,
        }
    }

    /// Title if present, otherwise the first line of text
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .or_else(|| self.lines.first().map(String::as_str))
            .unwrap_or("")
    }
}

/// Parsed card selector
#[derive(Debug, Clone)]
pub struct CardSelector {
    selector: Selector,
    title: Selector,
}

impl CardSelector {
    /// Parse a CSS selector identifying card elements
    pub fn parse(selector: &str) -> Result<Self> {
        Ok(Self {
            selector: parse_selector(selector)?,
            title: parse_selector(TITLE_SELECTOR)?,
        })
    }

    /// Parse an HTML document and return every matching card in document
    /// order. The rest of the document is discarded.
    pub fn extract(&self, html: &str) -> Vec<Card> {
        let document = Html::parse_document(html);
        document
            .select(&self.selector)
            .map(|element| Card::from_element(element, &self.title))
            .collect()
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| FeedError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
