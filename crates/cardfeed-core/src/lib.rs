//! cardfeed core - infinite-scroll listing loader
//!
//! This crate provides the pieces behind the cardfeed listing view:
//! - Scroll controller owning the page cursor and loading guard
//! - Card extraction from server-rendered listing pages
//! - HTTP page source with retry and backoff
//! - Datetime clock task with start/stop lifecycle
//! - Display surface abstraction with an in-memory implementation

pub mod cards;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod paths;
pub mod retry;
pub mod scroll;
pub mod source;
pub mod surface;

// Re-exports for convenience
pub use cards::{Card, CardSelector};
pub use clock::{ClockTicker, SystemClock};
pub use config::{FeedConfig, SortOrder};
pub use error::{FeedError, Result};
pub use scroll::{InfiniteScroll, LoadPhase, PageOutcome, PageRequest};
pub use source::{HttpPageSource, PageSource};
pub use surface::{Element, MemorySurface, ScrollMetrics, SharedSurface, Surface};
