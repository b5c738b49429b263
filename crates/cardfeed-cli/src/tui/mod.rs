//! Terminal User Interface for cardfeed

pub mod app;
pub mod components;
pub mod handlers;
pub mod polling;
pub mod state;
pub mod surface;
pub mod theme;

// Re-exports
pub use app::App;
