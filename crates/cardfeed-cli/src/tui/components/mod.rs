//! UI components

pub mod listing;
pub mod status_bar;

pub use listing::{render_header, render_indicator, render_listing};
pub use status_bar::{render_status_bar, StatusInfo};
