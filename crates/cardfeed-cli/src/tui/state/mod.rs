//! TUI state

mod scroll;

pub use scroll::ScrollState;
