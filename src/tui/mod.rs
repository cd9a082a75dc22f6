//! Terminal user interface for gridboard.
//!
//! Provides a terminal front end built on ratatui and crossterm. It draws the
//! dashboard grid at the breakpoint matching the terminal width and turns
//! keyboard gestures into layout reports for the store.

pub mod app;
pub mod edit;
pub mod event;
pub mod gesture;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
