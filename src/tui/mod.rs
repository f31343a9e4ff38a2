//! Terminal User Interface module
//!
//! A menu-driven TUI built on ratatui: transactions, budget categories and
//! the monthly analysis of one selected month, with modal dialogs for data
//! entry.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
