//! Dialog modules for the TUI
//!
//! Contains modal dialogs for various operations

pub mod category;
pub mod confirm;
pub mod detail;
pub mod help;
pub mod month_picker;
pub mod transaction;
