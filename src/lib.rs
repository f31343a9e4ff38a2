//! Kantong - terminal personal finance tracker for students
//!
//! This library provides the core functionality of the Kantong application:
//! recording income and expense transactions, planning monthly budget
//! categories ("pos anggaran") and summarizing each month's finances.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, analysis, money)
//! - `storage`: Pipe-delimited flat file storage
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting for CLI output
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use kantong::config::{paths::KantongPaths, settings::Settings};
//! use kantong::storage::Storage;
//!
//! let paths = KantongPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, settings.parse_mode())?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{KantongError, KantongResult};
