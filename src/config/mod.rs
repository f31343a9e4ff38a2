//! Configuration module for Kantong
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::KantongPaths;
pub use settings::Settings;
