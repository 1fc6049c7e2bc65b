//! Configuration module for billtrack
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BilltrackPaths;
pub use settings::Settings;
