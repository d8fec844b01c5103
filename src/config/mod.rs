//! Configuration module for the finance tracker
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings and their defaults

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::{CategoryKind, CustomCategory, DateFormat, SettingsPatch, Theme, UserSettings};
