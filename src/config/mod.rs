//! Configuration management for wardwatch.
//!
//! This module handles loading and saving application configuration from TOML files
//! stored in the user's config directory.

pub mod file;

pub use file::{get_config_path, ViewMode, WardwatchConfig};
