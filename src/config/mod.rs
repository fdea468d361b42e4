//! Configuration module for mm-cli
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::MmPaths;
pub use settings::{is_closed_group, Settings};
