//! Configuration module for PaySphere
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PaySpherePaths;
pub use settings::Settings;
