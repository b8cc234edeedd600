//! Configuration module for famfin
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence, including the allocation policy

pub mod paths;
pub mod settings;

pub use paths::FamfinPaths;
pub use settings::{AllocationSettings, Settings};
