//! Configuration module for interactive tables
//!
//! This module provides the `TableViewConfig` struct and its builder for
//! configuring search, highlighting, export and background indexing with
//! validation and sensible defaults.

pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

pub use builder::TableViewConfigBuilder;
pub use types::TableViewConfig;
