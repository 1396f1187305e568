//! Shared error model and configuration for sdkdocs.
//!
//! This crate is the foundation depended on by all other sdkdocs crates.
//! It provides:
//! - [`DocGenError`] — the unified error type
//! - Configuration ([`AppConfig`] and its sections, config loading)

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, IndexConfig, ModuleEntry, PathsConfig, ProjectConfig,
    SphinxConfig, ToolCommand, ToolchainConfig, init_config, load_config, load_config_from,
};
pub use error::{DocGenError, Result};
