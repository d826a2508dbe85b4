//! Shared types, error model, and configuration for Echo Base.
//!
//! This crate is the foundation depended on by all other Echo Base crates.
//! It provides:
//! - [`EchoBaseError`]: the unified error type
//! - Domain types ([`Record`], [`EntityKind`])
//! - Configuration ([`AppConfig`], [`CatalogConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CatalogConfig, CatalogSection, FilesSection, PipelineSection, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{EchoBaseError, Result};
pub use types::{EntityKind, Record};
