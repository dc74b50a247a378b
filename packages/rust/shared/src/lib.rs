//! Shared types, error model, and configuration for llmsgen.
//!
//! This crate is the foundation depended on by the other llmsgen crates.
//! It provides:
//! - [`LlmsGenError`]: the unified error type
//! - Domain types ([`DocumentRecord`], [`DocEntry`], [`RouteNode`], [`SiteMetadata`])
//! - Configuration ([`GenerationConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    CONFIG_FILE_NAME, GenerationConfig, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{LlmsGenError, Result};
pub use types::{
    DocEntry, DocMetadata, DocumentRecord, RenderedArtifacts, RouteNode, RoutePlugin, RouteProps,
    SiteMetadata, VersionProps,
};
