//! Core generation logic for llmsgen.
//!
//! This crate ties together document collection, route scanning, index and
//! full-text rendering, and artifact writing (see [`pipeline::Generator`]).

pub mod aggregator;
pub mod assembler;
pub mod collector;
pub mod index;
pub mod matcher;
pub mod pipeline;
pub mod routes;

pub use matcher::{ExclusionMatcher, ExclusionPattern, PathMatcher};
pub use pipeline::{GenerationReport, Generator, LoadedContent, PostBuildContext};
pub use routes::RouteScan;
