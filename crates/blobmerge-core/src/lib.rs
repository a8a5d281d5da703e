//! Blobmerge Core Library
//!
//! This crate provides the configuration, fixed blob names and the pure merge
//! operation shared by the storage layer and the command-line tool.

pub mod config;
pub mod constants;
pub mod merge;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use merge::{merge_texts, MergePlan, SourcePair};
