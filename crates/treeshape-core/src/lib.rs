//! Core types for treeshape.
//!
//! This crate provides the data model shared by the scanner and the CLI:
//! tree nodes, per-file metadata, scan configuration and error types.

mod config;
mod error;
mod node;
mod tree;

pub use config::{DEFAULT_IGNORE_FILE, MetadataMode, ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use node::{Children, FileMeta, Node, UNKNOWN_TYPE};
pub use tree::{ScanStats, StructureTree};
