//! Directory tree builder for treeshape.
//!
//! This crate walks a directory and produces a [`Node`] tree, skipping
//! hidden entries and anything excluded by the `.gitignore` at the scan root.
//!
//! # Overview
//!
//! - [`IgnoreMatcher`] compiles gitignore rules once per scan and answers
//!   whether a path under the root is excluded.
//! - [`TreeBuilder`] recurses depth-first, consulting the matcher at every
//!   entry and recording size, type, modification time and line count for
//!   each file.
//! - [`TreeScanner`] ties both together for a [`ScanConfig`].
//!
//! # Example
//!
//! ```rust,no_run
//! use treeshape_scan::{ScanConfig, TreeScanner};
//!
//! let config = ScanConfig::new("/path/to/project");
//! let tree = TreeScanner::new().scan(&config).unwrap();
//!
//! println!("{}", serde_json::to_string_pretty(&tree.root).unwrap());
//! println!("Total files: {}", tree.total_files());
//! ```

mod builder;
mod matcher;
mod scanner;

pub use builder::{TreeBuilder, count_lines, file_type};
pub use matcher::{IgnoreMatcher, IgnoreMatcherBuilder};
pub use scanner::TreeScanner;

// Re-export core types for convenience
pub use treeshape_core::{
    Children, FileMeta, MetadataMode, Node, ScanConfig, ScanError, ScanStats, ScanWarning,
    StructureTree, WarningKind,
};
