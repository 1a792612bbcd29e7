//! Scan result container and statistics.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::error::ScanWarning;
use crate::node::Node;

/// Summary statistics for a scanned tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Total number of files included.
    pub total_files: u64,
    /// Total number of directories included, the root among them.
    pub total_dirs: u64,
    /// Sum of included file sizes in bytes.
    pub total_size: u64,
    /// Sum of included file line counts (zero in simple mode).
    pub total_lines: u64,
    /// Entries skipped for starting with a dot.
    pub hidden_skipped: u64,
    /// Entries skipped by an ignore rule.
    pub ignored_skipped: u64,
    /// Deepest level reached below the root.
    pub max_depth: u32,
}

impl ScanStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an included file.
    pub fn record_file(&mut self, size: u64, lines: u64, depth: u32) {
        self.total_files += 1;
        self.total_size += size;
        self.total_lines += lines;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record an included directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a hidden entry that was skipped.
    pub fn record_hidden(&mut self) {
        self.hidden_skipped += 1;
    }

    /// Record an entry excluded by an ignore rule.
    pub fn record_ignored(&mut self) {
        self.ignored_skipped += 1;
    }
}

/// Complete scan result with metadata.
///
/// Only [`StructureTree::root`] is part of the exported snapshot; the rest
/// describes the scan itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureTree {
    /// Root node: a directory, or a single file when the root is a file.
    pub root: Node,

    /// Canonical root path that was scanned.
    pub root_path: PathBuf,

    /// When this scan was performed.
    pub scanned_at: SystemTime,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Scan configuration used.
    pub config: ScanConfig,

    /// Summary statistics.
    pub stats: ScanStats,

    /// Warnings encountered during scan.
    pub warnings: Vec<ScanWarning>,
}

impl StructureTree {
    /// Create a new structure tree.
    pub fn new(
        root: Node,
        root_path: PathBuf,
        config: ScanConfig,
        stats: ScanStats,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            root,
            root_path,
            scanned_at: SystemTime::now(),
            scan_duration,
            config,
            stats,
            warnings,
        }
    }

    /// Get the total number of files.
    pub fn total_files(&self) -> u64 {
        self.stats.total_files
    }

    /// Get the total number of directories.
    pub fn total_dirs(&self) -> u64 {
        self.stats.total_dirs
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
