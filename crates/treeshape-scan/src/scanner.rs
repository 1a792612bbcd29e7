//! Scan entry point: resolve the root, load ignore rules, build the tree.

use std::time::Instant;

use tracing::info;

use treeshape_core::{ScanConfig, ScanError, StructureTree};

use crate::builder::TreeBuilder;
use crate::matcher::IgnoreMatcher;

/// Single-threaded directory scanner.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeScanner;

impl TreeScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Perform a scan of `config.root`.
    ///
    /// Ignore rules are read from `config.ignore_file` at the root and
    /// relative paths are resolved against the root, never against the
    /// process working directory.
    pub fn scan(&self, config: &ScanConfig) -> Result<StructureTree, ScanError> {
        let start = Instant::now();
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        let (matcher, mut warnings) = if root_path.is_dir() {
            IgnoreMatcher::load(&root_path, &config.ignore_file, &config.extra_ignore_patterns)
        } else {
            (IgnoreMatcher::empty(&root_path), Vec::new())
        };
        info!(
            root = %root_path.display(),
            rules = matcher.len(),
            "scanning"
        );

        let mut builder =
            TreeBuilder::new(&matcher, config.metadata).sort_entries(config.sort_entries);
        let root = builder.build(&root_path)?;
        let (stats, build_warnings) = builder.finish();
        warnings.extend(build_warnings);

        let scan_duration = start.elapsed();
        info!(
            files = stats.total_files,
            dirs = stats.total_dirs,
            elapsed_ms = scan_duration.as_millis() as u64,
            "scan complete"
        );

        Ok(StructureTree::new(
            root,
            root_path,
            config.clone(),
            stats,
            scan_duration,
            warnings,
        ))
    }
}
