//! Recursive tree construction.

use std::fs::{self, DirEntry, Metadata};
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use tracing::{debug, warn};

use treeshape_core::{
    Children, FileMeta, MetadataMode, Node, ScanConfig, ScanError, ScanStats, ScanWarning,
    UNKNOWN_TYPE,
};

use crate::matcher::IgnoreMatcher;

/// Builds a [`Node`] tree for a path, consulting an [`IgnoreMatcher`].
///
/// Traversal is depth-first and single-threaded. Each file is opened, read
/// and closed before its next sibling is visited. Problems with individual
/// entries are collected as warnings and the entry is left out.
pub struct TreeBuilder<'a> {
    matcher: &'a IgnoreMatcher,
    mode: MetadataMode,
    sort_entries: bool,
    stats: ScanStats,
    warnings: Vec<ScanWarning>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder that sorts entries by name.
    pub fn new(matcher: &'a IgnoreMatcher, mode: MetadataMode) -> Self {
        Self {
            matcher,
            mode,
            sort_entries: true,
            stats: ScanStats::new(),
            warnings: Vec::new(),
        }
    }

    /// Keep filesystem enumeration order instead of sorting by name.
    pub fn sort_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    /// Build the node for `path`.
    ///
    /// Fails only if `path` itself cannot be inspected; a regular file yields
    /// a file node, a directory yields a directory node.
    pub fn build(&mut self, path: &Path) -> Result<Node, ScanError> {
        let metadata = fs::metadata(path).map_err(|e| ScanError::io(path, e))?;

        if metadata.is_dir() {
            self.directory_node(path, 0).map_err(|e| ScanError::io(path, e))
        } else if metadata.is_file() {
            self.file_node(path, &metadata, 0).map_err(|e| ScanError::io(path, e))
        } else {
            Err(ScanError::UnsupportedRoot {
                path: path.to_path_buf(),
            })
        }
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// Warnings gathered so far.
    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    /// Consume the builder, returning its statistics and warnings.
    pub fn finish(self) -> (ScanStats, Vec<ScanWarning>) {
        (self.stats, self.warnings)
    }

    fn directory_node(&mut self, path: &Path, depth: u32) -> io::Result<Node> {
        let mut entries: Vec<DirEntry> = Vec::new();
        for entry in fs::read_dir(path)? {
            match entry {
                Ok(entry) => entries.push(entry),
                Err(err) => self.skip(path, &err),
            }
        }
        self.stats.record_dir(depth);

        if self.sort_entries {
            entries.sort_by_key(DirEntry::file_name);
        }

        let mut children = Children::with_capacity(entries.len());
        for entry in entries {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let child_path = entry.path();

            if ScanConfig::is_hidden(&name) {
                debug!(path = %child_path.display(), "skipping hidden entry");
                self.stats.record_hidden();
                continue;
            }

            // Exclusion is decided from the entry type. Symlinks are followed
            // for it, but a failure to follow only counts if the entry is kept.
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    self.skip(&child_path, &err);
                    continue;
                }
            };
            let followed = file_type.is_symlink().then(|| fs::metadata(&child_path));
            let is_dir = match &followed {
                Some(Ok(metadata)) => metadata.is_dir(),
                Some(Err(_)) => false,
                None => file_type.is_dir(),
            };

            if self.matcher.excluded(&child_path, is_dir) {
                debug!(path = %child_path.display(), "skipping ignored entry");
                self.stats.record_ignored();
                continue;
            }

            let key = CompactString::from(name.as_ref());
            if children.contains_key(&key) {
                let warning = ScanWarning::duplicate_name(&child_path, &key);
                warn!("{}", warning.message);
                self.warnings.push(warning);
                continue;
            }

            // A dangling link surfaces here as NotFound.
            let metadata = match followed.unwrap_or_else(|| fs::metadata(&child_path)) {
                Ok(metadata) => metadata,
                Err(err) => {
                    self.skip(&child_path, &err);
                    continue;
                }
            };

            let node = if metadata.is_dir() {
                self.directory_node(&child_path, depth + 1)
            } else if metadata.is_file() {
                self.file_node(&child_path, &metadata, depth + 1)
            } else {
                let warning = ScanWarning::unsupported_type(&child_path);
                debug!("{}", warning.message);
                self.warnings.push(warning);
                continue;
            };

            match node {
                Ok(node) => {
                    children.insert(key, node);
                }
                Err(err) => self.skip(&child_path, &err),
            }
        }

        Ok(Node::Directory(children))
    }

    fn file_node(&mut self, path: &Path, metadata: &Metadata, depth: u32) -> io::Result<Node> {
        let size = metadata.len();

        let node = match self.mode {
            MetadataMode::Simple => {
                self.stats.record_file(size, 0, depth);
                Node::File(None)
            }
            MetadataMode::Full => {
                let contents = fs::read(path)?;
                let lines = count_lines(&contents);
                self.stats.record_file(size, lines, depth);
                Node::File(Some(FileMeta::new(
                    size,
                    file_type(path),
                    last_modified(metadata),
                    lines,
                )))
            }
        };

        Ok(node)
    }

    fn skip(&mut self, path: &Path, err: &io::Error) {
        let warning = ScanWarning::io(path, err);
        warn!(path = %path.display(), "skipping entry: {err}");
        self.warnings.push(warning);
    }
}

/// Number of `\n`-separated segments once decoded as text.
///
/// Invalid UTF-8 is replaced rather than rejected, so binary files still
/// get a count.
pub fn count_lines(contents: &[u8]) -> u64 {
    String::from_utf8_lossy(contents).split('\n').count() as u64
}

/// Lowercased extension without the dot, or [`UNKNOWN_TYPE`].
pub fn file_type(path: &Path) -> CompactString {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .map(CompactString::from)
        .unwrap_or_else(|| CompactString::from(UNKNOWN_TYPE))
}

fn last_modified(metadata: &Metadata) -> DateTime<Utc> {
    DateTime::<Utc>::from(metadata.modified().unwrap_or(UNIX_EPOCH))
}
