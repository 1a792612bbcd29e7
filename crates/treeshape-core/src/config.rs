//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Rules file consulted at the scan root when none is configured.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// How much information to record for each file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataMode {
    /// Size, type, modification time and line count.
    #[default]
    Full,
    /// Tree shape only; files carry no metadata.
    Simple,
}

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Per-file metadata mode.
    #[builder(default)]
    #[serde(default)]
    pub metadata: MetadataMode,

    /// Name of the rules file looked up at the scan root.
    #[builder(default = "DEFAULT_IGNORE_FILE.to_string()")]
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Additional patterns (gitignore syntax), applied after the rules file.
    #[builder(default)]
    #[serde(default)]
    pub extra_ignore_patterns: Vec<String>,

    /// Sort directory entries by name instead of keeping enumeration order.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub sort_entries: bool,
}

fn default_true() -> bool {
    true
}

fn default_ignore_file() -> String {
    DEFAULT_IGNORE_FILE.to_string()
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if let Some(ref name) = self.ignore_file {
            if name.is_empty() {
                return Err("Ignore file name cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a full-metadata config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            metadata: MetadataMode::Full,
            ignore_file: default_ignore_file(),
            extra_ignore_patterns: Vec::new(),
            sort_entries: true,
        }
    }

    /// Check whether file metadata is omitted.
    pub fn is_simple(&self) -> bool {
        self.metadata == MetadataMode::Simple
    }

    /// Hidden entries are skipped unconditionally.
    pub fn is_hidden(name: &str) -> bool {
        name.starts_with('.')
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
