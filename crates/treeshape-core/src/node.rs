//! File and directory node types.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// File type recorded for files without an extension.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Children of a directory node, keyed by entry name.
pub type Children = IndexMap<CompactString, Node>;

/// Metadata captured for a single file at scan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    /// Size in bytes.
    pub size: u64,

    /// Lowercased extension without the leading dot, or [`UNKNOWN_TYPE`].
    #[serde(rename = "type")]
    pub file_type: CompactString,

    /// Last modification time.
    #[serde(with = "iso_millis")]
    pub last_modified: DateTime<Utc>,

    /// Number of `\n`-separated segments in the decoded contents.
    pub lines: u64,
}

impl FileMeta {
    /// Create new file metadata.
    pub fn new(
        size: u64,
        file_type: impl Into<CompactString>,
        last_modified: DateTime<Utc>,
        lines: u64,
    ) -> Self {
        Self {
            size,
            file_type: file_type.into(),
            last_modified,
            lines,
        }
    }
}

/// A single entry in a scanned tree.
///
/// Serializes untagged: a directory becomes a JSON object of its children,
/// a file becomes either its metadata object or `null` when metadata was
/// not collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Directory with its surviving children.
    Directory(Children),
    /// Regular file, with metadata in full mode and `None` in simple mode.
    File(Option<FileMeta>),
}

impl Node {
    /// Create an empty directory node.
    pub fn empty_dir() -> Self {
        Node::Directory(Children::new())
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, Node::File(_))
    }

    /// Get the children of a directory node.
    pub fn children(&self) -> Option<&Children> {
        match self {
            Node::Directory(children) => Some(children),
            Node::File(_) => None,
        }
    }

    /// Get the metadata of a file node, if it was collected.
    pub fn meta(&self) -> Option<&FileMeta> {
        match self {
            Node::File(meta) => meta.as_ref(),
            Node::Directory(_) => None,
        }
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().and_then(|children| children.get(name))
    }

    /// Follow a `/`-separated path of child names.
    pub fn descend(&self, path: &str) -> Option<&Node> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self, |node, part| node.child(part))
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::empty_dir()
    }
}

/// ISO-8601 UTC timestamps with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|time| time.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
