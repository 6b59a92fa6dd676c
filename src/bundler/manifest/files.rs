//! `files` section of a source manifest.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-file manifest record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// MD5 hex digest of the file content
    pub checksum: String,
}

/// Bundle member name to [`FileEntry`], in insertion order.
///
/// Re-inserting a name replaces its entry in place, so a name never appears
/// twice and keeps its original position.
pub type ManifestFiles = IndexMap<String, FileEntry>;
