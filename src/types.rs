use serde::{Deserialize, Serialize};

/// What a dump run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpSummary {
    /// Number of entries in the rendered tree, not counting the root marker.
    pub tree_entries: usize,
    /// Number of `File:` sections written.
    pub files_written: usize,
    /// Relative paths whose content was replaced by an error message.
    ///
    /// These files still have a section in the output.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unreadable: Vec<String>,
}
