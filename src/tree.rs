//! ASCII rendering of the directory tree.

use crate::error::DumpError;
use crate::exclude::ExclusionSet;
use crate::walk::{SiblingOrder, WalkItem, Walker};
use std::path::{Path, PathBuf};

/// First line of every rendered tree.
pub const ROOT_MARKER: &str = "/ ";
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Renders the tree under `root`, one line per non-excluded entry.
///
/// Siblings are sorted directories first, then case-insensitively by name.
/// Excluded directories are pruned together with everything below them.
///
/// # Errors
///
/// Returns [`DumpError::InvalidRoot`] if `root` is not a directory, or
/// [`DumpError::Walk`] if a directory cannot be listed.
pub fn render_tree(root: &Path, exclusions: &ExclusionSet) -> Result<Vec<String>, DumpError> {
    render_tree_skipping(root, exclusions, None)
}

pub(crate) fn render_tree_skipping(
    root: &Path,
    exclusions: &ExclusionSet,
    skip: Option<PathBuf>,
) -> Result<Vec<String>, DumpError> {
    let entries = Walker::new(root, exclusions, SiblingOrder::DirsFirst, skip)?.collect_entries()?;
    Ok(build_tree_lines(&entries))
}

/// Turns a pre-order sequence of entries into tree lines.
fn build_tree_lines(entries: &[WalkItem]) -> Vec<String> {
    // An entry is the last of its siblings when no later entry sits at the
    // same depth before the walk climbs back above it.
    let mut is_last = vec![false; entries.len()];
    let mut seen: Vec<bool> = Vec::new();
    for (i, entry) in entries.iter().enumerate().rev() {
        if seen.len() <= entry.depth {
            seen.resize(entry.depth + 1, false);
        }
        is_last[i] = !seen[entry.depth];
        seen[entry.depth] = true;
        seen.truncate(entry.depth + 1);
    }

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(ROOT_MARKER.to_string());
    let mut indent: Vec<&str> = Vec::new();
    for (entry, last) in entries.iter().zip(is_last) {
        indent.truncate(entry.depth.saturating_sub(1));
        let connector = if last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{}{}{}", indent.concat(), connector, entry.name));
        indent.push(if last { BLANK } else { PIPE });
    }
    lines
}
