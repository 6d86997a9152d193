//! Internal pruned, sorted depth-first walk shared by the tree renderer and the dumper.

use crate::error::DumpError;
use crate::exclude::{ExclusionSet, normalize_relative};
use ignore::WalkBuilder;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// How siblings are ordered inside one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SiblingOrder {
    /// Directories before files. Used for the rendered tree.
    DirsFirst,
    /// Files before directories, so a directory's own files are emitted
    /// before anything below it.
    FilesFirst,
}

impl SiblingOrder {
    fn compare(self, a: &Path, b: &Path) -> Ordering {
        let (a_dir, b_dir) = (a.is_dir(), b.is_dir());
        let kind = match self {
            SiblingOrder::DirsFirst => b_dir.cmp(&a_dir),
            SiblingOrder::FilesFirst => a_dir.cmp(&b_dir),
        };
        kind.then_with(|| name_key(a).cmp(&name_key(b)))
            .then_with(|| a.file_name().cmp(&b.file_name()))
    }
}

fn name_key(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// One visited entry below the root.
#[derive(Debug, Clone)]
pub(crate) struct WalkItem {
    /// 1 for direct children of the root.
    pub depth: usize,
    pub path: PathBuf,
    /// `/`-separated path relative to the root.
    pub relative: String,
    pub name: String,
    /// Anything that is not a directory, dangling symlinks included.
    pub is_file: bool,
}

pub(crate) struct Walker {
    inner: ignore::Walk,
    root: PathBuf,
}

impl Walker {
    /// Prepares a walk of `root`. Excluded entries are pruned before they are
    /// descended into, and `skip` (a canonical path) is never yielded.
    pub(crate) fn new(
        root: &Path,
        exclusions: &ExclusionSet,
        order: SiblingOrder,
        skip: Option<PathBuf>,
    ) -> Result<Self, DumpError> {
        check_root(root)?;
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .max_depth(None)
            .sort_by_file_path(move |a, b| order.compare(a, b));
        let exclusions = exclusions.clone();
        let filter_root = root.to_path_buf();
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            if let Some(ref skip) = skip {
                if is_same_file(entry.path(), skip) {
                    return false;
                }
            }
            let relative = entry
                .path()
                .strip_prefix(&filter_root)
                .unwrap_or(entry.path());
            !exclusions.is_excluded(relative)
        });
        Ok(Self {
            inner: builder.build(),
            root: root.to_path_buf(),
        })
    }

    pub(crate) fn into_iter(self) -> impl Iterator<Item = Result<WalkItem, DumpError>> {
        let root = self.root;
        self.inner.filter_map(move |result| match result {
            Ok(entry) if entry.depth() == 0 => None,
            Ok(entry) => {
                let path = entry.path().to_path_buf();
                let relative = normalize_relative(path.strip_prefix(&root).unwrap_or(&path));
                let name = entry.file_name().to_string_lossy().into_owned();
                Some(Ok(WalkItem {
                    depth: entry.depth(),
                    is_file: !path.is_dir(),
                    path,
                    relative,
                    name,
                }))
            }
            Err(e) => Some(Err(DumpError::Walk(e.to_string()))),
        })
    }

    pub(crate) fn collect_entries(self) -> Result<Vec<WalkItem>, DumpError> {
        self.into_iter().collect()
    }
}

/// Fails with [`DumpError::InvalidRoot`] unless `root` is a readable directory.
pub(crate) fn check_root(root: &Path) -> Result<(), DumpError> {
    let metadata = fs::metadata(root).map_err(|e| DumpError::InvalidRoot {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !metadata.is_dir() {
        return Err(DumpError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    fs::read_dir(root).map_err(|e| DumpError::InvalidRoot {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(())
}

fn is_same_file(path: &Path, canonical: &Path) -> bool {
    if path.file_name() != canonical.file_name() {
        return false;
    }
    fs::canonicalize(path)
        .map(|p| p == canonical)
        .unwrap_or(false)
}
