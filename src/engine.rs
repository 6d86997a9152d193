use crate::error::DumpError;
use crate::exclude::ExclusionSet;
use crate::options::{DumpOptions, STDOUT_PATH};
use crate::output::{
    CONTENTS_HEADER, SECTION_SPACER, Sink, TREE_HEADER, file_header, read_error_message,
};
use crate::tree::render_tree_skipping;
use crate::types::DumpSummary;
use crate::walk::{SiblingOrder, Walker, check_root};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Loads the exclusion file named in `options` and merges the extra patterns.
pub fn load_exclusions(options: &DumpOptions) -> Result<ExclusionSet, DumpError> {
    let base = match &options.exclusion_file {
        Some(path) => ExclusionSet::from_file(path)?,
        None => ExclusionSet::default(),
    };
    base.with_patterns(options.extra_patterns.iter().cloned())
}

/// Whether `name` passes the suffix filter. `None` accepts every file.
pub fn matches_file_types(name: &str, file_types: Option<&[String]>) -> bool {
    match file_types {
        None => true,
        Some(types) => types.iter().any(|suffix| name.ends_with(suffix.as_str())),
    }
}

/// Runs a full scan described by `options`, writing the document to
/// `options.output` (or standard output for `-`).
pub fn scan_folder(options: &DumpOptions) -> Result<DumpSummary, DumpError> {
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Starting dump of {} into {}",
        options.root.display(),
        options.output.display()
    );
    check_root(&options.root)?;
    let exclusions = load_exclusions(options)?;
    let file_types = options.file_types.as_deref();

    if options.writes_to_stdout() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        return write_document(
            &options.root,
            file_types,
            &exclusions,
            &mut handle,
            Path::new(STDOUT_PATH),
            None,
        );
    }

    let file = File::create(&options.output).map_err(|e| DumpError::output(&options.output, e))?;
    // The output may live inside the scanned tree; never list or read it.
    let skip = fs::canonicalize(&options.output).ok();
    let mut writer = BufWriter::new(file);
    let summary = write_document(
        &options.root,
        file_types,
        &exclusions,
        &mut writer,
        &options.output,
        skip,
    )?;
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Wrote {} file sections ({} unreadable)",
        summary.files_written,
        summary.unreadable.len()
    );
    Ok(summary)
}

/// Writes the complete document (tree section, then file sections) to `out`.
///
/// File headers name paths relative to `root` with `/` separators and no
/// leading `./`, so a file at the top level is headed `File: a.py`.
pub fn write_dump<W: Write>(
    root: &Path,
    file_types: Option<&[String]>,
    exclusions: &ExclusionSet,
    out: &mut W,
) -> Result<DumpSummary, DumpError> {
    write_document(root, file_types, exclusions, out, Path::new("<writer>"), None)
}

fn write_document<W: Write>(
    root: &Path,
    file_types: Option<&[String]>,
    exclusions: &ExclusionSet,
    out: &mut W,
    label: &Path,
    skip: Option<PathBuf>,
) -> Result<DumpSummary, DumpError> {
    let tree = render_tree_skipping(root, exclusions, skip.clone())?;
    let mut sink = Sink::new(out, label);
    sink.write_str(TREE_HEADER)?;
    sink.write_str(&tree.join("\n"))?;
    sink.write_str(CONTENTS_HEADER)?;
    let mut summary = dump_into(root, file_types, exclusions, &mut sink, skip)?;
    sink.flush()?;
    summary.tree_entries = tree.len().saturating_sub(1);
    Ok(summary)
}

/// Writes one section per matching file under `root` to `out`.
///
/// Excluded directories are pruned and never descended into. A file that
/// cannot be read as UTF-8 text gets an inline error message instead of its
/// content and the walk carries on. Headers use the same relative form as
/// [`write_dump`].
///
/// # Errors
///
/// Fails on an invalid root, a directory that cannot be listed, or a write
/// error on `out`.
pub fn dump_contents<W: Write>(
    root: &Path,
    file_types: Option<&[String]>,
    exclusions: &ExclusionSet,
    out: &mut W,
) -> Result<DumpSummary, DumpError> {
    let mut sink = Sink::new(out, Path::new("<writer>"));
    let summary = dump_into(root, file_types, exclusions, &mut sink, None)?;
    sink.flush()?;
    Ok(summary)
}

fn dump_into<W: Write>(
    root: &Path,
    file_types: Option<&[String]>,
    exclusions: &ExclusionSet,
    sink: &mut Sink<'_, W>,
    skip: Option<PathBuf>,
) -> Result<DumpSummary, DumpError> {
    let mut summary = DumpSummary::default();
    for item in Walker::new(root, exclusions, SiblingOrder::FilesFirst, skip)?.into_iter() {
        let item = item?;
        if !item.is_file || !matches_file_types(&item.name, file_types) {
            continue;
        }
        sink.write_str(&file_header(&item.relative))?;
        match fs::read_to_string(&item.path) {
            Ok(content) => sink.write_str(&content)?,
            Err(e) => {
                #[cfg(feature = "logging")]
                tracing::warn!("Could not read {}: {}", item.path.display(), e);
                sink.write_str(&read_error_message(&e))?;
                summary.unreadable.push(item.relative);
            }
        }
        sink.write_str(SECTION_SPACER)?;
        summary.files_written += 1;
    }
    Ok(summary)
}
