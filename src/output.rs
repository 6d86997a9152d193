//! Layout of the dump document.
//!
//! The document is a tree section followed by one section per dumped file:
//!
//! ```text
//! Directory Structure:
//! -------------------
//! /
//! └── a.py
//!
//! File Contents:
//! --------------
//! File: a.py
//! --------------------------------------------------
//! x=1
//! ```

use crate::error::DumpError;
use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const TREE_HEADER: &str = "Directory Structure:\n-------------------\n";
pub const CONTENTS_HEADER: &str = "\n\nFile Contents:\n--------------\n";
/// Width of the dashed rule under each `File:` header.
pub const SECTION_RULE_WIDTH: usize = 50;
/// Written after each file's content.
pub const SECTION_SPACER: &str = "\n\n";

/// Header line and rule that open a file section.
pub fn file_header(relative: &str) -> String {
    format!("File: {}\n{}\n", relative, "-".repeat(SECTION_RULE_WIDTH))
}

/// Inline replacement for content that could not be read.
pub fn read_error_message(error: &dyn Display) -> String {
    format!("Error reading file: {}\n", error)
}

/// A writer that tags every failure with the output location.
pub(crate) struct Sink<'a, W: Write> {
    inner: &'a mut W,
    label: PathBuf,
}

impl<'a, W: Write> Sink<'a, W> {
    pub(crate) fn new(inner: &'a mut W, label: &Path) -> Self {
        Self {
            inner,
            label: label.to_path_buf(),
        }
    }

    pub(crate) fn write_str(&mut self, text: &str) -> Result<(), DumpError> {
        self.inner
            .write_all(text.as_bytes())
            .map_err(|e| DumpError::output(&self.label, e))
    }

    pub(crate) fn flush(&mut self) -> Result<(), DumpError> {
        self.inner
            .flush()
            .map_err(|e| DumpError::output(&self.label, e))
    }
}
