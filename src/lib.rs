//! # Treedump
//!
//! `treedump` walks a directory tree, renders it as an ASCII tree, and
//! concatenates the contents of matching files into a single text document.
//! Paths matched by shell-glob exclusion patterns (usually read from a
//! `.gitignore`-style file) are skipped in both parts, and any `node_modules`
//! directory is always skipped.
//!
//! # Features
//!
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use treedump::{DumpBuilder, scan_folder};
//!
//! let options = DumpBuilder::new(".")
//!     .output("OUTPUT.txt")
//!     .exclusion_file(".gitignore")
//!     .file_types(vec![".rs".into(), ".toml".into()])
//!     .build();
//!
//! let summary = scan_folder(&options).expect("Failed to dump directory");
//! println!("{} files dumped", summary.files_written);
//! ```

mod engine;
mod error;
mod exclude;
mod options;
pub mod output;
mod tree;
mod types;
mod walk;

pub use engine::{
    dump_contents, load_exclusions, matches_file_types, scan_folder, write_dump,
};
pub use error::DumpError;
pub use exclude::{ALWAYS_EXCLUDED_SEGMENTS, ExclusionSet, normalize_relative};
pub use options::{DumpBuilder, DumpOptions, STDOUT_PATH};
pub use tree::{ROOT_MARKER, render_tree};
pub use types::DumpSummary;
