use crate::error::DumpError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
/// Output path that selects standard output instead of a file.
pub const STDOUT_PATH: &str = "-";
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpOptions {
    pub root: PathBuf,
    pub output: PathBuf,
    pub exclusion_file: Option<PathBuf>,
    pub file_types: Option<Vec<String>>,
    pub extra_patterns: Vec<String>,
}
impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from("OUTPUT.txt"),
            exclusion_file: Some(PathBuf::from(".gitignore")),
            file_types: None,
            extra_patterns: Vec::new(),
        }
    }
}
impl DumpOptions {
    /// Loads options from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DumpError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| DumpError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|e| DumpError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == STDOUT_PATH
    }
}
#[derive(Debug, Default)]
pub struct DumpBuilder {
    options: DumpOptions,
}
impl DumpBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: DumpOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn from_options(options: DumpOptions) -> Self {
        Self { options }
    }
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.root = root.into();
        self
    }
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output = path.into();
        self
    }
    pub fn exclusion_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.exclusion_file = Some(path.into());
        self
    }
    pub fn no_exclusion_file(mut self) -> Self {
        self.options.exclusion_file = None;
        self
    }
    /// Restricts the content dump to file names ending with one of `types`.
    pub fn file_types(mut self, types: Vec<String>) -> Self {
        self.options.file_types = Some(types);
        self
    }
    pub fn all_file_types(mut self) -> Self {
        self.options.file_types = None;
        self
    }
    pub fn extra_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.extra_patterns = patterns;
        self
    }
    pub fn build(self) -> DumpOptions {
        self.options
    }
}
