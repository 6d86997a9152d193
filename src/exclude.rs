//! Exclusion matching for paths relative to the scan root.
//!
//! Patterns use `fnmatch` shell-glob syntax (`*`, `?`, `[seq]`, `[!seq]`) and
//! are matched against the whole relative path. `*` is allowed to cross `/`, so
//! `*.log` matches `logs/today.log` too. Paths are normalized to `/` separators
//! before matching, which keeps the result identical across platforms.
//!
//! Each pattern is rewritten into an equivalent `globset` glob before it is
//! compiled: braces, `^` and an unclosed `[` are plain characters in `fnmatch`,
//! and `**` is just two stars.

use crate::error::DumpError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path};

/// Path segments excluded regardless of the configured patterns.
pub const ALWAYS_EXCLUDED_SEGMENTS: &[&str] = &["node_modules"];

/// A deduplicated set of exclusion patterns together with their compiled form.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    patterns: BTreeSet<String>,
    globs: GlobSet,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self {
            patterns: BTreeSet::new(),
            globs: GlobSet::empty(),
        }
    }
}

impl ExclusionSet {
    /// Builds a set from raw patterns. Duplicates collapse.
    ///
    /// # Errors
    ///
    /// Fails only if the combined glob set cannot be built.
    pub fn new<I, S>(patterns: I) -> Result<Self, DumpError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::compile(patterns.into_iter().map(Into::into).collect())
    }

    /// Parses the line-delimited exclusion file format: one pattern per line,
    /// blank lines and `#` comments skipped, surrounding whitespace trimmed.
    pub fn parse(text: &str) -> Result<Self, DumpError> {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Loads patterns from `path`. A missing file yields an empty set.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DumpError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                let set = Self::parse(&text)?;
                #[cfg(feature = "logging")]
                tracing::debug!(
                    "Loaded {} exclusion patterns from {}",
                    set.len(),
                    path.display()
                );
                Ok(set)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                #[cfg(feature = "logging")]
                tracing::debug!("No exclusion file at {}", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(DumpError::io(path, e)),
        }
    }

    /// Returns a new set containing these patterns plus `extra`.
    pub fn with_patterns<I, S>(self, extra: I) -> Result<Self, DumpError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut patterns = self.patterns;
        patterns.extend(extra.into_iter().map(Into::into));
        Self::compile(patterns)
    }

    fn compile(patterns: BTreeSet<String>) -> Result<Self, DumpError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = GlobBuilder::new(&fnmatch_to_glob(pattern))
                .literal_separator(false)
                .backslash_escape(true)
                .build()
                .map_err(|e| {
                    DumpError::Walk(format!("Invalid glob pattern '{}': {}", pattern, e))
                })?;
            builder.add(glob);
        }
        let globs = builder
            .build()
            .map_err(|e| DumpError::Walk(format!("Failed to build glob set: {}", e)))?;
        Ok(Self { patterns, globs })
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether `relative` (a path relative to the scan root) is excluded.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.is_excluded_str(&normalize_relative(relative))
    }

    /// Same as [`ExclusionSet::is_excluded`] for an already `/`-separated path.
    pub fn is_excluded_str(&self, relative: &str) -> bool {
        if relative
            .split('/')
            .any(|segment| ALWAYS_EXCLUDED_SEGMENTS.contains(&segment))
        {
            return true;
        }
        self.globs.is_match(relative)
    }
}

/// Joins the normal components of `path` with `/`, dropping `.` and root prefixes.
pub fn normalize_relative(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => {
                if !out.is_empty() {
                    out.push('/');
                }
                out.push_str(&part.to_string_lossy());
            }
            Component::ParentDir => {
                if !out.is_empty() {
                    out.push('/');
                }
                out.push_str("..");
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out
}

/// Rewrites an `fnmatch` pattern as a `globset` glob (built with
/// `backslash_escape(true)`) that matches exactly the same strings.
fn fnmatch_to_glob(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;
    let mut after_star = false;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c == '*' {
            // Runs of stars collapse; `**` has no special meaning here.
            if !after_star {
                out.push('*');
            }
            after_star = true;
            continue;
        }
        after_star = false;
        match c {
            '?' => out.push('?'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push_str(&class_to_glob(&chars[i..end]));
                    i = end + 1;
                }
                None => out.push_str("\\["),
            },
            c => push_escaped(&mut out, c),
        }
    }
    out
}

/// Index of the `]` closing a class whose body starts at `start`. A `!` and
/// then a `]` at the head of the body belong to the body.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}

fn push_escaped(out: &mut String, c: char) {
    if matches!(c, '\\' | '*' | '?' | '[' | ']' | '{' | '}') {
        out.push('\\');
    }
    out.push(c);
}

/// Characters with a positional meaning inside a `globset` class.
const CLASS_SPECIALS: [char; 4] = [']', '-', '!', '^'];

fn class_to_glob(body: &[char]) -> String {
    let (negated, body) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };

    // Members as inclusive ranges. Reversed ranges match nothing.
    let mut members = Vec::new();
    let mut k = 0;
    while k < body.len() {
        if k + 2 < body.len() && body[k + 1] == '-' {
            if body[k] <= body[k + 2] {
                members.push((body[k], body[k + 2]));
            }
            k += 3;
        } else {
            members.push((body[k], body[k]));
            k += 1;
        }
    }
    if members.is_empty() {
        return if negated {
            "?".to_string()
        } else {
            // NUL never occurs in a path.
            '\0'.to_string()
        };
    }

    // Pull special characters out of range ends so each can be placed where
    // globset reads it literally. All of them are ASCII.
    let mut singles = BTreeSet::new();
    let mut ranges = Vec::new();
    for (mut lo, mut hi) in members {
        while lo <= hi && CLASS_SPECIALS.contains(&lo) {
            singles.insert(lo);
            lo = (lo as u8 + 1) as char;
        }
        while lo <= hi && CLASS_SPECIALS.contains(&hi) {
            singles.insert(hi);
            hi = (hi as u8 - 1) as char;
        }
        match lo.cmp(&hi) {
            std::cmp::Ordering::Less => ranges.push((lo, hi)),
            std::cmp::Ordering::Equal => {
                singles.insert(lo);
            }
            std::cmp::Ordering::Greater => {}
        }
    }

    let mut inner = String::new();
    if singles.contains(&']') {
        inner.push(']');
    }
    for (lo, hi) in ranges {
        inner.push(lo);
        inner.push('-');
        inner.push(hi);
    }
    for c in singles.iter().filter(|c| !CLASS_SPECIALS.contains(c)) {
        inner.push(*c);
    }
    let bangs: Vec<char> = ['!', '^']
        .into_iter()
        .filter(|c| singles.contains(c))
        .collect();
    let mut dash = singles.contains(&'-');
    if !negated && inner.is_empty() && !bangs.is_empty() {
        // A leading `!` or `^` would negate the class.
        if !dash {
            let alternatives: Vec<String> =
                bangs.iter().map(|c| format!("\\{}", c)).collect();
            return match alternatives.as_slice() {
                [one] => one.clone(),
                _ => format!("{{{}}}", alternatives.join(",")),
            };
        }
        inner.push('-');
        dash = false;
    }
    inner.extend(bangs);
    if dash {
        inner.push('-');
    }
    format!("[{}{}]", if negated { "!" } else { "" }, inner)
}
