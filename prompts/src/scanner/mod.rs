//! Directory walker that enumerates prompt documents

use crate::error::Result;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default include pattern: every markdown file under the root
pub const DEFAULT_PATTERN: &str = "**/*.md";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A file discovered under the scan root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Path to the file (root joined with the relative path)
    pub path: PathBuf,
    /// Path relative to the root, always `/`-separated
    pub relative_path: String,
    /// File size in bytes
    pub size: u64,
}

/// Walks a root directory and yields files matching include patterns
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    patterns: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new<P: AsRef<Path>>(root: P, patterns: &[&str], exclude: &[&str]) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let exclude = exclude
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Scanner { root, patterns, exclude })
    }

    /// Root directory being scanned
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan for all matching files, ordered by relative path
    ///
    /// Entries that cannot be visited (permission denied on a
    /// subdirectory, broken symlink) are logged and left out.
    pub fn scan(&self) -> Vec<ScanResult> {
        let mut results: Vec<ScanResult> = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e.path()))
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", self.root.display(), err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let relative_path = self.relative(e.path())?;
                if !self.matches(&relative_path, e.path()) {
                    return None;
                }
                let size = e.metadata().map(|m| m.len()).unwrap_or(0);

                Some(ScanResult {
                    path: e.path().to_path_buf(),
                    relative_path,
                    size,
                })
            })
            .collect();

        results.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        results
    }

    fn relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        Some(relative.to_string_lossy().replace('\\', "/"))
    }

    /// Check if a file matches any include pattern
    fn matches(&self, relative: &str, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return true;
        }

        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        self.patterns.iter().any(|p| {
            // "**/x" also has to match files sitting directly in the root
            if let Some(suffix) = p.as_str().strip_prefix("**/") {
                if let Ok(suffix_pattern) = Pattern::new(suffix) {
                    if suffix_pattern.matches_with(filename, MATCH_OPTIONS) {
                        return true;
                    }
                }
            }

            p.matches_with(relative, MATCH_OPTIONS)
        })
    }

    /// Check if a path falls under an exclude pattern
    fn is_excluded(&self, path: &Path) -> bool {
        if path == self.root {
            return false;
        }

        match self.relative(path) {
            Some(relative) => self
                .exclude
                .iter()
                .any(|p| p.matches_with(&relative, MATCH_OPTIONS)),
            None => false,
        }
    }
}
