//! Read-only document store over a directory of prompt files
//!
//! Nothing is cached: every call to [`DocumentStore::documents`] walks the
//! root again, and document content is read on demand.

use crate::error::{Error, Result};
use crate::scanner::{ScanResult, Scanner, DEFAULT_PATTERN};
use std::path::{Path, PathBuf};

/// Options controlling which files the store exposes
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Include glob patterns
    pub patterns: Vec<String>,
    /// Exclude glob patterns
    pub exclude: Vec<String>,
    /// Refuse to read documents larger than this many bytes
    pub max_file_bytes: Option<u64>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            patterns: vec![DEFAULT_PATTERN.to_string()],
            exclude: Vec::new(),
            max_file_bytes: None,
        }
    }
}

/// A prompt document identified by its path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Base file name
    pub name: String,
    /// Path on disk
    pub path: PathBuf,
    /// Path relative to the store root
    pub relative_path: String,
    /// Size in bytes at scan time, checked against the size limit
    pub size: u64,
    max_bytes: Option<u64>,
}

impl Document {
    fn from_scan(scan: ScanResult, max_bytes: Option<u64>) -> Self {
        let name = scan
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| scan.relative_path.clone());

        Document {
            name,
            path: scan.path,
            relative_path: scan.relative_path,
            size: scan.size,
            max_bytes,
        }
    }

    /// Read the full document as UTF-8 text
    pub fn read(&self) -> Result<String> {
        if let Some(limit) = self.max_bytes {
            if self.size > limit {
                return Err(Error::document_read(
                    &self.path,
                    format!("{} bytes exceeds size limit of {} bytes", self.size, limit),
                ));
            }
        }

        std::fs::read_to_string(&self.path).map_err(|e| Error::document_read(&self.path, e))
    }
}

/// Directory-backed store of prompt documents
#[derive(Debug, Clone)]
pub struct DocumentStore {
    scanner: Scanner,
    max_file_bytes: Option<u64>,
}

impl DocumentStore {
    /// Open a store rooted at `root` with default options
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::with_options(root, StoreOptions::default())
    }

    /// Open a store rooted at `root`
    ///
    /// The root is not required to exist yet; its absence is reported by
    /// each call to [`DocumentStore::documents`].
    pub fn with_options<P: AsRef<Path>>(root: P, options: StoreOptions) -> Result<Self> {
        let patterns: Vec<&str> = options.patterns.iter().map(String::as_str).collect();
        let exclude: Vec<&str> = options.exclude.iter().map(String::as_str).collect();
        let scanner = Scanner::new(root, &patterns, &exclude)?;

        Ok(DocumentStore {
            scanner,
            max_file_bytes: options.max_file_bytes,
        })
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        self.scanner.root()
    }

    /// Enumerate all documents in deterministic (relative path) order
    pub fn documents(&self) -> Result<Vec<Document>> {
        let root = self.root();
        if !root.is_dir() {
            return Err(Error::RootNotFound(root.to_path_buf()));
        }

        Ok(self
            .scanner
            .scan()
            .into_iter()
            .map(|scan| Document::from_scan(scan, self.max_file_bytes))
            .collect())
    }
}
