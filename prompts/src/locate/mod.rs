//! Keyword locator: substring-count scoring and top-K selection

use crate::error::{Error, Result};
use crate::store::DocumentStore;
use std::path::PathBuf;

/// Number of matches returned by default
pub const DEFAULT_LIMIT: usize = 3;

/// Locator options
#[derive(Debug, Clone)]
pub struct LocateOptions {
    /// Maximum number of matches to return
    pub limit: usize,
}

impl Default for LocateOptions {
    fn default() -> Self {
        LocateOptions {
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A document with a non-zero score for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMatch {
    /// Base file name
    pub name: String,
    /// Path relative to the document root
    pub path: String,
    /// Summed occurrence count of all query tokens
    pub score: usize,
}

/// A document left out of scoring because it could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    /// Path on disk
    pub path: PathBuf,
    /// Why it could not be read
    pub reason: String,
}

/// Outcome of a single locate call
#[derive(Debug, Clone, Default)]
pub struct LocateReport {
    /// Top matches, best first
    pub matches: Vec<ScoredMatch>,
    /// Number of documents enumerated
    pub scanned: usize,
    /// Documents that failed to read
    pub skipped: Vec<SkippedDocument>,
}

/// Lowercase the query and split it on whitespace.
///
/// Repeated tokens are kept, so a word given twice counts twice.
pub fn tokenize(keywords: &str) -> Vec<String> {
    keywords
        .to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// Sum of non-overlapping occurrences of each token in the lowercased text
pub fn score(content: &str, tokens: &[String]) -> usize {
    if tokens.is_empty() {
        return 0;
    }
    let haystack = content.to_lowercase();
    tokens
        .iter()
        .map(|token| haystack.matches(token.as_str()).count())
        .sum()
}

/// Scores every document in a store against a keyword query
pub struct Locator<'a> {
    store: &'a DocumentStore,
}

impl<'a> Locator<'a> {
    /// Create a new locator
    pub fn new(store: &'a DocumentStore) -> Self {
        Locator { store }
    }

    /// Find the best-scoring documents for `keywords`
    ///
    /// Fails with [`Error::RootNotFound`] or [`Error::EmptyCorpus`]; an
    /// empty `matches` list means the corpus was searched and nothing scored.
    /// Ties are broken by name, then by relative path.
    pub fn locate(&self, keywords: &str, options: &LocateOptions) -> Result<LocateReport> {
        let documents = self.store.documents()?;
        if documents.is_empty() {
            return Err(Error::EmptyCorpus(self.store.root().to_path_buf()));
        }

        let tokens = tokenize(keywords);
        let mut report = LocateReport {
            scanned: documents.len(),
            ..Default::default()
        };

        for doc in &documents {
            let content = match doc.read() {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", doc.path.display(), e);
                    report.skipped.push(SkippedDocument {
                        path: doc.path.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let doc_score = score(&content, &tokens);
            if doc_score > 0 {
                report.matches.push(ScoredMatch {
                    name: doc.name.clone(),
                    path: doc.relative_path.clone(),
                    score: doc_score,
                });
            }
        }

        report.matches.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.path.cmp(&b.path))
        });
        report.matches.truncate(options.limit);

        Ok(report)
    }
}
