//! Fetcher: return the first document whose name contains a fragment

use crate::error::{Error, Result};
use crate::store::{Document, DocumentStore};

/// Fetcher options
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Move on to the next name match when the first one cannot be read
    pub fallback_on_read_error: bool,
}

/// A document returned by the fetcher
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// The matched document
    pub document: Document,
    /// Full content as on disk
    pub content: String,
}

/// Case-insensitive substring test against a document's base name
pub fn name_matches(name: &str, fragment: &str) -> bool {
    name.to_lowercase().contains(&fragment.to_lowercase())
}

/// Looks up single documents by partial name
pub struct Fetcher<'a> {
    store: &'a DocumentStore,
}

impl<'a> Fetcher<'a> {
    /// Create a new fetcher
    pub fn new(store: &'a DocumentStore) -> Self {
        Fetcher { store }
    }

    /// Return the content of the first document whose name contains `fragment`
    ///
    /// Documents are visited in relative path order. Without fallback, a
    /// read failure on the first name match is returned as-is.
    pub fn fetch(&self, fragment: &str, options: &FetchOptions) -> Result<FetchedDocument> {
        let documents = self.store.documents()?;
        let mut last_error = None;

        for document in documents
            .into_iter()
            .filter(|d| name_matches(&d.name, fragment))
        {
            match document.read() {
                Ok(content) => {
                    tracing::info!("Prompt found: {}", document.relative_path);
                    return Ok(FetchedDocument { document, content });
                }
                Err(e) => {
                    tracing::warn!("Error reading {}: {}", document.path.display(), e);
                    if !options.fallback_on_read_error {
                        return Err(e);
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::NoMatch(fragment.to_string())))
    }
}
