//! Application context shared by the tool handlers

use crate::error::Result;
use crate::fetch::{FetchOptions, FetchedDocument, Fetcher};
use crate::locate::{LocateOptions, LocateReport, Locator};
use crate::store::{DocumentStore, StoreOptions};
use std::path::Path;

/// Everything a tool call needs, built once at startup
#[derive(Debug, Clone)]
pub struct AppContext {
    store: DocumentStore,
    locate: LocateOptions,
    fetch: FetchOptions,
}

impl AppContext {
    /// Build a context over `root` with default options
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        Ok(Self::with_store(DocumentStore::new(root)?))
    }

    /// Build a context over an existing store with default options
    pub fn with_store(store: DocumentStore) -> Self {
        AppContext {
            store,
            locate: LocateOptions::default(),
            fetch: FetchOptions::default(),
        }
    }

    /// Build a context from explicit options
    pub fn with_options<P: AsRef<Path>>(
        root: P,
        store: StoreOptions,
        locate: LocateOptions,
        fetch: FetchOptions,
    ) -> Result<Self> {
        Ok(AppContext {
            store: DocumentStore::with_options(root, store)?,
            locate,
            fetch,
        })
    }

    /// The document store
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Run the locator with the configured options
    pub fn locate(&self, keywords: &str) -> Result<LocateReport> {
        Locator::new(&self.store).locate(keywords, &self.locate)
    }

    /// Run the fetcher with the configured options
    pub fn fetch(&self, prompt_name: &str) -> Result<FetchedDocument> {
        Fetcher::new(&self.store).fetch(prompt_name, &self.fetch)
    }
}
