//! # Prompt Server
//!
//! Keyword search and name lookup over a directory of markdown prompts,
//! exposed to AI agents as MCP tools.
//!
//! Every call re-reads the directory; there is no index and no cache.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prompts::{AppContext, LocateOptions, Locator, DocumentStore};
//!
//! let store = DocumentStore::new(".github/prompts").unwrap();
//! let report = Locator::new(&store)
//!     .locate("deploy release", &LocateOptions::default())
//!     .unwrap();
//! for m in &report.matches {
//!     println!("{} ({})", m.name, m.score);
//! }
//!
//! let ctx = AppContext::new(".github/prompts").unwrap();
//! let doc = ctx.fetch("deploy").unwrap();
//! println!("{}", doc.content);
//! ```

pub mod context;
pub mod error;
pub mod fetch;
pub mod locate;
pub mod mcp;
pub mod scanner;
pub mod store;

// Re-exports for convenience
pub use context::AppContext;
pub use error::{Error, Result};
pub use fetch::{FetchOptions, FetchedDocument, Fetcher};
pub use locate::{LocateOptions, LocateReport, Locator, ScoredMatch, DEFAULT_LIMIT};
pub use store::{Document, DocumentStore, StoreOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default document root, relative to the working directory
pub fn default_prompts_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(".github").join("prompts")
}
