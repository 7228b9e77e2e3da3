//! Bookshow - terminal client for the Google Books catalog
//!
//! Live search with a debounced input, one catalog fetch per committed
//! query, and a paginated card grid over the normalized results.
//!
//! # Features
//!
//! - **Live Search**: keystrokes settle for 300 ms before one catalog query
//!   is issued for the trimmed term
//! - **Normalized Records**: every optional upstream field is substituted
//!   with a fixed sentinel so cards always render completely
//! - **Placeholder Fallback**: failed or empty fetches render a fixed-size
//!   placeholder grid instead of an error
//! - **Pagination**: 6 cards per page with previous/next/jump navigation
//! - **Export**: write the normalized working list as JSON
//!
//! # Example
//!
//! ```no_run
//! use bookshow::{CatalogClient, Pager};
//!
//! fn main() -> bookshow::Result<()> {
//!     let client = CatalogClient::new(None)?;
//!     let records = client.search("the rust programming language")?;
//!
//!     let pager = Pager::new(records.len());
//!     for book in pager.page_slice(&records) {
//!         println!("{} — {} ({})", book.title, book.authors, book.rating_display());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod logging;
pub mod pager;
pub mod state;
pub mod tui;

// Re-export main types
pub use catalog::{
    placeholder_image_uri, placeholder_list, BookRecord, CardRecord, CatalogClient, MAX_RESULTS,
};
pub use error::{BookshowError, Result};
pub use pager::{Pager, PAGE_SIZE};
pub use state::{Effect, FetchPhase, PageNav, Session, SessionEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Query issued at startup before the user has typed anything.
pub const DEFAULT_QUERY: &str = "best sellers";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Catalog API key; the request omits the `key` parameter when absent.
    pub api_key: Option<String>,
    /// Query the browse view issues on startup.
    pub initial_query: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            initial_query: DEFAULT_QUERY.to_string(),
        }
    }
}

impl AppConfig {
    /// Resolve the API key from an explicit flag or the environment.
    pub fn resolve_key(flag: Option<String>) -> Option<String> {
        flag.or_else(|| std::env::var("BOOKSHOW_API_KEY").ok())
            .filter(|k| !k.is_empty())
    }
}
