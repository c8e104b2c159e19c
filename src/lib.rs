//! Docscrape: a scraper for the Python documentation site and the PEP index
//!
//! This crate implements four independent scraping routines (what's-new
//! articles, latest version listing, archive download, PEP status audit),
//! backed by a cached HTTP session and a typed element-lookup layer.

pub mod cache;
pub mod client;
pub mod config;
pub mod html;
pub mod output;
pub mod scrape;

use thiserror::Error;

/// Main error type for docscrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no element matched selector `{selector}`")]
    TagNotFound { selector: String },

    #[error("Python versions list not found in the sidebar")]
    VersionsListNotFound,

    #[error("unknown PEP status code `{0}` in the numerical index")]
    UnknownStatusCode(String),

    #[error("invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("cache error: {0}")]
    Cache(#[from] rusqlite::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// True for errors raised while fetching a single page (transport
    /// failure or non-success status). These are the only errors the
    /// whats-new routine tolerates per link; everything else is fatal.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ScrapeError::Http { .. } | ScrapeError::HttpStatus { .. }
        )
    }
}

/// Result type alias for docscrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

// Re-export commonly used types
pub use client::Session;
pub use config::Settings;
pub use output::OutputFormat;
pub use scrape::{Mode, Row};
