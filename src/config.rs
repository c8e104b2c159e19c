//! Process-wide configuration
//!
//! All paths and site URLs the routines need live in a single [`Settings`]
//! value, built once at startup and passed by reference into each routine.
//! Nothing here is read from an ambient global.

use crate::Result;
use std::path::PathBuf;
use url::Url;

/// Root URL of the Python documentation site
pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";

/// Root URL of the PEP index site
pub const MAIN_PEP_URL: &str = "https://peps.python.org/";

/// Timestamp format used in CSV output filenames
pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

const DOWNLOADS_DIR: &str = "downloads";
const RESULTS_DIR: &str = "results";
const LOGS_DIR: &str = "logs";
const CACHE_FILE: &str = "cache.sqlite";

/// Process-wide configuration for a single scraper invocation
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory under which downloads, results, logs and the response
    /// cache are stored
    pub base_dir: PathBuf,

    /// Base URL of the documentation site
    pub docs_url: Url,

    /// Base URL of the PEP index site
    pub peps_url: Url,
}

impl Settings {
    /// Builds settings rooted at the current working directory, pointing
    /// at the live documentation and PEP sites.
    pub fn from_cwd() -> Result<Self> {
        Ok(Self::new(
            std::env::current_dir()?,
            Url::parse(MAIN_DOC_URL)?,
            Url::parse(MAIN_PEP_URL)?,
        ))
    }

    /// Builds settings with explicit roots. Tests point this at a
    /// scratch directory and a mock server.
    pub fn new(base_dir: PathBuf, docs_url: Url, peps_url: Url) -> Self {
        Self {
            base_dir,
            docs_url,
            peps_url,
        }
    }

    /// Destination directory for downloaded archives
    pub fn downloads_dir(&self) -> PathBuf {
        self.base_dir.join(DOWNLOADS_DIR)
    }

    /// Destination directory for CSV result files
    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join(RESULTS_DIR)
    }

    /// Directory for rotating log files
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join(LOGS_DIR)
    }

    /// Path of the SQLite response cache
    pub fn cache_path(&self) -> PathBuf {
        self.base_dir.join(CACHE_FILE)
    }
}
