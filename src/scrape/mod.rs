//! Scraping routines
//!
//! Each routine takes the cached HTTP session and the process settings
//! and returns a table of rows (header row first), except `download`,
//! which writes the fetched archive to disk and produces no table.

mod download;
mod latest_versions;
mod pep;
mod whats_new;

pub use download::download;
pub use latest_versions::latest_versions;
pub use pep::{pep, StatusCode};
pub use whats_new::whats_new;

use crate::client::Session;
use crate::config::Settings;
use crate::Result;
use clap::ValueEnum;

/// One result row; the first row of a routine result is its header.
pub type Row = Vec<String>;

/// The scraping routine selected for a single invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Titles and editors of the "what's new" articles
    WhatsNew,
    /// Python versions and their statuses from the sidebar
    LatestVersions,
    /// Download the PDF documentation archive
    Download,
    /// Audit PEP statuses against the numerical index
    Pep,
}

impl Mode {
    /// Kebab-case name, used for CSV output filenames
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

/// Runs the selected routine.
///
/// Returns `Some(rows)` for the tabular routines and `None` for
/// `download`, which needs no further output step.
pub async fn run(
    mode: Mode,
    session: &Session,
    settings: &Settings,
) -> Result<Option<Vec<Row>>> {
    match mode {
        Mode::WhatsNew => Ok(Some(whats_new(session, settings).await?)),
        Mode::LatestVersions => Ok(Some(latest_versions(session, settings).await?)),
        Mode::Download => {
            download(session, settings).await?;
            Ok(None)
        }
        Mode::Pep => Ok(Some(pep(session, settings).await?)),
    }
}
