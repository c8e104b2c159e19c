//! The download routine
//!
//! Locates the PDF (A4) archive link on the download page and saves the
//! archive under the downloads directory, overwriting a previous copy.

use crate::client::Session;
use crate::config::Settings;
use crate::html::select_one;
use crate::{Result, ScrapeError};
use std::fs;

const ARCHIVE_SELECTOR: &str = r#"table.docutils a[href$="pdf-a4.zip"]"#;

/// Downloads the PDF documentation archive.
///
/// The local filename is the last path segment of the archive URL. The
/// downloads directory is created when missing.
pub async fn download(session: &Session, settings: &Settings) -> Result<()> {
    let downloads_url = settings.docs_url.join("download.html")?;
    let page = session.get_html(&downloads_url).await?;

    let archive_tag = select_one(&page, ARCHIVE_SELECTOR)?;
    let href = archive_tag
        .value()
        .attr("href")
        .ok_or_else(|| ScrapeError::TagNotFound {
            selector: format!("{ARCHIVE_SELECTOR}[href]"),
        })?;
    let archive_url = downloads_url.join(href)?;

    let filename = archive_url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("archive.zip")
        .to_string();

    let downloads_dir = settings.downloads_dir();
    fs::create_dir_all(&downloads_dir)?;
    let archive_path = downloads_dir.join(filename);

    let body = session.get_bytes(&archive_url).await?;
    fs::write(&archive_path, body)?;

    tracing::info!("archive saved to {}", archive_path.display());
    Ok(())
}
