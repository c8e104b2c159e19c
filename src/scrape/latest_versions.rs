//! The latest-versions routine
//!
//! Reads the documentation sidebar for the list of all Python versions
//! and splits each link text into a version number and a status.

use crate::client::Session;
use crate::config::Settings;
use crate::html::{select_all_in, select_one, text_of};
use crate::scrape::Row;
use crate::{Result, ScrapeError};
use regex::Regex;
use std::sync::LazyLock;

/// Marker phrase identifying the versions list among the sidebar lists
const VERSIONS_MARKER: &str = "All versions";

static VERSION_STATUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)")
        .expect("version/status pattern must compile")
});

/// Scrapes the sidebar version listing.
///
/// The sidebar and the marker list are required; a missing marker list
/// aborts the routine with [`ScrapeError::VersionsListNotFound`].
pub async fn latest_versions(session: &Session, settings: &Settings) -> Result<Vec<Row>> {
    let page = session.get_html(&settings.docs_url).await?;

    let sidebar = select_one(&page, "div.sphinxsidebarwrapper")?;
    let versions_list = select_all_in(sidebar, "ul")?
        .into_iter()
        .find(|ul| text_of(*ul).contains(VERSIONS_MARKER))
        .ok_or(ScrapeError::VersionsListNotFound)?;

    let mut results: Vec<Row> = vec![header()];
    for a_tag in select_all_in(versions_list, "a")? {
        let link = a_tag.value().attr("href").unwrap_or_default().to_string();
        let (version, status) = split_version_text(&text_of(a_tag));
        results.push(vec![link, version, status]);
    }

    Ok(results)
}

/// Splits a link text such as `"Python 3.10 (stable)"` into version and
/// status. Text not matching the pattern becomes the version as-is with
/// an empty status; that is a data case, not an error.
fn split_version_text(text: &str) -> (String, String) {
    match VERSION_STATUS.captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}

fn header() -> Row {
    vec![
        "Link".to_string(),
        "Version".to_string(),
        "Status".to_string(),
    ]
}
