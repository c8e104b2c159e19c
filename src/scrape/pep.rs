//! The pep routine
//!
//! Audits the numerical PEP index: for every row, the declared status on
//! the PEP's own page is compared against the set of statuses implied by
//! the one-letter code in the index. Mismatches are collected as
//! warnings and excluded from the tally; every index row still counts
//! toward the final total.

use crate::client::Session;
use crate::config::Settings;
use crate::html::{next_element_sibling, select_all, select_all_in, select_one, select_one_in, text_of};
use crate::scrape::Row;
use crate::{Result, ScrapeError};
use indicatif::ProgressBar;
use url::Url;

const PEP_LINK_SELECTOR: &str = "a.pep.reference.internal";

/// One-letter status code from the numerical PEP index
///
/// The set of codes is closed; anything else in the index is a typed
/// error, never an unchecked lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Accepted,
    Deferred,
    Final,
    Provisional,
    Rejected,
    Superseded,
    Withdrawn,
    /// The index leaves the status letter out for draft and active PEPs
    Unmarked,
}

impl StatusCode {
    /// Parses the letter(s) following the PEP type character in an
    /// index `abbr` cell.
    pub fn parse(code: &str) -> Result<Self> {
        match code {
            "A" => Ok(StatusCode::Accepted),
            "D" => Ok(StatusCode::Deferred),
            "F" => Ok(StatusCode::Final),
            "P" => Ok(StatusCode::Provisional),
            "R" => Ok(StatusCode::Rejected),
            "S" => Ok(StatusCode::Superseded),
            "W" => Ok(StatusCode::Withdrawn),
            "" => Ok(StatusCode::Unmarked),
            other => Err(ScrapeError::UnknownStatusCode(other.to_string())),
        }
    }

    /// Full status strings considered consistent with this code
    pub fn expected(&self) -> &'static [&'static str] {
        match self {
            StatusCode::Accepted => &["Active", "Accepted"],
            StatusCode::Deferred => &["Deferred"],
            StatusCode::Final => &["Final"],
            StatusCode::Provisional => &["Provisional"],
            StatusCode::Rejected => &["Rejected"],
            StatusCode::Superseded => &["Superseded"],
            StatusCode::Withdrawn => &["Withdrawn"],
            StatusCode::Unmarked => &["Draft", "Active"],
        }
    }
}

/// A PEP whose declared status disagrees with its index code
#[derive(Debug)]
struct StatusMismatch {
    url: Url,
    real_status: String,
    expected: &'static [&'static str],
}

/// Scrapes the numerical PEP index and tallies declared statuses.
///
/// Returns a `(Status, Count)` header, one row per observed status in
/// first-seen order, and a trailing `Total` row counting every index
/// row including the mismatched ones.
pub async fn pep(session: &Session, settings: &Settings) -> Result<Vec<Row>> {
    let index_url = settings.peps_url.join("numerical")?;
    let index = session.get_html(&index_url).await?;

    let numerical = select_one(&index, "section#numerical-index")?;
    let tbody = select_one_in(numerical, "tbody")?;
    let pep_rows = select_all_in(tbody, "tr")?;
    let total = pep_rows.len();

    // (abbr status code, absolute detail URL) per index row
    let mut entries: Vec<(String, Url)> = Vec::with_capacity(total);
    for pep_row in pep_rows {
        let abbr = text_of(select_one_in(pep_row, "abbr")?);
        let link = select_one_in(pep_row, PEP_LINK_SELECTOR)?;
        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| ScrapeError::TagNotFound {
                selector: format!("{PEP_LINK_SELECTOR}[href]"),
            })?;
        entries.push((status_code_of(&abbr).to_string(), settings.peps_url.join(href)?));
    }

    let mut tally: Vec<(String, usize)> = Vec::new();
    let mut mismatches: Vec<StatusMismatch> = Vec::new();

    let progress = ProgressBar::new(total as u64);
    for (code, pep_url) in entries {
        let code = StatusCode::parse(&code)?;
        let page = session.get_html(&pep_url).await?;
        let real_status = declared_status(&page)?;

        if !code.expected().contains(&real_status.as_str()) {
            mismatches.push(StatusMismatch {
                url: pep_url,
                real_status,
                expected: code.expected(),
            });
            progress.inc(1);
            continue;
        }

        match tally.iter_mut().find(|(status, _)| *status == real_status) {
            Some((_, count)) => *count += 1,
            None => tally.push((real_status, 1)),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if !mismatches.is_empty() {
        let report: Vec<String> = mismatches
            .iter()
            .map(|m| {
                format!(
                    "URL: {}\nstatus on page: {}\nexpected statuses: {:?}",
                    m.url, m.real_status, m.expected
                )
            })
            .collect();
        tracing::warn!("mismatched statuses:\n{}", report.join("\n\n"));
    }

    let mut results: Vec<Row> = vec![header()];
    for (status, count) in tally {
        results.push(vec![status, count.to_string()]);
    }
    results.push(vec!["Total".to_string(), total.to_string()]);

    Ok(results)
}

/// Reads the status declared on a PEP's own page: the `dd` following the
/// `dt` labelled `Status` in the header field list.
fn declared_status(page: &scraper::Html) -> Result<String> {
    let status_dt = select_all(page, "dt")?
        .into_iter()
        .find(|dt| text_of(*dt) == "Status")
        .ok_or_else(|| ScrapeError::TagNotFound {
            selector: "dt (Status)".to_string(),
        })?;
    let dd = next_element_sibling(status_dt).ok_or_else(|| ScrapeError::TagNotFound {
        selector: "dt (Status) + dd".to_string(),
    })?;
    Ok(text_of(dd))
}

/// Drops the PEP type character, leaving the status letter(s). The
/// result is empty for single-character `abbr` cells.
fn status_code_of(abbr_text: &str) -> &str {
    let mut chars = abbr_text.chars();
    chars.next();
    chars.as_str()
}

fn header() -> Row {
    vec!["Status".to_string(), "Count".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_header_identity() {
        assert_eq!(header(), vec!["Status", "Count"]);
    }

    #[test]
    fn test_status_code_of_drops_type_character() {
        assert_eq!(status_code_of("PF"), "F");
        assert_eq!(status_code_of("P"), "");
        assert_eq!(status_code_of(""), "");
    }

    #[test]
    fn test_parse_known_codes() {
        assert_eq!(StatusCode::parse("A").unwrap(), StatusCode::Accepted);
        assert_eq!(StatusCode::parse("W").unwrap(), StatusCode::Withdrawn);
        assert_eq!(StatusCode::parse("").unwrap(), StatusCode::Unmarked);
    }

    #[test]
    fn test_parse_unknown_code_is_error() {
        assert!(matches!(
            StatusCode::parse("X"),
            Err(ScrapeError::UnknownStatusCode(code)) if code == "X"
        ));
    }

    #[test]
    fn test_expected_statuses() {
        assert_eq!(StatusCode::Accepted.expected(), &["Active", "Accepted"]);
        assert_eq!(StatusCode::Unmarked.expected(), &["Draft", "Active"]);
        assert_eq!(StatusCode::Final.expected(), &["Final"]);
    }

    #[test]
    fn test_declared_status_reads_dd_after_status_dt() {
        let page = Html::parse_document(
            r#"<html><body><dl class="rfc2822 field-list simple">
                <dt>Author</dt><dd>Someone</dd>
                <dt>Status</dt><dd>Active</dd>
            </dl></body></html>"#,
        );
        assert_eq!(declared_status(&page).unwrap(), "Active");
    }

    #[test]
    fn test_declared_status_missing_label_is_error() {
        let page = Html::parse_document(
            r#"<html><body><dl><dt>Author</dt><dd>Someone</dd></dl></body></html>"#,
        );
        assert!(matches!(
            declared_status(&page),
            Err(ScrapeError::TagNotFound { .. })
        ));
    }
}
