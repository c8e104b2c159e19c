//! The whats-new routine
//!
//! Walks the "What's New in Python" index, follows each article link and
//! extracts the article title plus the editor/author definition list.
//! A fetch failure on one article is recorded as a warning and the walk
//! continues with the remaining links.

use crate::client::Session;
use crate::config::Settings;
use crate::html::{select_all, select_one, text_of};
use crate::scrape::Row;
use crate::Result;
use indicatif::ProgressBar;
use url::Url;

const INDEX_SELECTOR: &str =
    "#what-s-new-in-python div.toctree-wrapper li.toctree-l1 > a";

/// A sub-page that could not be fetched
#[derive(Debug)]
struct FetchWarning {
    link: Url,
    error: String,
}

/// Scrapes the what's-new article listing.
///
/// Returns a header row followed by one row per successfully parsed
/// article: link, title, editor/author text.
pub async fn whats_new(session: &Session, settings: &Settings) -> Result<Vec<Row>> {
    let index_url = settings.docs_url.join("whatsnew/")?;
    let index = session.get_html(&index_url).await?;

    let links: Vec<Url> = select_all(&index, INDEX_SELECTOR)?
        .into_iter()
        .filter_map(|a| a.value().attr("href"))
        .map(|href| index_url.join(href))
        .collect::<std::result::Result<_, _>>()?;

    let mut results: Vec<Row> = vec![header()];
    let mut warnings: Vec<FetchWarning> = Vec::new();

    let progress = ProgressBar::new(links.len() as u64);
    for link in links {
        let page = match session.get_html(&link).await {
            Ok(page) => page,
            Err(error) if error.is_fetch_error() => {
                warnings.push(FetchWarning {
                    link,
                    error: error.to_string(),
                });
                progress.inc(1);
                continue;
            }
            Err(error) => return Err(error),
        };

        let title = text_of(select_one(&page, "h1")?);
        let authors = text_of(select_one(&page, "dl")?).replace('\n', " ");
        results.push(vec![link.to_string(), title, authors]);
        progress.inc(1);
    }
    progress.finish_and_clear();

    for warning in &warnings {
        tracing::warn!("failed to fetch {}: {}", warning.link, warning.error);
    }

    Ok(results)
}

fn header() -> Row {
    vec![
        "Link".to_string(),
        "Title".to_string(),
        "Editor, author".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_identity() {
        assert_eq!(header(), vec!["Link", "Title", "Editor, author"]);
    }
}
