//! Element lookup helpers
//!
//! Scraping code must not silently proceed past a missing selector, so
//! the lookup functions here return a typed [`ScrapeError::TagNotFound`]
//! carrying the selector when zero elements match. Multiple matches are
//! not an error; the first one in document order wins.

use crate::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

/// Returns the single element matching `css` in the document.
///
/// Zero matches is a [`ScrapeError::TagNotFound`]; with more than one
/// match the first is returned.
pub fn select_one<'a>(document: &'a Html, css: &str) -> Result<ElementRef<'a>> {
    select_one_in(document.root_element(), css)
}

/// Like [`select_one`], scoped to the descendants of `scope`.
pub fn select_one_in<'a>(scope: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>> {
    let selector = parse_selector(css)?;
    scope
        .select(&selector)
        .next()
        .ok_or_else(|| ScrapeError::TagNotFound {
            selector: css.to_string(),
        })
}

/// Returns every element matching `css` in document order. An empty
/// result is a data case here, not an error.
pub fn select_all<'a>(document: &'a Html, css: &str) -> Result<Vec<ElementRef<'a>>> {
    select_all_in(document.root_element(), css)
}

/// Like [`select_all`], scoped to the descendants of `scope`.
pub fn select_all_in<'a>(scope: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let selector = parse_selector(css)?;
    Ok(scope.select(&selector).collect())
}

/// Concatenated text content of an element, trimmed.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The next sibling that is an element, skipping text and comment nodes.
pub fn next_element_sibling<'a>(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::InvalidSelector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Html {
        Html::parse_document(
            r#"<html><body>
                <div class="box"><p>first</p><p>second</p></div>
                <span id="lone">  spaced text  </span>
                <dt>Status</dt>
                comment-free text node
                <dd>Active</dd>
            </body></html>"#,
        )
    }

    #[test]
    fn test_select_one_zero_matches_is_error() {
        let doc = document();
        let err = select_one(&doc, "table").unwrap_err();
        match err {
            ScrapeError::TagNotFound { selector } => assert_eq!(selector, "table"),
            other => panic!("expected TagNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_select_one_single_match() {
        let doc = document();
        let el = select_one(&doc, "span#lone").unwrap();
        assert_eq!(text_of(el), "spaced text");
    }

    #[test]
    fn test_select_one_multiple_matches_returns_first() {
        let doc = document();
        let el = select_one(&doc, "div.box p").unwrap();
        assert_eq!(text_of(el), "first");
    }

    #[test]
    fn test_select_all_collects_in_document_order() {
        let doc = document();
        let els = select_all(&doc, "p").unwrap();
        let texts: Vec<String> = els.into_iter().map(text_of).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_select_all_empty_is_ok() {
        let doc = document();
        assert!(select_all(&doc, "table").unwrap().is_empty());
    }

    #[test]
    fn test_scoped_lookup() {
        let doc = document();
        let div = select_one(&doc, "div.box").unwrap();
        assert!(select_one_in(div, "span").is_err());
        assert_eq!(text_of(select_one_in(div, "p").unwrap()), "first");
    }

    #[test]
    fn test_next_element_sibling_skips_text_nodes() {
        let doc = document();
        let dt = select_one(&doc, "dt").unwrap();
        let dd = next_element_sibling(dt).unwrap();
        assert_eq!(text_of(dd), "Active");
    }

    #[test]
    fn test_invalid_selector_is_typed_error() {
        let doc = document();
        assert!(matches!(
            select_one(&doc, "p[["),
            Err(ScrapeError::InvalidSelector { .. })
        ));
    }
}
