//! HTML href extraction
//!
//! The crawler only needs the raw `href` values of anchor tags, in document
//! order. Resolution against the page URL happens in the canonicalizer.

use scraper::{Html, Selector};

/// Extracts the raw `href` attribute of every `<a>` tag, in document order
///
/// Values are returned untouched (no trimming or resolution), and repeated
/// links are kept so that multiplicities survive.
///
/// # Example
///
/// ```
/// use linkrank::crawler::extract_hrefs;
///
/// let html = r#"<html><body><a href="/a">A</a><a href="/a">A again</a></body></html>"#;
/// assert_eq!(extract_hrefs(html), vec!["/a", "/a"]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
