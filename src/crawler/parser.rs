//! HTML parser for extracting anchor targets
//!
//! Every `<a>` element yields one entry: its `href` verbatim, or `None` when
//! the attribute is missing. Relative paths are not resolved against the
//! page URL; they reach the filter and the fetcher exactly as written.

use scraper::{Html, Selector};

/// Extracts all anchor targets from an HTML document
///
/// # Example
///
/// ```
/// use depth_spider::crawler::extract_links;
///
/// let html = r#"<a href="/about">About</a><a name="top"></a>"#;
/// let links = extract_links(html);
/// assert_eq!(links, vec![Some("/about".to_string()), None]);
/// ```
pub fn extract_links(html: &str) -> Vec<Option<String>> {
    let document = Html::parse_document(html);

    let anchor_selector = match Selector::parse("a") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&anchor_selector)
        .map(|element| element.value().attr("href").map(str::to_string))
        .collect()
}

/// Extracts anchor targets from raw response bytes, decoding lossily
pub fn extract_links_from_bytes(body: &[u8]) -> Vec<Option<String>> {
    extract_links(&String::from_utf8_lossy(body))
}
