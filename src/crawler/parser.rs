//! HTML parser for extracting indexing directives and links
//!
//! The `scraper` document is not `Send`, so parsing happens in one synchronous
//! call that returns an owned [`ParsedPage`] the async pipeline can hold
//! across await points.

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// True if a robots meta tag for this crawler says `noindex`
    pub noindex: bool,

    /// `href` of the first `<base href>` element, unresolved
    pub base_href: Option<String>,

    /// Raw `href` values of every anchor, in document order
    pub hrefs: Vec<String>,
}

/// Parses HTML content and extracts what the pipeline needs
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `bot_name` - The crawler's own token, honored in `<meta name>` alongside `robots`
///
/// # Example
///
/// ```
/// use linkmap::crawler::parse_html;
///
/// let html = r#"<html><head><base href="/docs/"></head><body><a href="intro">Intro</a></body></html>"#;
/// let parsed = parse_html(html, "ExampleBot");
/// assert_eq!(parsed.base_href.as_deref(), Some("/docs/"));
/// assert_eq!(parsed.hrefs, vec!["intro".to_string()]);
/// ```
pub fn parse_html(html: &str, bot_name: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        noindex: has_noindex_meta(&document, bot_name),
        base_href: extract_base_href(&document),
        hrefs: extract_hrefs(&document),
    }
}

/// Checks for `<meta name="robots|<bot>" content="noindex">`
fn has_noindex_meta(document: &Html, bot_name: &str) -> bool {
    let Ok(selector) = Selector::parse("meta[name][content]") else {
        return false;
    };

    document.select(&selector).any(|element| {
        let name = element.value().attr("name").unwrap_or_default();
        let content = element.value().attr("content").unwrap_or_default();
        (name.eq_ignore_ascii_case("robots") || name.eq_ignore_ascii_case(bot_name))
            && content.eq_ignore_ascii_case("noindex")
    })
}

fn extract_base_href(document: &Html) -> Option<String> {
    let selector = Selector::parse("base[href]").ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(str::to_string)
}

fn extract_hrefs(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
