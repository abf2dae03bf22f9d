//! Page fetch pipeline
//!
//! Turns one URL into its set of followable outgoing links:
//!
//! 1. robots.txt exclusion (no request is sent, no edge is emitted)
//! 2. GET without redirect following
//! 3. `X-Robots-Tag: noindex` header
//! 4. `<meta name="robots|<bot>" content="noindex">`
//! 5. effective base URL (`<base href>` or the page itself)
//! 6. link filtering: mailto-style, non-web scheme, fragment, resolution,
//!    same origin, dedup
//! 7. edge emission
//!
//! Every failure degrades to an empty link set with a logged diagnostic.

use crate::crawler::fetcher::{fetch_page, FetchedPage};
use crate::crawler::parser::parse_html;
use crate::output::{Edge, EdgeSink};
use crate::robots::ExclusionPolicy;
use crate::url::{is_hypertext, is_mailto_style, resolve, same_origin, strip_fragment};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Fetches pages and filters their links for one crawl origin
pub struct PagePipeline {
    client: Client,
    policy: Arc<ExclusionPolicy>,
    bot_name: String,
    sink: Arc<dyn EdgeSink>,
}

impl PagePipeline {
    /// Creates a pipeline
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client, already carrying the user agent and timeouts
    /// * `policy` - The origin's robots.txt exclusion rules
    /// * `bot_name` - Token matched in `<meta name>` directives
    /// * `sink` - Where edges are emitted
    pub fn new(
        client: Client,
        policy: Arc<ExclusionPolicy>,
        bot_name: impl Into<String>,
        sink: Arc<dyn EdgeSink>,
    ) -> Self {
        Self {
            client,
            policy,
            bot_name: bot_name.into(),
            sink,
        }
    }

    /// The exclusion rules this pipeline applies
    pub fn policy(&self) -> &ExclusionPolicy {
        &self.policy
    }

    /// Processes one page and returns its outgoing same-origin links
    ///
    /// Never fails. Exactly one edge is emitted unless robots.txt forbids the
    /// page, in which case nothing is requested or emitted.
    pub async fn fetch(&self, url: &Url) -> Vec<Url> {
        if self.policy.forbids(url) {
            tracing::debug!("URL {} disallowed by robots.txt", url);
            return Vec::new();
        }

        let links = match fetch_page(&self.client, url).await {
            Ok(page) => self.links_from(url, page),
            Err(e) => {
                tracing::warn!("Could not retrieve data from URL [{}]: {}", url, e);
                Vec::new()
            }
        };

        self.sink.emit(&Edge::new(url.clone(), links.clone()));
        links
    }

    fn links_from(&self, url: &Url, page: FetchedPage) -> Vec<Url> {
        if page.is_noindex() {
            tracing::debug!("X-Robots-Tag noindex on {}", url);
            return Vec::new();
        }

        let body = match page {
            FetchedPage::Content { body, .. } => body,
            FetchedPage::Redirect {
                status_code,
                location,
                ..
            } => {
                tracing::debug!(
                    "Not following {} redirect from {} to {}",
                    status_code,
                    url,
                    location.as_deref().unwrap_or("<none>")
                );
                return Vec::new();
            }
        };

        let parsed = parse_html(&body, &self.bot_name);
        if parsed.noindex {
            tracing::debug!("Meta robots noindex on {}", url);
            return Vec::new();
        }

        let base = effective_base(url, parsed.base_href.as_deref());
        filter_links(url, &base, parsed.hrefs.iter().map(String::as_str))
    }
}

/// The URL relative links resolve against
///
/// A `<base href>` is itself resolved against the page; if that fails the page
/// URL is used.
pub fn effective_base(page: &Url, base_href: Option<&str>) -> Url {
    base_href
        .and_then(|href| resolve(href, Some(page)))
        .unwrap_or_else(|| page.clone())
}

/// Applies the link filters to raw `href` values
///
/// Cheap syntactic checks run before resolution. The origin test is against
/// `page`, not `base`. Output keeps first-seen order and holds no duplicates.
///
/// # Example
///
/// ```
/// use url::Url;
/// use linkmap::crawler::filter_links;
///
/// let page = Url::parse("https://x.com/").unwrap();
/// let links = filter_links(&page, &page, ["/a#top", "/a", "mailto:a@b", "https://y.com/"]);
/// assert_eq!(links, vec![Url::parse("https://x.com/a").unwrap()]);
/// ```
pub fn filter_links<'a>(
    page: &Url,
    base: &Url,
    hrefs: impl IntoIterator<Item = &'a str>,
) -> Vec<Url> {
    let mut seen = HashSet::new();

    hrefs
        .into_iter()
        .filter(|href| !is_mailto_style(href))
        .filter(|href| is_hypertext(href))
        .map(strip_fragment)
        .filter_map(|href| resolve(href, Some(base)))
        .filter(|link| same_origin(link, page))
        .filter(|link| seen.insert(link.clone()))
        .collect()
}
