//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the crawler's user agent and timeouts
//! - The single GET issued for each page (redirects are never followed)
//! - Classifying the response into page content, redirect or error

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::LinkmapError;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Header carrying page-level indexing directives
pub const X_ROBOTS_TAG: &str = "x-robots-tag";

/// A successful page response
#[derive(Debug)]
pub enum FetchedPage {
    /// A 2xx response with a parseable body
    Content {
        /// HTTP status code
        status_code: u16,
        /// True if `X-Robots-Tag: noindex` was present
        noindex: bool,
        /// Page body
        body: String,
    },

    /// A 3xx response; the `Location` is not followed
    Redirect {
        /// HTTP status code
        status_code: u16,
        /// True if `X-Robots-Tag: noindex` was present
        noindex: bool,
        /// Target of the redirect, if any
        location: Option<String>,
    },
}

impl FetchedPage {
    /// Whether the response carried an `X-Robots-Tag: noindex` header
    pub fn is_noindex(&self) -> bool {
        match self {
            Self::Content { noindex, .. } | Self::Redirect { noindex, .. } => *noindex,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Timeouts for each request
///
/// # Example
///
/// ```no_run
/// use linkmap::config::Config;
/// use linkmap::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.user_agent, &config.crawler).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page with a single GET
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Connection failure, timeout, unreadable body | `LinkmapError::Http` |
/// | Status outside 200..=399 | `LinkmapError::HttpStatus` |
/// | Content-Type neither `text/*` nor XML | `LinkmapError::UnsupportedContentType` |
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, LinkmapError> {
    let response = client
        .get(url.clone())
        .header(ACCEPT, "text/html")
        .send()
        .await
        .map_err(|source| LinkmapError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    let noindex = has_noindex_header(response.headers());

    if status.is_redirection() {
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        return Ok(FetchedPage::Redirect {
            status_code: status.as_u16(),
            noindex,
            location,
        });
    }

    if !status.is_success() {
        return Err(LinkmapError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if let Some(content_type) = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        if !is_parseable_content_type(content_type) {
            return Err(LinkmapError::UnsupportedContentType {
                url: url.to_string(),
                content_type: content_type.to_string(),
            });
        }
    }

    let body = response.text().await.map_err(|source| LinkmapError::Http {
        url: url.to_string(),
        source,
    })?;

    Ok(FetchedPage::Content {
        status_code: status.as_u16(),
        noindex,
        body,
    })
}

/// Returns true if any `X-Robots-Tag` header equals `noindex`, ignoring case
pub fn has_noindex_header(headers: &HeaderMap) -> bool {
    headers
        .get_all(X_ROBOTS_TAG)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.trim().eq_ignore_ascii_case("noindex"))
}

/// Text and XML bodies can be parsed as documents; anything else cannot
fn is_parseable_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.is_empty()
        || mime.starts_with("text/")
        || mime == "application/xml"
        || (mime.starts_with("application/") && mime.ends_with("+xml"))
}
