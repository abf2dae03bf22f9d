//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching without redirect following
//! - HTML parsing for indexing directives and links
//! - The per-page link policy pipeline
//! - The shared frontier and quiescence detection
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod pipeline;

pub use coordinator::{CrawlStats, Crawler};
pub use fetcher::{build_http_client, fetch_page, has_noindex_header, FetchedPage};
pub use frontier::{CrawlFrontier, InFlightFetch, NextStep};
pub use parser::{parse_html, ParsedPage};
pub use pipeline::{effective_base, filter_links, PagePipeline};

use crate::config::Config;
use crate::output::StdoutSink;
use crate::LinkmapError;
use std::sync::Arc;
use url::Url;

/// Runs a complete crawl, writing edges to stdout
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Load the origin's robots.txt
/// 3. Fetch pages and follow same-origin links until quiescence
///
/// # Arguments
///
/// * `start_url` - The seed URL
/// * `config` - The crawler configuration
pub async fn crawl(start_url: Url, config: &Config) -> Result<CrawlStats, LinkmapError> {
    let crawler = Crawler::new(start_url, config, Arc::new(StdoutSink)).await?;
    crawler.crawl().await
}
