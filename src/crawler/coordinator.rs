//! Crawler coordinator - main crawl orchestration logic
//!
//! One coordinating loop owns dispatch decisions; page fetches run as spawned
//! tokio tasks bounded by a semaphore. The loop ends at quiescence: an empty
//! frontier with no fetch in flight.

use crate::config::Config;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::frontier::{CrawlFrontier, InFlightFetch, NextStep};
use crate::crawler::pipeline::PagePipeline;
use crate::output::EdgeSink;
use crate::robots::{self, ExclusionPolicy};
use crate::LinkmapError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use url::Url;

/// Summary of a finished crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages handed to the fetch pipeline (robots-forbidden pages included)
    pub pages_dispatched: usize,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

/// Crawls one origin from a starting URL
pub struct Crawler {
    start_url: Url,
    pipeline: Arc<PagePipeline>,
    max_concurrent_fetches: usize,
}

impl Crawler {
    /// Creates a crawler and loads the origin's robots.txt
    ///
    /// # Arguments
    ///
    /// * `start_url` - The seed URL; its origin bounds the crawl
    /// * `config` - The crawler configuration
    /// * `sink` - Where edges are emitted
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(LinkmapError)` - The HTTP client could not be built
    pub async fn new(
        start_url: Url,
        config: &Config,
        sink: Arc<dyn EdgeSink>,
    ) -> Result<Self, LinkmapError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;

        let robots_url = robots::robots_url(&start_url)?;
        tracing::debug!("Fetching robots.txt: {}", robots_url);
        let policy = robots::load(&client, &robots_url).await;

        Ok(Self::with_policy(start_url, config, client, policy, sink))
    }

    /// Creates a crawler with an already-loaded exclusion policy
    pub fn with_policy(
        start_url: Url,
        config: &Config,
        client: reqwest::Client,
        policy: ExclusionPolicy,
        sink: Arc<dyn EdgeSink>,
    ) -> Self {
        let pipeline = PagePipeline::new(
            client,
            Arc::new(policy),
            config.user_agent.bot_name.clone(),
            sink,
        );

        Self {
            start_url,
            pipeline: Arc::new(pipeline),
            max_concurrent_fetches: config.crawler.max_concurrent_fetches.max(1) as usize,
        }
    }

    /// The seed URL
    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    /// The exclusion rules loaded for this origin
    pub fn policy(&self) -> &ExclusionPolicy {
        self.pipeline.policy()
    }

    /// Runs the page pipeline on a single URL and returns its links
    pub async fn fetch_page(&self, url: &Url) -> Vec<Url> {
        self.pipeline.fetch(url).await
    }

    /// Runs the crawl to quiescence
    ///
    /// Each URL is fetched at most once. Per-page failures are logged and
    /// never stop the crawl; the only error is the worker pool closing.
    pub async fn crawl(&self) -> Result<CrawlStats, LinkmapError> {
        let start_time = Instant::now();
        let frontier = Arc::new(CrawlFrontier::new(self.start_url.clone()));
        let permits = Arc::new(Semaphore::new(self.max_concurrent_fetches));

        tracing::info!("Starting crawl at {}", self.start_url);

        loop {
            match frontier.next_step() {
                NextStep::Dispatch(url) => {
                    // The URL is already counted as outstanding, so waiting
                    // for a permit cannot be mistaken for quiescence
                    let permit = Arc::clone(&permits).acquire_owned().await?;
                    tracing::debug!("Dispatching {}", url);

                    let pipeline = Arc::clone(&self.pipeline);
                    let in_flight = InFlightFetch::new(Arc::clone(&frontier));
                    tokio::spawn(async move {
                        let links = pipeline.fetch(&url).await;
                        in_flight.finish(links);
                        drop(permit);
                    });
                }
                NextStep::Wait => frontier.changed().await,
                NextStep::Done => break,
            }
        }

        let stats = CrawlStats {
            pages_dispatched: frontier.visited_count(),
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            "Crawl completed: {} pages dispatched in {:?}",
            stats.pages_dispatched,
            stats.elapsed
        );

        Ok(stats)
    }
}
