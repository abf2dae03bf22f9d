//! Robots.txt handling module
//!
//! This module fetches an origin's robots.txt once and turns it into an
//! [`ExclusionPolicy`]. Loading fails open: any problem yields a policy that
//! forbids nothing.

mod parser;

pub use parser::ExclusionPolicy;

use crate::LinkmapError;
use reqwest::Client;
use url::Url;

/// Returns the `/robots.txt` location for the origin of `url`
pub fn robots_url(url: &Url) -> Result<Url, LinkmapError> {
    Ok(url.join("/robots.txt")?)
}

/// Fetches and parses robots.txt, falling back to an empty policy on failure
///
/// Network errors, non-success statuses and unreadable bodies are logged and
/// degrade to [`ExclusionPolicy::allow_all`].
pub async fn load(client: &Client, robots_url: &Url) -> ExclusionPolicy {
    match fetch_robots(client, robots_url).await {
        Ok(content) => {
            let policy = ExclusionPolicy::from_content(&content);
            tracing::debug!(
                "Loaded {} disallow rules from {}",
                policy.disallowed().len(),
                robots_url
            );
            policy
        }
        Err(e) => {
            tracing::warn!("Could not load robots.txt [{}]: {}", robots_url, e);
            ExclusionPolicy::allow_all()
        }
    }
}

async fn fetch_robots(client: &Client, robots_url: &Url) -> Result<String, LinkmapError> {
    let response = client
        .get(robots_url.clone())
        .send()
        .await
        .map_err(|source| LinkmapError::Http {
            url: robots_url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LinkmapError::HttpStatus {
            url: robots_url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| LinkmapError::Http {
        url: robots_url.to_string(),
        source,
    })
}
