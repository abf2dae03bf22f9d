use serde::Deserialize;

/// Main configuration structure for Linkmap
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of page fetches in flight at once
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// TCP/TLS connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 16,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Bot-name token, also matched against `<meta name="...">` directives
    #[serde(rename = "bot-name")]
    pub bot_name: String,

    /// Version of the crawler
    #[serde(rename = "bot-version")]
    pub bot_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            bot_name: "ExampleBot".to_string(),
            bot_version: "0.0.1".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// The `User-Agent` header value: `BotName/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.bot_name, self.bot_version)
    }
}
