use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::ConfigError;

/// Upper bound on `max-concurrent-fetches`
const MAX_CONCURRENT_FETCHES: u32 = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > MAX_CONCURRENT_FETCHES
    {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-fetches must be between 1 and {}, got {}",
            MAX_CONCURRENT_FETCHES, config.max_concurrent_fetches
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // The bot name doubles as a meta-tag token, so keep it to a plain word
    if config.bot_name.is_empty() {
        return Err(ConfigError::Validation(
            "bot-name cannot be empty".to_string(),
        ));
    }

    if !config
        .bot_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "bot-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.bot_name
        )));
    }

    if config.bot_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "bot-version cannot be empty".to_string(),
        ));
    }

    if config.bot_version.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "bot-version cannot contain whitespace, got '{}'",
            config.bot_version
        )));
    }

    Ok(())
}
