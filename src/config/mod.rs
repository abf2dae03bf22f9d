//! Configuration module for Linkmap
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so the crawler runs without one.
//!
//! # Example
//!
//! ```no_run
//! use linkmap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("linkmap.toml")).unwrap();
//! println!("User agent: {}", config.user_agent.header_value());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
