//! Load and validate `refurb.yaml`. Every key is optional; built-in defaults fill the rest.

use crate::locator::{Clock, DateFormat, FeedLocator, DEFAULT_PREFIX};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_NAME: &str = "refurb.yaml";
const DEFAULT_BASE: &str = "./";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Directory or URL prefix, including its trailing separator.
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub date_format: Option<DateFormat>,
    /// Falls back to the date format's own default zone.
    #[serde(default)]
    pub clock: Option<Clock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn date_format(&self) -> DateFormat {
        self.feed.date_format.unwrap_or(DateFormat::Compact)
    }

    pub fn clock(&self) -> Clock {
        self.feed
            .clock
            .unwrap_or_else(|| self.date_format().default_clock())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn locator(&self) -> FeedLocator {
        FeedLocator::new(
            self.feed.base.as_deref().unwrap_or(DEFAULT_BASE),
            self.feed.prefix.as_deref().unwrap_or(DEFAULT_PREFIX),
            self.date_format(),
        )
    }

    fn validate(&self) -> Result<()> {
        if self.feed.prefix.as_deref().is_some_and(str::is_empty) {
            anyhow::bail!("feed.prefix must not be empty");
        }
        if self.fetch.timeout_secs == Some(0) {
            anyhow::bail!("fetch.timeout_secs must be greater than 0");
        }
        Ok(())
    }
}

/// Parse and validate config text.
pub fn parse(s: &str) -> Result<Config> {
    // An empty document deserializes as unit, not as an empty map.
    if s.trim().is_empty() {
        return Ok(Config::default());
    }
    let c: Config = serde_yaml::from_str(s).context("parse refurb.yaml")?;
    c.validate()?;
    Ok(c)
}

/// Load config from `path`. A missing file yields the defaults; an unreadable or invalid one is an error.
pub fn load(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    parse(&s).with_context(|| format!("config: {}", path.display()))
}
