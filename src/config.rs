// src/config.rs
use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use log::{info, warn};
use std::env;
use std::time::Duration;

use crate::models::TimeRange;
use crate::services::api::DEFAULT_BASE_URL;

pub const DEFAULT_SYMBOL: &str = "AAPL";
pub const DEFAULT_RANGE_BUTTONS: [&str; 4] = ["1M", "3M", "1Y", "5Y"];

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub tz: Tz,
    pub default_symbol: String,
    pub default_range: TimeRange,
    pub range_buttons: Vec<String>,
    pub http_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            tz: Tz::UTC,
            default_symbol: DEFAULT_SYMBOL.to_string(),
            default_range: TimeRange::default(),
            range_buttons: DEFAULT_RANGE_BUTTONS.iter().map(|s| s.to_string()).collect(),
            http_timeout: None,
        }
    }
}

impl Config {
    /// Read settings from the process environment (call `dotenv().ok()` first
    /// to pick up a `.env` file).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        match lookup("STOCKS_API_BASE_URL") {
            Some(url) => config.base_url = url,
            None => warn!("STOCKS_API_BASE_URL not set, defaulting to {}", config.base_url),
        }

        if let Some(name) = lookup("DASHBOARD_TZ") {
            config.tz = name
                .parse::<Tz>()
                .map_err(|e| anyhow!("DASHBOARD_TZ '{}' is not a time zone: {}", name, e))?;
        }

        if let Some(symbol) = lookup("DEFAULT_SYMBOL") {
            config.default_symbol = symbol.trim().to_string();
        }

        if let Some(range) = lookup("DEFAULT_RANGE") {
            config.default_range = range
                .parse()
                .with_context(|| format!("DEFAULT_RANGE '{}' is not a known range", range))?;
        }

        if let Some(buttons) = lookup("RANGE_BUTTONS") {
            config.range_buttons = buttons
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(secs) = lookup("HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS must be a number, got '{}'", secs))?;
            config.http_timeout = Some(Duration::from_secs(secs));
        }

        info!(
            "Using API {} (tz {}, default {} {})",
            config.base_url, config.tz, config.default_symbol, config.default_range
        );
        Ok(config)
    }
}
