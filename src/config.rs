use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub data_dir: PathBuf,
    pub http_port: u16,
    /// Bound on every outbound call: question fetches and message edits.
    pub http_timeout: Duration,
    /// Polls untouched for this long are dropped from memory.
    pub poll_ttl: Duration,
    pub poll_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let data_dir = if data_dir.trim().is_empty() {
            PathBuf::from("./data")
        } else {
            PathBuf::from(data_dir.trim())
        };

        let http_port = parse_var("HTTP_PORT", 3000)?;
        let timeout_secs: u64 = parse_var("HTTP_TIMEOUT_SECS", 10)?;
        if timeout_secs == 0 {
            return Err(anyhow!("Invalid HTTP_TIMEOUT_SECS: must be at least 1"));
        }
        let ttl_hours: u64 = parse_var("POLL_TTL_HOURS", 48)?;
        let poll_capacity: usize = parse_var("POLL_CAPACITY", 10_000)?;
        let ttl_secs = ttl_hours
            .checked_mul(3600)
            .ok_or_else(|| anyhow!("Invalid POLL_TTL_HOURS: too large"))?;
        if poll_capacity == 0 {
            return Err(anyhow!("Invalid POLL_CAPACITY: must be at least 1"));
        }

        Ok(Config {
            telegram_bot_token: token,
            data_dir,
            http_port,
            http_timeout: Duration::from_secs(timeout_secs),
            poll_ttl: Duration::from_secs(ttl_secs),
            poll_capacity,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid {}", name)),
        _ => Ok(default),
    }
}
