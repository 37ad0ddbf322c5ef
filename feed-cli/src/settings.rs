use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use feed_client::DEFAULT_API_BASE_URL;
use feed_query::{QueryOptions, RetryPolicy};

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) api_base_url: String,
    pub(crate) log_level: String,
    pub(crate) http_connect_timeout_secs: u64,
    pub(crate) http_timeout_secs: u64,
    pub(crate) stale_time_secs: u64,
    pub(crate) gc_time_secs: u64,
    pub(crate) detail_retries: u32,
    pub(crate) sync_remote_updates: bool,
    pub(crate) default_user_id: i64,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base_url = lookup("FEED_API_BASE_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "warn".to_string());

        let http_connect_timeout_secs =
            parse_positive_u64(&lookup, "FEED_HTTP_CONNECT_TIMEOUT_SECS", 5)?;
        let http_timeout_secs = parse_positive_u64(&lookup, "FEED_HTTP_TIMEOUT_SECS", 15)?;
        let stale_time_secs = parse_env(&lookup, "FEED_STALE_TIME_SECS", 30u64)?;
        let gc_time_secs = parse_env(&lookup, "FEED_GC_TIME_SECS", 300u64)?;
        let detail_retries = parse_env(&lookup, "FEED_DETAIL_RETRIES", 2u32)?;
        let sync_remote_updates = parse_bool(&lookup, "FEED_SYNC_REMOTE_UPDATES", false)?;
        let default_user_id = parse_env(&lookup, "FEED_DEFAULT_USER_ID", 1i64)?;

        Ok(Self {
            api_base_url,
            log_level,
            http_connect_timeout_secs,
            http_timeout_secs,
            stale_time_secs,
            gc_time_secs,
            detail_retries,
            sync_remote_updates,
            default_user_id,
        })
    }

    pub(crate) fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.http_connect_timeout_secs)
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub(crate) fn query_options(&self) -> QueryOptions {
        QueryOptions {
            stale_time: Duration::from_secs(self.stale_time_secs),
            gc_time: Duration::from_secs(self.gc_time_secs),
            retry: RetryPolicy {
                max_retries: self.detail_retries,
                ..RetryPolicy::default()
            },
            sync_remote_updates: self.sync_remote_updates,
        }
    }
}

fn parse_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow!("Failed to parse {key}, got '{raw}'")),
        None => Ok(default),
    }
}

fn parse_positive_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64> {
    let value = parse_env(lookup, key, default)
        .with_context(|| format!("{key} must be a positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> Result<bool> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("Failed to parse {key}, expecting true/false")),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_are_used_when_env_is_empty() {
        let settings = settings_from(&[]).expect("defaults must be valid");
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.stale_time_secs, 30);
        assert_eq!(settings.gc_time_secs, 300);
        assert_eq!(settings.detail_retries, 2);
        assert!(!settings.sync_remote_updates);
        assert_eq!(settings.default_user_id, 1);
    }

    #[test]
    fn env_values_override_defaults() {
        let settings = settings_from(&[
            ("FEED_API_BASE_URL", " http://localhost:3000 "),
            ("RUST_LOG", "debug"),
            ("FEED_DETAIL_RETRIES", "0"),
            ("FEED_SYNC_REMOTE_UPDATES", "yes"),
        ])
        .expect("settings must parse");

        assert_eq!(settings.api_base_url, "http://localhost:3000");
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.query_options().retry.max_retries, 0);
        assert!(settings.query_options().sync_remote_updates);
    }

    #[test]
    fn log_level_prefers_log_level_over_rust_log() {
        let settings = settings_from(&[("LOG_LEVEL", "info"), ("RUST_LOG", "trace")])
            .expect("settings must parse");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = settings_from(&[("FEED_HTTP_TIMEOUT_SECS", "0")]).expect_err("must fail");
        assert!(err.to_string().contains("FEED_HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        assert!(settings_from(&[("FEED_STALE_TIME_SECS", "soon")]).is_err());
        assert!(settings_from(&[("FEED_SYNC_REMOTE_UPDATES", "maybe")]).is_err());
    }
}
