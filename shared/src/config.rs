use std::time::Duration;

pub const GUEST_API_BASE_URL: &str = "GUEST_API_BASE_URL";
pub const GUEST_BEARER_TOKEN: &str = "GUEST_BEARER_TOKEN";
pub const IMAGE_FETCH_TIMEOUT_SECS: &str = "IMAGE_FETCH_TIMEOUT_SECS";
pub const PROFILE_LOOKUP_TIMEOUT_SECS: &str = "PROFILE_LOOKUP_TIMEOUT_SECS";

const DEFAULT_GUEST_API_BASE_URL: &str = "https://api.x.com";
/// Bearer token shipped with the public web client; guest activation accepts it
/// without any account credentials.
const DEFAULT_GUEST_BEARER_TOKEN: &str = "AAAAAAAAAAAAAAAAAAAAANRILgAAAAAAnNwIzUejRCOuH5E6I8xnZz4puTs%3D1Zv7ttfk8LF81IUq16cHjhLTvJu4FA33AGWWjCpTnA";
const DEFAULT_IMAGE_FETCH_TIMEOUT_SECS: u64 = 20;

/// Runtime configuration, read once at cold start
#[derive(Debug, Clone)]
pub struct Config {
    pub guest_api_base_url: String,
    pub guest_bearer_token: String,
    pub image_fetch_timeout: Duration,
    /// `None` leaves the lookup bounded only by the transport's own defaults
    pub profile_lookup_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            guest_api_base_url: DEFAULT_GUEST_API_BASE_URL.to_string(),
            guest_bearer_token: DEFAULT_GUEST_BEARER_TOKEN.to_string(),
            image_fetch_timeout: Duration::from_secs(DEFAULT_IMAGE_FETCH_TIMEOUT_SECS),
            profile_lookup_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let guest_api_base_url =
            non_empty(GUEST_API_BASE_URL).unwrap_or(defaults.guest_api_base_url);
        let guest_bearer_token =
            non_empty(GUEST_BEARER_TOKEN).unwrap_or(defaults.guest_bearer_token);

        let image_fetch_timeout = non_empty(IMAGE_FETCH_TIMEOUT_SECS)
            .and_then(|v| parse_secs(IMAGE_FETCH_TIMEOUT_SECS, &v))
            .unwrap_or(defaults.image_fetch_timeout);
        let profile_lookup_timeout = non_empty(PROFILE_LOOKUP_TIMEOUT_SECS)
            .and_then(|v| parse_secs(PROFILE_LOOKUP_TIMEOUT_SECS, &v));

        Self {
            guest_api_base_url,
            guest_bearer_token,
            image_fetch_timeout,
            profile_lookup_timeout,
        }
    }
}

fn parse_secs(key: &str, value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            tracing::warn!("Ignoring invalid {} value: {:?}", key, value);
            None
        }
    }
}
