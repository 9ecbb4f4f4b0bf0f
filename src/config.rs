//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a [`ScryfallClient`](crate::ScryfallClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScryfallConfig {
    /// Base URL for the API (default: `https://api.scryfall.com`).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Retry policy applied to every request.
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_api_url() -> String {
    "https://api.scryfall.com".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ScryfallConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: default_timeout(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Retry policy for failed requests.
///
/// The pause between attempts is a fixed delay rather than an exponential
/// ramp, so the total time a fully failing request can take is always
/// `attempts * delay` plus transport overhead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempt budget per logical request.
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Fixed pause after each failed attempt, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Treat every attempt as a retryable failure regardless of the
    /// transport outcome. Lets backoff timing be exercised against a
    /// healthy endpoint.
    #[serde(default)]
    pub forced: bool,
}

fn default_attempts() -> u32 {
    1
}

fn default_delay_ms() -> u64 {
    1000
}

impl RetryPolicy {
    /// Create a policy with the given attempt budget and fixed delay.
    #[must_use]
    pub const fn new(attempts: u32, delay_ms: u64) -> Self {
        Self {
            attempts,
            delay_ms,
            forced: false,
        }
    }

    /// The fixed backoff delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            delay_ms: default_delay_ms(),
            forced: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ScryfallConfig::default();
        assert_eq!(config.api_url, "https://api.scryfall.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry.attempts, 1);
        assert!(!config.retry.forced);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ScryfallConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.api_url, "https://api.scryfall.com");
        assert_eq!(config.retry.delay_ms, 1000);
    }

    #[test]
    fn retry_policy_delay() {
        let policy = RetryPolicy::new(3, 250);
        assert_eq!(policy.delay(), Duration::from_millis(250));
    }
}
