//! Storefront configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::StoreInfo;
use crate::checkout::{BackoffStrategy, RetryPolicy, SubmitPolicy};

/// Top-level storefront settings. Every field has a default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Store details override; the built-in SuperMas details otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreInfo>,

    /// JSON catalog to load at startup; the built-in menu otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Checkout settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

/// Checkout timing settings, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Upper bound on one submission attempt.
    #[serde(default = "default_submit_timeout_ms")]
    pub submit_timeout_ms: u64,

    /// Retries after a timeout or network failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff; doubles per retry.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// How long the confirmation message stays up.
    #[serde(default = "default_confirmation_display_ms")]
    pub confirmation_display_ms: u64,

    /// Latency of the simulated order submitter.
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
}

fn default_submit_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    250
}

fn default_confirmation_display_ms() -> u64 {
    2_500
}

fn default_simulated_latency_ms() -> u64 {
    2_500
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            submit_timeout_ms: default_submit_timeout_ms(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
            confirmation_display_ms: default_confirmation_display_ms(),
            simulated_latency_ms: default_simulated_latency_ms(),
        }
    }
}

impl CheckoutConfig {
    /// Build the submission policy these settings describe.
    pub fn submit_policy(&self) -> SubmitPolicy {
        let backoff = if self.backoff_ms == 0 {
            BackoffStrategy::None
        } else {
            let base = Duration::from_millis(self.backoff_ms);
            BackoffStrategy::Exponential {
                base,
                max: base.saturating_mul(8),
            }
        };
        SubmitPolicy::new(
            Duration::from_millis(self.submit_timeout_ms),
            RetryPolicy::new(self.max_retries).with_backoff(backoff),
        )
    }

    pub fn confirmation_display(&self) -> Duration {
        Duration::from_millis(self.confirmation_display_ms)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: StorefrontConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.checkout.submit_timeout_ms, 10_000);
        assert!(config.store.is_none());
    }

    #[test]
    fn test_partial_checkout_section() {
        let config: StorefrontConfig =
            serde_json::from_str(r#"{"checkout": {"max_retries": 0, "backoff_ms": 0}}"#).unwrap();
        let policy = config.checkout.submit_policy();
        assert_eq!(policy.retry.max_retries, 0);
        assert_eq!(policy.retry.backoff, BackoffStrategy::None);
        assert_eq!(policy.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_submit_policy_backoff() {
        let policy = CheckoutConfig::default().submit_policy();
        assert_eq!(
            policy.retry.backoff,
            BackoffStrategy::Exponential {
                base: Duration::from_millis(250),
                max: Duration::from_millis(2000),
            }
        );
    }
}
