//! Order submission: the collaborator trait, timeouts and retries.

use std::time::Duration;

use async_trait::async_trait;

use crate::checkout::{Order, OrderReceipt};
use crate::error::SubmissionError;

/// Places an order somewhere real (kitchen printer, payment gateway, API).
///
/// Implementations must only return `Ok` once the order is durably accepted;
/// the storefront clears the cart on `Ok` and never otherwise.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit(&self, order: &Order) -> Result<OrderReceipt, SubmissionError>;
}

/// Acknowledges every order after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    latency: Duration,
}

impl SimulatedSubmitter {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(2500))
    }
}

#[async_trait]
impl OrderSubmitter for SimulatedSubmitter {
    async fn submit(&self, order: &Order) -> Result<OrderReceipt, SubmissionError> {
        tokio::time::sleep(self.latency).await;
        tracing::debug!(order_id = %order.id, "simulated order acknowledged");
        Ok(OrderReceipt::for_order(order))
    }
}

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Exponential backoff with base and max.
    Exponential {
        /// Initial delay.
        base: Duration,
        /// Maximum delay.
        max: Duration,
    },
}

impl BackoffStrategy {
    /// Calculate delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { base, max } => {
                let multiplier = 2u32.saturating_pow(attempt);
                std::cmp::min(base.saturating_mul(multiplier), *max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(250),
            max: Duration::from_secs(2),
        }
    }
}

/// How many times a retryable failure is retried, and how long to wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: BackoffStrategy::default(),
        }
    }

    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: BackoffStrategy::None,
        }
    }

    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Check if a failed attempt (0-indexed) should be retried.
    pub fn should_retry(&self, error: &SubmissionError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_retryable()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Per-attempt timeout plus retry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPolicy {
    /// Upper bound on a single attempt.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl SubmitPolicy {
    pub fn new(timeout: Duration, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }
}

impl Default for SubmitPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// Submit an order, bounding each attempt by the policy timeout and retrying
/// retryable failures with backoff.
pub async fn submit_with_policy(
    submitter: &dyn OrderSubmitter,
    order: &Order,
    policy: &SubmitPolicy,
) -> Result<OrderReceipt, SubmissionError> {
    let mut attempt = 0;
    loop {
        let error = match tokio::time::timeout(policy.timeout, submitter.submit(order)).await {
            Ok(Ok(receipt)) => {
                tracing::info!(
                    order_id = %order.id,
                    order_number = %receipt.order_number,
                    attempts = attempt + 1,
                    "order acknowledged"
                );
                return Ok(receipt);
            }
            Ok(Err(e)) => e,
            Err(_) => SubmissionError::Timeout(policy.timeout),
        };

        if !policy.retry.should_retry(&error, attempt) {
            tracing::warn!(order_id = %order.id, attempts = attempt + 1, %error, "order submission failed");
            return Err(error);
        }

        let delay = policy.retry.backoff.delay_for_attempt(attempt);
        tracing::warn!(
            order_id = %order.id,
            attempt = attempt + 1,
            %error,
            retry_in_ms = delay.as_millis() as u64,
            "order submission attempt failed, retrying"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::Catalog;
    use crate::checkout::{OrderDetails, PaymentMethod, Scripted, ScriptedSubmitter};

    fn order() -> Order {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        cart.add(catalog.find("t1").unwrap(), None).unwrap();
        let details = OrderDetails::new("Niamh", "0851234567", "Church St", PaymentMethod::Cash);
        Order::from_cart(&cart, details).unwrap()
    }

    fn fast_policy(max_retries: u32) -> SubmitPolicy {
        SubmitPolicy::new(
            Duration::from_millis(500),
            RetryPolicy::new(max_retries).with_backoff(BackoffStrategy::Fixed(Duration::from_millis(10))),
        )
    }

    #[test]
    fn test_exponential_backoff_caps() {
        let backoff = BackoffStrategy::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(500),
        };
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_attempt(2), Duration::from_millis(400));
        assert_eq!(backoff.delay_for_attempt(3), Duration::from_millis(500));
        assert_eq!(backoff.delay_for_attempt(40), Duration::from_millis(500));
    }

    #[test]
    fn test_should_retry() {
        let policy = RetryPolicy::new(1);
        let network = SubmissionError::Network("reset".into());
        assert!(policy.should_retry(&network, 0));
        assert!(!policy.should_retry(&network, 1));
        assert!(!policy.should_retry(&SubmissionError::Rejected("closed".into()), 0));
        assert!(!RetryPolicy::none().should_retry(&network, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_submitter_acknowledges() {
        let submitter = SimulatedSubmitter::default();
        let order = order();
        let receipt = submit_with_policy(&submitter, &order, &SubmitPolicy::default())
            .await
            .unwrap();
        assert_eq!(receipt.order_id, order.id);
        assert_eq!(receipt.total, order.total);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_network_errors() {
        let submitter = ScriptedSubmitter::new([
            Scripted::Fail(SubmissionError::Network("down".into())),
            Scripted::Accept,
        ]);
        assert!(submit_with_policy(&submitter, &order(), &fast_policy(2)).await.is_ok());
        assert_eq!(submitter.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_is_not_retried() {
        let submitter = ScriptedSubmitter::new([Scripted::Fail(SubmissionError::Rejected(
            "kitchen closed".into(),
        ))]);
        let err = submit_with_policy(&submitter, &order(), &fast_policy(3))
            .await
            .unwrap_err();
        assert_eq!(err, SubmissionError::Rejected("kitchen closed".into()));
        assert_eq!(submitter.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_submitter_times_out() {
        let submitter = ScriptedSubmitter::new([Scripted::Hang, Scripted::Hang]);
        let err = submit_with_policy(&submitter, &order(), &fast_policy(1))
            .await
            .unwrap_err();
        assert_eq!(err, SubmissionError::Timeout(Duration::from_millis(500)));
        assert_eq!(submitter.calls(), 2);
    }
}
