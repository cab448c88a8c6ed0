//! Commerce error types.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CommerceError>;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Menu item not found in the catalog.
    #[error("Menu item not found: {0}")]
    ItemNotFound(String),

    /// Variant name not declared by the item.
    #[error("Item {item_id} has no variant named {variant:?}")]
    UnknownVariant { item_id: String, variant: String },

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout details failed validation.
    #[error("Invalid order details: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// Order submission failed.
    #[error("Order submission failed: {0}")]
    Submission(#[from] SubmissionError),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Catalog data failed validation.
    #[error("Invalid catalog: {0}")]
    CatalogInvalid(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CommerceError {
    /// Whether the user can fix the problem and try again without restarting checkout.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CommerceError::Validation(_) => true,
            CommerceError::Submission(e) => !matches!(e, SubmissionError::Rejected(_)),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

/// Required checkout field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CustomerName,
    Phone,
    Address,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CustomerName => "customer_name",
            Field::Phone => "phone",
            Field::Address => "address",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::CustomerName => "Full name",
            Field::Phone => "Phone number",
            Field::Address => "Delivery address",
        }
    }
}

/// A single invalid checkout field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    Missing(Field),
}

impl ValidationError {
    /// The field this error refers to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Missing(field) => *field,
        }
    }
}

/// Failure reported by an order submitter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("no acknowledgement within {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("order rejected: {0}")]
    Rejected(String),

    #[error("submission aborted")]
    Aborted,
}

impl SubmissionError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmissionError::Timeout(_) | SubmissionError::Network(_))
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    struct Joined<'a>(&'a [ValidationError]);

    impl fmt::Display for Joined<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for (i, e) in self.0.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", e)?;
            }
            Ok(())
        }
    }

    Joined(errors).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = CommerceError::Validation(vec![
            ValidationError::Missing(Field::CustomerName),
            ValidationError::Missing(Field::Address),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid order details: Full name is required, Delivery address is required"
        );
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(CommerceError::Validation(vec![]).is_recoverable());
        assert!(CommerceError::from(SubmissionError::Network("reset".into())).is_recoverable());
        assert!(!CommerceError::from(SubmissionError::Rejected("closed".into())).is_recoverable());
        assert!(!CommerceError::EmptyCart.is_recoverable());
    }

    #[test]
    fn test_retryable_submission_errors() {
        assert!(SubmissionError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(SubmissionError::Network("down".into()).is_retryable());
        assert!(!SubmissionError::Rejected("no".into()).is_retryable());
        assert!(!SubmissionError::Aborted.is_retryable());
    }
}
