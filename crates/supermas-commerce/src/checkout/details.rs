//! Delivery and payment details collected at checkout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::{Field, ValidationError};

/// How the customer pays on delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }
}

/// A payment method name other than `cash` or `card`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown payment method '{0}' (cash or card)")]
pub struct ParsePaymentMethodError(pub String);

impl FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            _ => Err(ParsePaymentMethodError(s.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("Cash"),
            PaymentMethod::Card => f.write_str("Card"),
        }
    }
}

/// Checkout form data. Built fresh for every checkout attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OrderDetails {
    pub customer_name: String,
    pub phone: String,
    /// Free-text delivery address.
    pub address: String,
    pub payment_method: PaymentMethod,
}

impl OrderDetails {
    pub fn new(
        customer_name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            phone: phone.into(),
            address: address.into(),
            payment_method,
        }
    }

    /// Report every required field that is blank after trimming.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            (Field::CustomerName, &self.customer_name),
            (Field::Phone, &self.phone),
            (Field::Address, &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| ValidationError::Missing(field))
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Copy with surrounding whitespace stripped from text fields.
    pub fn normalized(&self) -> Self {
        Self {
            customer_name: self.customer_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            payment_method: self.payment_method,
        }
    }
}
