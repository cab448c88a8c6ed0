//! Order snapshot handed to the order-placement collaborator.

use crate::cart::{Cart, LineKey};
use crate::checkout::OrderDetails;
use crate::error::{CommerceError, Result};
use crate::ids::{ItemId, OrderId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// An immutable copy of the cart plus checkout details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Customer and delivery details.
    pub details: OrderDetails,
    /// Items in cart order.
    pub lines: Vec<OrderLine>,
    /// Sum of quantities.
    pub item_count: u32,
    /// Amount due.
    pub total: Money,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Order {
    /// Snapshot the cart. The cart itself is not modified.
    pub fn from_cart(cart: &Cart, details: OrderDetails) -> Result<Self> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let pricing = cart.pricing()?;
        let lines = pricing
            .lines
            .into_iter()
            .map(|line| OrderLine {
                item_id: line.key.item_id,
                name: line.name,
                variant: line.variant,
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total,
            })
            .collect();

        Ok(Self {
            id: OrderId::generate(),
            details,
            lines,
            item_count: pricing.item_count,
            total: pricing.total,
            created_at: current_timestamp(),
        })
    }

    /// Serialize as a single JSON line.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub item_id: ItemId,
    /// Item name at time of order.
    pub name: String,
    pub variant: Option<String>,
    pub quantity: u32,
    /// Unit price at time of order.
    pub unit_price: Money,
    pub line_total: Money,
}

impl OrderLine {
    pub fn key(&self) -> LineKey {
        LineKey::new(self.item_id.clone(), self.variant.as_deref())
    }
}

/// Acknowledgement that an order was accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderReceipt {
    /// The acknowledged order.
    pub order_id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    /// Amount charged or due on delivery.
    pub total: Money,
    /// Unix timestamp of acknowledgement.
    pub confirmed_at: i64,
}

impl OrderReceipt {
    /// Build a receipt for an order acknowledged now.
    pub fn for_order(order: &Order) -> Self {
        Self {
            order_id: order.id.clone(),
            order_number: generate_order_number(),
            total: order.total,
            confirmed_at: current_timestamp(),
        }
    }
}

/// Generate a new order number.
pub fn generate_order_number() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static SEQ: AtomicU32 = AtomicU32::new(0);

    let seq = SEQ.fetch_add(1, Ordering::SeqCst) % 1000;
    format!("SM-{}-{:03}", current_timestamp(), seq)
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
