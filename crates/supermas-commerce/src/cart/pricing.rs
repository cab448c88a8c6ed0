//! Cart pricing breakdown.

use crate::cart::LineKey;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a cart, derived on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Per-line breakdown in cart order.
    pub lines: Vec<LinePricing>,
    /// Sum of quantities.
    pub item_count: u32,
    /// Sum of line totals.
    pub total: Money,
}

impl CartPricing {
    /// Check if there is anything to pay for.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub key: LineKey,
    /// Item display name.
    pub name: String,
    /// Chosen variant name.
    pub variant: Option<String>,
    /// Base price plus variant delta.
    pub unit_price: Money,
    pub quantity: u32,
    /// unit_price * quantity.
    pub line_total: Money,
}

impl LinePricing {
    /// Name with the variant appended, e.g. "Margherita (12 inch)".
    pub fn label(&self) -> String {
        match &self.variant {
            Some(v) => format!("{} ({})", self.name, v),
            None => self.name.clone(),
        }
    }
}
