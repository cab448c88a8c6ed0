//! Cart and cart line types.

use std::fmt;

use crate::cart::{CartPricing, LinePricing};
use crate::catalog::{MenuItem, VariantOption};
use crate::error::{CommerceError, Result};
use crate::ids::ItemId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Identity of a cart line: the item plus the chosen variant.
///
/// `variant: None` is its own key value, never a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub item_id: ItemId,
    pub variant: Option<String>,
}

impl LineKey {
    pub fn new(item_id: impl Into<ItemId>, variant: Option<&str>) -> Self {
        Self {
            item_id: item_id.into(),
            variant: variant.map(str::to_string),
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Some(v) => write!(f, "{}:{}", self.item_id, v),
            None => write!(f, "{}", self.item_id),
        }
    }
}

/// One row of the active order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// The catalog item (identity and display fields).
    pub item: MenuItem,
    /// The chosen variant; `None` only when the item has no variants.
    pub variant: Option<VariantOption>,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    fn new(item: &MenuItem, variant: Option<VariantOption>) -> Self {
        Self {
            item: item.clone(),
            variant,
            quantity: 1,
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey::new(self.item.id.clone(), self.variant_name())
    }

    pub fn variant_name(&self) -> Option<&str> {
        self.variant.as_ref().map(|v| v.name.as_str())
    }

    fn matches(&self, item_id: &str, variant: Option<&str>) -> bool {
        self.item.id.as_str() == item_id && self.variant_name() == variant
    }

    /// Base price plus variant delta.
    pub fn unit_price(&self) -> Result<Money> {
        match &self.variant {
            Some(v) => self.item.price.try_add(&v.price_delta),
            None => Ok(self.item.price),
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money> {
        self.unit_price()?.try_multiply(i64::from(self.quantity))
    }
}

/// The shopping cart for the current session.
///
/// Lines keep insertion order. Totals are derived on every read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart in the store currency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cart in a specific currency.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one unit of an item.
    ///
    /// The variant is resolved before matching: the named variant, else the
    /// item's first declared variant, else none. A name the item does not
    /// declare resolves like no name. A line with the same key gains one
    /// unit; otherwise a new line with quantity 1 is appended.
    ///
    /// Fails only when the item is priced in another currency.
    pub fn add(&mut self, item: &MenuItem, variant: Option<&str>) -> Result<LineKey> {
        if item.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.price.currency.code().to_string(),
            });
        }

        let resolved = resolve_variant(item, variant);
        let resolved_name = resolved.as_ref().map(|v| v.name.as_str());

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(item.id.as_str(), resolved_name))
        {
            line.quantity = line.quantity.saturating_add(1);
            tracing::debug!(line = %line.key(), quantity = line.quantity, "cart line incremented");
            return Ok(line.key());
        }

        let line = CartLine::new(item, resolved);
        let key = line.key();
        tracing::info!(line = %key, "cart line added");
        self.lines.push(line);
        Ok(key)
    }

    /// Change a line's quantity by `delta`, never going below 1.
    ///
    /// Returns the new quantity, or `None` when no line has this key.
    pub fn update_quantity(&mut self, item_id: &str, delta: i64, variant: Option<&str>) -> Option<u32> {
        let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(item_id, variant))
        else {
            tracing::debug!(item_id, ?variant, "quantity update for missing cart line ignored");
            return None;
        };

        let target = i64::from(line.quantity).saturating_add(delta);
        line.quantity = target.clamp(1, i64::from(u32::MAX)) as u32;
        Some(line.quantity)
    }

    /// Remove the line with this key. Returns whether anything was removed.
    pub fn remove(&mut self, item_id: &str, variant: Option<&str>) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|line| !line.matches(item_id, variant));
        let removed = self.lines.len() < len_before;
        if removed {
            tracing::info!(item_id, ?variant, "cart line removed");
        } else {
            tracing::debug!(item_id, ?variant, "remove for missing cart line ignored");
        }
        removed
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        tracing::info!("cart cleared");
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get a line by key.
    pub fn get(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.matches(key.item_id.as_str(), key.variant.as_deref()))
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities (the badge count).
    pub fn item_count(&self) -> u32 {
        item_count(&self.lines)
    }

    /// Sum over lines of `(base price + variant delta) * quantity`.
    pub fn total(&self) -> Result<Money> {
        self.lines
            .iter()
            .try_fold(Money::zero(self.currency), |acc, line| {
                acc.try_add(&line.line_total()?)
            })
    }

    /// Per-line breakdown plus totals.
    pub fn pricing(&self) -> Result<CartPricing> {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                Ok(LinePricing {
                    key: line.key(),
                    name: line.item.name.clone(),
                    variant: line.variant_name().map(str::to_string),
                    unit_price: line.unit_price()?,
                    quantity: line.quantity,
                    line_total: line.line_total()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let total = Money::try_sum(lines.iter().map(|l| &l.line_total), self.currency)?;

        Ok(CartPricing {
            lines,
            item_count: self.item_count(),
            total,
        })
    }
}

/// Resolve the variant a new unit should carry.
///
/// Items without variants always get `None`. An unrecognised name falls back
/// to the first declared variant.
fn resolve_variant(item: &MenuItem, requested: Option<&str>) -> Option<VariantOption> {
    let default = item.default_variant()?;
    let Some(name) = requested else {
        return Some(default.clone());
    };
    match item.variant(name) {
        Some(variant) => Some(variant.clone()),
        None => {
            tracing::warn!(
                item_id = %item.id,
                variant = name,
                fallback = %default.name,
                "unknown variant, using the first option"
            );
            Some(default.clone())
        }
    }
}

/// Sum of line quantities for any slice of lines.
pub fn item_count(lines: &[CartLine]) -> u32 {
    lines
        .iter()
        .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
}
