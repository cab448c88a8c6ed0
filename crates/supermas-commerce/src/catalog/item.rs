//! Menu item and variant types.

use crate::catalog::Category;
use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// An orderable entry on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    /// Stable item identifier (e.g., "p1").
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Short description shown on the menu card.
    pub description: String,
    /// Base price before any variant delta.
    pub price: Money,
    /// Menu section.
    pub category: Category,
    /// Image reference.
    pub image: String,
    /// Price-adjusting choices, in declared order. Empty when the item has none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<VariantOption>,
    /// Allergen codes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergens: Vec<String>,
}

impl MenuItem {
    /// Create an item with no variants or allergens.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        category: Category,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            category,
            image: image.into(),
            variants: Vec::new(),
            allergens: Vec::new(),
        }
    }

    /// Attach variants.
    pub fn with_variants(mut self, variants: Vec<VariantOption>) -> Self {
        self.variants = variants;
        self
    }

    /// Attach allergen codes.
    pub fn with_allergens<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergens = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// The variant preselected when the item is opened: the first declared one.
    pub fn default_variant(&self) -> Option<&VariantOption> {
        self.variants.first()
    }

    /// Look up a variant by name.
    pub fn variant(&self, name: &str) -> Option<&VariantOption> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Price with the given variant's delta applied.
    pub fn price_with(&self, variant: Option<&VariantOption>) -> Money {
        match variant {
            Some(v) => Money::new(
                self.price.amount_cents.saturating_add(v.price_delta.amount_cents),
                self.price.currency,
            ),
            None => self.price,
        }
    }

    /// Lowest orderable price ("from" price on the menu card).
    pub fn starting_price(&self) -> Money {
        self.variants
            .iter()
            .map(|v| self.price_with(Some(v)))
            .min_by_key(|m| m.amount_cents)
            .unwrap_or(self.price)
    }
}

/// A named price modifier, e.g. a pizza size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VariantOption {
    /// Name, unique within the parent item.
    pub name: String,
    /// Amount added to the item's base price.
    pub price_delta: Money,
}

impl VariantOption {
    pub fn new(name: impl Into<String>, price_delta: Money) -> Self {
        Self {
            name: name.into(),
            price_delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margherita() -> MenuItem {
        MenuItem::new(
            "p1",
            "Margherita",
            "Tomato, mozzarella, oregano",
            Money::eur(1100),
            Category::Pizzas,
            "margherita.jpg",
        )
        .with_variants(vec![
            VariantOption::new("10 inch", Money::eur(0)),
            VariantOption::new("12 inch", Money::eur(200)),
            VariantOption::new("14 inch", Money::eur(400)),
        ])
        .with_allergens(["1", "3", "7", "15"])
    }

    #[test]
    fn test_default_variant_is_first_declared() {
        let item = margherita();
        assert_eq!(item.default_variant().unwrap().name, "10 inch");
    }

    #[test]
    fn test_price_with_variant() {
        let item = margherita();
        let large = item.variant("12 inch");
        assert_eq!(item.price_with(large).amount_cents, 1300);
        assert_eq!(item.price_with(None).amount_cents, 1100);
        assert!(item.variant("16 inch").is_none());
    }

    #[test]
    fn test_starting_price() {
        assert_eq!(margherita().starting_price().amount_cents, 1100);
        let chips = MenuItem::new("c1", "Chips", "", Money::eur(400), Category::Chips, "");
        assert!(!chips.has_variants());
        assert_eq!(chips.starting_price().amount_cents, 400);
    }
}
