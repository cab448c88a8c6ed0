//! The read-only catalog of orderable items.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, CategoryFilter, MenuItem, VariantOption};
use crate::error::{CommerceError, Result};
use crate::money::Money;

/// Allergen codes printed on every pizza.
pub const PIZZA_ALLERGENS: [&str; 4] = ["1", "3", "7", "15"];

/// The static menu, loaded once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate item ids and duplicate variant names.
    pub fn new(items: Vec<MenuItem>) -> Result<Self> {
        let catalog = Self { items };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from a JSON array of items.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::CatalogInvalid(format!("cannot read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), items = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for item in &self.items {
            if !ids.insert(item.id.as_str()) {
                return Err(CommerceError::CatalogInvalid(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
            let mut names = HashSet::new();
            for variant in &item.variants {
                if !names.insert(variant.name.as_str()) {
                    return Err(CommerceError::CatalogInvalid(format!(
                        "item {} declares variant {:?} twice",
                        item.id, variant.name
                    )));
                }
                if variant.price_delta.is_negative() {
                    return Err(CommerceError::CatalogInvalid(format!(
                        "item {} variant {:?} has a negative price delta",
                        item.id, variant.name
                    )));
                }
                if variant.price_delta.currency != item.price.currency {
                    return Err(CommerceError::CurrencyMismatch {
                        expected: item.price.currency.code().to_string(),
                        got: variant.price_delta.currency.code().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Find an item by identifier.
    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }

    /// Find an item or fail with `ItemNotFound`.
    pub fn get(&self, id: &str) -> Result<&MenuItem> {
        self.find(id)
            .ok_or_else(|| CommerceError::ItemNotFound(id.to_string()))
    }

    /// Items passing the filter, in catalog order.
    pub fn filter(&self, filter: CategoryFilter) -> impl Iterator<Item = &MenuItem> {
        self.items
            .iter()
            .filter(move |item| filter.matches(item.category))
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Categories that have at least one item, in menu order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.items.iter().any(|item| item.category == *c))
            .collect()
    }

    /// The SuperMas menu.
    pub fn builtin() -> Self {
        Self {
            items: builtin_items(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn eur(amount: f64) -> Money {
    Money::from_decimal(amount, crate::money::Currency::EUR)
}

fn sizes(sizes: &[(&str, f64)]) -> Vec<VariantOption> {
    sizes
        .iter()
        .map(|(name, delta)| VariantOption::new(*name, eur(*delta)))
        .collect()
}

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/photo-{photo}?auto=format&fit=crop&w=800&q=80")
}

fn builtin_items() -> Vec<MenuItem> {
    let standard_sizes = [("10 inch", 0.0), ("12 inch", 2.0), ("14 inch", 4.0)];

    vec![
        MenuItem::new(
            "p1",
            "Margherita",
            "Fresh tomato sauce, extra mozzarella cheese, oregano",
            eur(11.0),
            Category::Pizzas,
            unsplash("1604068549290-dea0e4a305ca"),
        )
        .with_variants(sizes(&standard_sizes))
        .with_allergens(PIZZA_ALLERGENS),
        MenuItem::new(
            "p2",
            "Pepperoni Passion",
            "Double pepperoni and double cheese",
            eur(11.0),
            Category::Pizzas,
            unsplash("1628840042765-356cda07504e"),
        )
        .with_variants(sizes(&standard_sizes))
        .with_allergens(PIZZA_ALLERGENS),
        MenuItem::new(
            "p3",
            "Special Pizza",
            "Chefs special selection of toppings with fresh herbs and premium meats",
            eur(15.0),
            Category::Pizzas,
            unsplash("1541745537411-b8046dc6d66c"),
        )
        .with_variants(sizes(&[("12 inch Special", 0.0), ("14 inch Special", 2.0)]))
        .with_allergens(PIZZA_ALLERGENS),
        MenuItem::new(
            "k1",
            "Doner Kebab",
            "Freshly sliced lamb doner in pita bread with crisp salad and house sauce",
            eur(10.0),
            Category::Kebabs,
            unsplash("1529006557810-274b9b2fc783"),
        ),
        MenuItem::new(
            "k2",
            "Mixed Kebab",
            "Combination of lamb doner, chicken, and seekh kebab on a fresh base",
            eur(11.0),
            Category::Kebabs,
            unsplash("1603360946369-dc9bb6258143"),
        ),
        MenuItem::new(
            "k3",
            "Special Kebab",
            "The ultimate kebab platter with extra sides and premium cuts",
            eur(12.0),
            Category::Kebabs,
            unsplash("1555939594-58d7cb561ad1"),
        ),
        MenuItem::new(
            "b1",
            "Standard Box",
            "Fries, choice of meat, signature garlic sauce and fresh salad",
            eur(10.0),
            Category::Boxes,
            unsplash("1561758033-d89a9ad46330"),
        ),
        MenuItem::new(
            "b2",
            "Mixed Box",
            "A feast of variety: multiple meats, fries, and special dips",
            eur(11.0),
            Category::Boxes,
            unsplash("1626082927389-6cd097cdc6ec"),
        ),
        MenuItem::new(
            "bg1",
            "1/2 Pounder with Cheese",
            "Juicy double beef patty with melted cheddar in a toasted brioche bun",
            eur(8.0),
            Category::Burgers,
            unsplash("1568901346375-23c9450c58cd"),
        ),
        MenuItem::new(
            "c1",
            "Regular Chips",
            "Crispy golden triple-cooked fries",
            eur(4.0),
            Category::Chips,
            unsplash("1630384066252-19e1ad955494"),
        ),
        MenuItem::new(
            "c2",
            "Garlic Chips",
            "Golden chips smothered in our creamy signature garlic sauce",
            eur(5.5),
            Category::Chips,
            unsplash("1623238913973-21e45cced554"),
        ),
        MenuItem::new(
            "c3",
            "Garlic Cheese Chips",
            "The fan favorite: garlic sauce and a heavy layer of melted mozzarella",
            eur(6.5),
            Category::Chips,
            unsplash("1585109649139-366815a0d713"),
        ),
        MenuItem::new(
            "c4",
            "Curry Chips",
            "Crispy fries with our rich, aromatic home-style curry sauce",
            eur(5.5),
            Category::Chips,
            unsplash("1606755962773-d324e0a13086"),
        ),
        MenuItem::new(
            "t1",
            "Chicken Tenders 5pcs with Chips",
            "Hand-breaded premium chicken breast strips with a side of fries",
            eur(9.0),
            Category::Tenders,
            unsplash("1562967914-608f82629710"),
        ),
        MenuItem::new(
            "t2",
            "Chicken Tenders 5pcs",
            "Juicy, crispy breaded chicken breast strips",
            eur(6.0),
            Category::Tenders,
            unsplash("1626645272661-ca36f3333333"),
        ),
        MenuItem::new(
            "m1",
            "Pizza Meal 10 inch",
            "A 10 inch Margherita or Pepperoni, golden chips, and a refreshing soft drink",
            eur(16.0),
            Category::Meals,
            unsplash("1528137871618-79d2761e3fd5"),
        ),
    ]
}
