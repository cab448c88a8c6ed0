//! Item customization before adding to the cart.
//!
//! An [`ItemSelection`] is opened for one menu item, preselects the item's
//! first variant, lets the caller change it, and is consumed when confirmed.

use crate::cart::{Cart, LineKey};
use crate::catalog::{MenuItem, VariantOption};
use crate::error::{CommerceError, Result};
use crate::money::Money;

/// Transient variant choice for a single item.
#[derive(Debug, Clone)]
pub struct ItemSelection {
    item: MenuItem,
    selected: Option<usize>,
}

impl ItemSelection {
    /// Open a selection with the first declared variant chosen.
    pub fn new(item: &MenuItem) -> Self {
        let selected = if item.has_variants() { Some(0) } else { None };
        Self {
            item: item.clone(),
            selected,
        }
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    /// The variants on offer, in declared order.
    pub fn options(&self) -> &[VariantOption] {
        &self.item.variants
    }

    /// Choose a variant by name.
    pub fn select(&mut self, name: &str) -> Result<()> {
        let index = self
            .item
            .variants
            .iter()
            .position(|v| v.name == name)
            .ok_or_else(|| CommerceError::UnknownVariant {
                item_id: self.item.id.to_string(),
                variant: name.to_string(),
            })?;
        self.selected = Some(index);
        Ok(())
    }

    /// Choose a variant by its position in [`options`](Self::options).
    pub fn select_index(&mut self, index: usize) -> Result<()> {
        match self.item.variants.get(index) {
            Some(_) => {
                self.selected = Some(index);
                Ok(())
            }
            None => Err(CommerceError::UnknownVariant {
                item_id: self.item.id.to_string(),
                variant: format!("#{}", index),
            }),
        }
    }

    pub fn selected(&self) -> Option<&VariantOption> {
        self.selected.and_then(|i| self.item.variants.get(i))
    }

    /// Price shown on the confirm button.
    pub fn current_price(&self) -> Money {
        self.item.price_with(self.selected())
    }

    /// Add the item with the chosen variant and close the selection.
    pub fn confirm(self, cart: &mut Cart) -> Result<LineKey> {
        let variant = self.selected().map(|v| v.name.as_str());
        cart.add(&self.item, variant)
    }
}
