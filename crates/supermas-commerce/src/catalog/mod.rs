//! Menu catalog module.
//!
//! Contains the static menu: items, variants, categories and store details.

mod category;
mod item;
mod menu;
mod store;

pub use category::{Category, CategoryFilter};
pub use item::{MenuItem, VariantOption};
pub use menu::{Catalog, PIZZA_ALLERGENS};
pub use store::{OpeningHours, StoreInfo};
