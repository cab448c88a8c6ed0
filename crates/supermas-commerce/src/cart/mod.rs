//! Shopping cart module.
//!
//! Contains the cart engine and its derived pricing.

mod cart;
mod pricing;

pub use cart::{item_count, Cart, CartLine, LineKey};
pub use pricing::{CartPricing, LinePricing};
