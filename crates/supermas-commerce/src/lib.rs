//! Menu, cart and checkout core for the SuperMas ordering storefront.
//!
//! This crate provides the state behind the storefront views:
//!
//! - **Catalog**: the static menu, categories, variants, store details
//! - **Cart**: line items keyed by item and variant, derived totals
//! - **Selection**: choosing a variant before adding an item
//! - **Checkout**: order details, order snapshot, submission with timeout,
//!   retry and cancellation
//! - **Storefront**: the application state holder tying them together
//!
//! # Example
//!
//! ```rust,no_run
//! use supermas_commerce::prelude::*;
//!
//! # async fn run() -> supermas_commerce::Result<()> {
//! let mut store = Storefront::default();
//! store.add_to_cart("p1", Some("12 inch"))?;
//! store.add_to_cart("c2", None)?;
//! println!("{} items, {}", store.item_count(), store.total()?);
//!
//! let mut flow = store.begin_checkout()?;
//! flow.set_customer_name("Aoife");
//! flow.set_phone("0871234567");
//! flow.set_address("Main Street, Abbeyfeale");
//!
//! let receipt = store.place_order(&mut flow, &SimulatedSubmitter::default()).await?;
//! println!("Order {} placed", receipt.order_number);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod selection;
pub mod storefront;

pub use error::{CommerceError, Result};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, Field, SubmissionError, ValidationError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Catalog, Category, CategoryFilter, MenuItem, OpeningHours, StoreInfo, VariantOption,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, CartPricing, LineKey, LinePricing};
    pub use crate::selection::ItemSelection;

    // Checkout
    pub use crate::checkout::{
        BackoffStrategy, CheckoutFlow, CheckoutState, Order, OrderDetails, OrderLine,
        OrderReceipt, OrderSubmitter, PaymentMethod, RetryPolicy, SimulatedSubmitter,
        SubmitPolicy,
    };

    pub use crate::config::{CheckoutConfig, StorefrontConfig};
    pub use crate::storefront::{CartPanel, Storefront};
}
