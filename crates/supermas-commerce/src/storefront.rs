//! Top-level application state.
//!
//! [`Storefront`] owns the catalog, the single cart and the cart panel flag.
//! Cart mutations stay pure in [`Cart`]; the storefront composes them with
//! the presentation effect (opening the cart panel) at the call site.

use futures::future::AbortRegistration;

use crate::cart::{Cart, LineKey};
use crate::catalog::{Catalog, CategoryFilter, MenuItem, StoreInfo};
use crate::checkout::{CheckoutFlow, OrderReceipt, OrderSubmitter, SubmitPolicy};
use crate::config::StorefrontConfig;
use crate::error::{CommerceError, Result};
use crate::money::Money;
use crate::selection::ItemSelection;

/// Visibility of the cart panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartPanel {
    #[default]
    Closed,
    Open,
}

/// The ordering session.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    store: StoreInfo,
    cart: Cart,
    panel: CartPanel,
    policy: SubmitPolicy,
}

impl Storefront {
    pub fn new(catalog: Catalog, store: StoreInfo) -> Self {
        Self {
            catalog,
            store,
            cart: Cart::new(),
            panel: CartPanel::Closed,
            policy: SubmitPolicy::default(),
        }
    }

    /// Build from configuration, loading the catalog file if one is set.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };
        let store = config.store.clone().unwrap_or_default();
        Ok(Self::new(catalog, store).with_policy(config.checkout.submit_policy()))
    }

    pub fn with_policy(mut self, policy: SubmitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &StoreInfo {
        &self.store
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn policy(&self) -> &SubmitPolicy {
        &self.policy
    }

    /// Menu items for one tab.
    pub fn menu(&self, filter: CategoryFilter) -> Vec<&MenuItem> {
        self.catalog.filter(filter).collect()
    }

    pub fn panel(&self) -> CartPanel {
        self.panel
    }

    pub fn open_cart(&mut self) {
        self.panel = CartPanel::Open;
    }

    pub fn close_cart(&mut self) {
        self.panel = CartPanel::Closed;
    }

    /// Add one unit to the cart and surface the cart panel.
    pub fn add_to_cart(&mut self, item_id: &str, variant: Option<&str>) -> Result<LineKey> {
        let item = self.catalog.get(item_id)?;
        let key = self.cart.add(item, variant)?;
        self.open_cart();
        Ok(key)
    }

    /// Open the customization view for an item.
    pub fn select(&self, item_id: &str) -> Result<ItemSelection> {
        Ok(ItemSelection::new(self.catalog.get(item_id)?))
    }

    /// Confirm a customization: add it and surface the cart panel.
    pub fn confirm_selection(&mut self, selection: ItemSelection) -> Result<LineKey> {
        let key = selection.confirm(&mut self.cart)?;
        self.open_cart();
        Ok(key)
    }

    /// Adjust a line's quantity; see [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, item_id: &str, delta: i64, variant: Option<&str>) -> Option<u32> {
        self.cart.update_quantity(item_id, delta, variant)
    }

    /// Remove a line; see [`Cart::remove`].
    pub fn remove(&mut self, item_id: &str, variant: Option<&str>) -> bool {
        self.cart.remove(item_id, variant)
    }

    pub fn total(&self) -> Result<Money> {
        self.cart.total()
    }

    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Start checkout. Only offered when there is something to order.
    pub fn begin_checkout(&self) -> Result<CheckoutFlow> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(CheckoutFlow::new())
    }

    /// Submit the cart through `flow`; the cart is cleared only once the
    /// submitter acknowledges the order.
    pub async fn place_order(
        &mut self,
        flow: &mut CheckoutFlow,
        submitter: &dyn OrderSubmitter,
    ) -> Result<OrderReceipt> {
        let receipt = flow.submit(&self.cart, submitter, &self.policy).await?;
        self.complete_order(&receipt);
        Ok(receipt)
    }

    /// Cancellable form of [`place_order`](Self::place_order).
    pub async fn place_order_abortable(
        &mut self,
        flow: &mut CheckoutFlow,
        submitter: &dyn OrderSubmitter,
        registration: AbortRegistration,
    ) -> Result<OrderReceipt> {
        let receipt = flow
            .submit_abortable(&self.cart, submitter, &self.policy, registration)
            .await?;
        self.complete_order(&receipt);
        Ok(receipt)
    }

    fn complete_order(&mut self, receipt: &OrderReceipt) {
        tracing::info!(
            order_number = %receipt.order_number,
            total = %receipt.total,
            "order placed"
        );
        self.cart.clear();
        self.close_cart();
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new(Catalog::builtin(), StoreInfo::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{Scripted, ScriptedSubmitter};
    use crate::error::SubmissionError;

    fn fill(flow: &mut CheckoutFlow) {
        flow.set_customer_name("Padraig");
        flow.set_phone("0879876543");
        flow.set_address("The Square, Abbeyfeale");
    }

    #[test]
    fn test_add_opens_cart_panel() {
        let mut store = Storefront::default();
        assert_eq!(store.panel(), CartPanel::Closed);

        store.add_to_cart("k1", None).unwrap();
        assert_eq!(store.panel(), CartPanel::Open);
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_failed_add_leaves_panel_closed() {
        let mut store = Storefront::default();
        assert!(matches!(
            store.add_to_cart("nope", None),
            Err(CommerceError::ItemNotFound(_))
        ));
        assert_eq!(store.panel(), CartPanel::Closed);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_add_with_unknown_variant_still_adds() {
        let mut store = Storefront::default();
        let key = store.add_to_cart("p1", Some("9 inch")).unwrap();
        assert_eq!(key.variant.as_deref(), Some("10 inch"));
        assert_eq!(store.panel(), CartPanel::Open);
    }

    #[test]
    fn test_selection_round_trip() {
        let mut store = Storefront::default();
        let mut selection = store.select("p3").unwrap();
        selection.select("14 inch Special").unwrap();
        store.confirm_selection(selection).unwrap();

        assert_eq!(store.total().unwrap().amount_cents, 1700);
        assert_eq!(store.panel(), CartPanel::Open);
    }

    #[test]
    fn test_begin_checkout_requires_items() {
        let mut store = Storefront::default();
        assert_eq!(store.begin_checkout().unwrap_err(), CommerceError::EmptyCart);
        store.add_to_cart("c1", None).unwrap();
        assert!(store.begin_checkout().is_ok());
    }

    #[test]
    fn test_menu_filter() {
        let store = Storefront::default();
        assert_eq!(
            store
                .menu(CategoryFilter::Only(crate::catalog::Category::Kebabs))
                .len(),
            3
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_clears_cart_on_success() {
        let mut store = Storefront::default();
        store.add_to_cart("p1", Some("12 inch")).unwrap();
        store.add_to_cart("c4", None).unwrap();

        let mut flow = store.begin_checkout().unwrap();
        fill(&mut flow);
        let submitter = ScriptedSubmitter::default();
        let receipt = store.place_order(&mut flow, &submitter).await.unwrap();

        assert_eq!(receipt.total.amount_cents, 1300 + 550);
        assert!(flow.is_confirmed());
        assert_eq!(store.item_count(), 0);
        assert!(store.total().unwrap().is_zero());
        assert_eq!(store.panel(), CartPanel::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_order_keeps_cart() {
        let mut store = Storefront::default().with_policy(SubmitPolicy::new(
            std::time::Duration::from_secs(1),
            crate::checkout::RetryPolicy::none(),
        ));
        store.add_to_cart("b2", None).unwrap();
        let before = store.cart().clone();

        let mut flow = store.begin_checkout().unwrap();
        fill(&mut flow);
        let submitter = ScriptedSubmitter::new([Scripted::Fail(SubmissionError::Network(
            "connection reset".into(),
        ))]);

        let err = store.place_order(&mut flow, &submitter).await.unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(store.cart(), &before);
        assert!(!flow.is_confirmed());

        // Retry with the same flow succeeds and only then clears the cart.
        store.place_order(&mut flow, &submitter).await.unwrap();
        assert!(store.cart().is_empty());
    }
}
