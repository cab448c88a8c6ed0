//! Checkout flow state machine.
//!
//! `Collecting` is the entry state and the state every failure returns to.
//! `Confirmed` is terminal: a flow is used for exactly one order.

use futures::future::{AbortHandle, AbortRegistration, Abortable};

use crate::cart::Cart;
use crate::checkout::{
    submit_with_policy, Order, OrderDetails, OrderReceipt, OrderSubmitter, PaymentMethod,
    SubmitPolicy,
};
use crate::error::{CommerceError, Result, SubmissionError};

/// Where the checkout currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// Filling in details; also where failed submissions land.
    Collecting,
    /// The submitter acknowledged the order.
    Confirmed(OrderReceipt),
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Collecting => "collecting",
            CheckoutState::Confirmed(_) => "confirmed",
        }
    }
}

/// One checkout attempt. Dropping it before confirmation discards the draft.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    details: OrderDetails,
    state: CheckoutState,
    attempts: u32,
    last_error: Option<CommerceError>,
}

impl CheckoutFlow {
    /// Start collecting with an empty draft paying by cash.
    pub fn new() -> Self {
        Self {
            details: OrderDetails::default(),
            state: CheckoutState::Collecting,
            attempts: 0,
            last_error: None,
        }
    }

    /// Start from prefilled details.
    pub fn with_details(details: OrderDetails) -> Self {
        Self {
            details,
            ..Self::new()
        }
    }

    pub fn details(&self) -> &OrderDetails {
        &self.details
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.details.customer_name = name.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.details.phone = phone.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.details.address = address.into();
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.details.payment_method = method;
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.state, CheckoutState::Confirmed(_))
    }

    pub fn receipt(&self) -> Option<&OrderReceipt> {
        match &self.state {
            CheckoutState::Confirmed(receipt) => Some(receipt),
            CheckoutState::Collecting => None,
        }
    }

    /// Number of `submit` calls that passed validation.
    ///
    /// Counts checkout attempts, not transport calls: retries made by the
    /// [`SubmitPolicy`] within one call are not added.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The error from the most recent failed submit, cleared on success.
    pub fn last_error(&self) -> Option<&CommerceError> {
        self.last_error.as_ref()
    }

    /// Check the draft without submitting.
    pub fn validate(&self) -> Result<()> {
        self.details
            .validate()
            .map_err(CommerceError::Validation)
    }

    /// Submit the cart with the collected details.
    ///
    /// Only an acknowledged submission moves the flow to `Confirmed`. The
    /// cart is read, never modified; clearing it is the caller's job.
    pub async fn submit(
        &mut self,
        cart: &Cart,
        submitter: &dyn OrderSubmitter,
        policy: &SubmitPolicy,
    ) -> Result<OrderReceipt> {
        let (_handle, registration) = AbortHandle::new_pair();
        self.submit_abortable(cart, submitter, policy, registration).await
    }

    /// Like [`submit`](Self::submit), but cancellable through the paired
    /// [`AbortHandle`]. An aborted submission leaves the flow in `Collecting`.
    pub async fn submit_abortable(
        &mut self,
        cart: &Cart,
        submitter: &dyn OrderSubmitter,
        policy: &SubmitPolicy,
        registration: AbortRegistration,
    ) -> Result<OrderReceipt> {
        if let CheckoutState::Confirmed(_) = self.state {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.state.as_str().to_string(),
                to: "confirmed".to_string(),
            });
        }

        let order = match self.prepare(cart) {
            Ok(order) => order,
            Err(e) => {
                self.last_error = Some(e.clone());
                return Err(e);
            }
        };

        self.attempts += 1;
        tracing::info!(
            order_id = %order.id,
            items = order.item_count,
            total = %order.total,
            payment = order.details.payment_method.as_str(),
            "submitting order"
        );

        let outcome = Abortable::new(submit_with_policy(submitter, &order, policy), registration)
            .await
            .unwrap_or(Err(SubmissionError::Aborted));

        match outcome {
            Ok(receipt) => {
                self.state = CheckoutState::Confirmed(receipt.clone());
                self.last_error = None;
                Ok(receipt)
            }
            Err(e) => {
                let error = CommerceError::Submission(e);
                self.last_error = Some(error.clone());
                Err(error)
            }
        }
    }

    fn prepare(&self, cart: &Cart) -> Result<Order> {
        self.validate()?;
        Order::from_cart(cart, self.details.normalized())
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::checkout::{Scripted, ScriptedSubmitter};
    use crate::error::{Field, ValidationError};
    use std::time::Duration;

    fn cart() -> Cart {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        cart.add(catalog.find("p2").unwrap(), Some("14 inch")).unwrap();
        cart
    }

    fn filled_flow() -> CheckoutFlow {
        let mut flow = CheckoutFlow::new();
        flow.set_customer_name("Ciara");
        flow.set_phone("0831234567");
        flow.set_address("New Street, Abbeyfeale");
        flow
    }

    #[test]
    fn test_new_flow_defaults() {
        let flow = CheckoutFlow::new();
        assert_eq!(flow.state(), &CheckoutState::Collecting);
        assert_eq!(flow.details().payment_method, PaymentMethod::Cash);
        assert!(flow.receipt().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_field_blocks_confirmation() {
        let submitter = ScriptedSubmitter::default();
        let mut flow = filled_flow();
        flow.set_phone("   ");

        let err = flow
            .submit(&cart(), &submitter, &SubmitPolicy::default())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CommerceError::Validation(vec![ValidationError::Missing(Field::Phone)])
        );
        assert_eq!(flow.state(), &CheckoutState::Collecting);
        assert_eq!(submitter.calls(), 0);
        assert_eq!(flow.attempts(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submit_confirms() {
        let submitter = ScriptedSubmitter::default();
        let mut flow = filled_flow();
        flow.set_payment_method(PaymentMethod::Card);

        let receipt = flow
            .submit(&cart(), &submitter, &SubmitPolicy::default())
            .await
            .unwrap();

        assert!(flow.is_confirmed());
        assert_eq!(flow.receipt(), Some(&receipt));
        assert_eq!(receipt.total.amount_cents, 1500);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmed_is_terminal() {
        let submitter = ScriptedSubmitter::default();
        let mut flow = filled_flow();
        let cart = cart();
        flow.submit(&cart, &submitter, &SubmitPolicy::default()).await.unwrap();

        let err = flow
            .submit(&cart, &submitter, &SubmitPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::InvalidCheckoutTransition { .. }));
        assert_eq!(submitter.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_submit_can_be_retried() {
        let submitter = ScriptedSubmitter::new([Scripted::Fail(SubmissionError::Rejected(
            "card declined".into(),
        ))]);
        let mut flow = filled_flow();
        let cart = cart();

        let err = flow
            .submit(&cart, &submitter, &SubmitPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::Submission(SubmissionError::Rejected(_))));
        assert_eq!(flow.state(), &CheckoutState::Collecting);
        assert_eq!(flow.last_error(), Some(&err));

        flow.submit(&cart, &submitter, &SubmitPolicy::default()).await.unwrap();
        assert!(flow.is_confirmed());
        assert!(flow.last_error().is_none());
        assert_eq!(flow.attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_policy_retries_count_as_one_attempt() {
        let submitter = ScriptedSubmitter::new([
            Scripted::Fail(SubmissionError::Network("connection reset".into())),
            Scripted::Accept,
        ]);
        let mut flow = filled_flow();

        flow.submit(&cart(), &submitter, &SubmitPolicy::default())
            .await
            .unwrap();

        assert!(flow.is_confirmed());
        assert_eq!(submitter.calls(), 2);
        assert_eq!(flow.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_cart_rejected() {
        let submitter = ScriptedSubmitter::default();
        let mut flow = filled_flow();
        let err = flow
            .submit(&Cart::new(), &submitter, &SubmitPolicy::default())
            .await
            .unwrap_err();
        assert_eq!(err, CommerceError::EmptyCart);
        assert_eq!(submitter.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_returns_to_collecting() {
        let submitter = ScriptedSubmitter::new([Scripted::Hang]);
        let mut flow = filled_flow();
        let cart = cart();
        let (handle, registration) = AbortHandle::new_pair();

        let aborter = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            handle.abort();
        });

        let err = flow
            .submit_abortable(&cart, &submitter, &SubmitPolicy::default(), registration)
            .await
            .unwrap_err();
        aborter.await.unwrap();

        assert_eq!(err, CommerceError::Submission(SubmissionError::Aborted));
        assert_eq!(flow.state(), &CheckoutState::Collecting);
    }
}
