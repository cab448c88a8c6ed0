//! Checkout module.
//!
//! Contains order details, the order snapshot, submission and the checkout
//! state machine.

mod details;
mod flow;
mod order;
#[cfg(any(test, feature = "test-util"))]
mod scripted;
mod submit;

pub use details::{OrderDetails, ParsePaymentMethodError, PaymentMethod};
pub use flow::{CheckoutFlow, CheckoutState};
pub use order::{generate_order_number, Order, OrderLine, OrderReceipt};
#[cfg(any(test, feature = "test-util"))]
pub use scripted::{Scripted, ScriptedSubmitter};
pub use submit::{
    submit_with_policy, BackoffStrategy, OrderSubmitter, RetryPolicy, SimulatedSubmitter,
    SubmitPolicy,
};
