//! End-to-end ordering scenarios against the public API.

use std::time::Duration;

use supermas_commerce::checkout::{Scripted, ScriptedSubmitter};
use supermas_commerce::prelude::*;

fn margherita() -> MenuItem {
    MenuItem::new(
        "p1",
        "Margherita",
        "Fresh tomato sauce, extra mozzarella cheese, oregano",
        Money::eur(1100),
        Category::Pizzas,
        "margherita.jpg",
    )
    .with_variants(vec![
        VariantOption::new("10 inch", Money::eur(0)),
        VariantOption::new("12 inch", Money::eur(200)),
        VariantOption::new("14 inch", Money::eur(400)),
    ])
}

#[test]
fn margherita_12_inch_walkthrough() {
    let item = margherita();
    let mut cart = Cart::new();
    assert_eq!(cart.item_count(), 0);

    cart.add(&item, Some("12 inch")).unwrap();
    assert_eq!(cart.total().unwrap().display_amount(), "13.00");
    assert_eq!(cart.item_count(), 1);

    cart.add(&item, Some("12 inch")).unwrap();
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.total().unwrap().display_amount(), "26.00");
    assert_eq!(cart.line_count(), 1);

    cart.update_quantity("p1", -1, Some("12 inch"));
    assert_eq!(cart.item_count(), 1);
    assert_eq!(cart.total().unwrap().display_amount(), "13.00");
}

#[test]
fn three_of_a_twelve_inch_costs_39() {
    let mut cart = Cart::new();
    cart.add(&margherita(), Some("12 inch")).unwrap();
    cart.update_quantity("p1", 2, Some("12 inch"));
    assert_eq!(cart.total().unwrap(), Money::eur(3900));
}

#[test]
fn quantities_two_one_three_count_six() {
    let catalog = Catalog::builtin();
    let mut cart = Cart::new();
    cart.add(catalog.find("k1").unwrap(), None).unwrap();
    cart.update_quantity("k1", 1, None);
    cart.add(catalog.find("c1").unwrap(), None).unwrap();
    cart.add(catalog.find("p1").unwrap(), Some("14 inch")).unwrap();
    cart.update_quantity("p1", 2, Some("14 inch"));

    let quantities: Vec<u32> = cart.lines().iter().map(|l| l.quantity).collect();
    assert_eq!(quantities, vec![2, 1, 3]);
    assert_eq!(cart.item_count(), 6);
}

#[test]
fn variant_absence_is_its_own_key() {
    let mut cart = Cart::new();
    let item = margherita();
    cart.add(&item, Some("10 inch")).unwrap();

    // The line carries "10 inch", so a variant-less key does not reach it.
    assert_eq!(cart.update_quantity("p1", 5, None), None);
    assert!(!cart.remove("p1", None));
    assert_eq!(cart.item_count(), 1);
}

#[test]
fn quantity_never_drops_below_one() {
    let mut cart = Cart::new();
    cart.add(&margherita(), Some("14 inch")).unwrap();
    cart.update_quantity("p1", 2, Some("14 inch"));
    assert_eq!(cart.update_quantity("p1", -100, Some("14 inch")), Some(1));
    assert_eq!(cart.update_quantity("p1", i64::MIN, Some("14 inch")), Some(1));
    assert_eq!(cart.line_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn checkout_confirms_and_empties_cart() {
    let mut store = Storefront::default();
    store.add_to_cart("p2", None).unwrap();
    store.add_to_cart("t1", None).unwrap();

    let mut flow = store.begin_checkout().unwrap();
    flow.set_customer_name("Aoife");
    flow.set_phone("0871234567");
    flow.set_address("Main Street, Abbeyfeale");
    flow.set_payment_method(PaymentMethod::Card);

    let receipt = store
        .place_order(&mut flow, &SimulatedSubmitter::new(Duration::from_millis(2500)))
        .await
        .unwrap();

    assert_eq!(receipt.total, Money::eur(1100 + 900));
    assert!(matches!(flow.state(), CheckoutState::Confirmed(_)));
    assert_eq!(store.item_count(), 0);
    assert_eq!(store.total().unwrap().display_amount(), "0.00");
}

#[tokio::test(start_paused = true)]
async fn blank_required_field_blocks_confirmation() {
    for blank in [Field::CustomerName, Field::Phone, Field::Address] {
        let mut store = Storefront::default();
        store.add_to_cart("m1", None).unwrap();

        let mut flow = store.begin_checkout().unwrap();
        flow.set_customer_name(if blank == Field::CustomerName { "" } else { "Aoife" });
        flow.set_phone(if blank == Field::Phone { " " } else { "0871234567" });
        flow.set_address(if blank == Field::Address { "" } else { "Main Street" });

        let submitter = ScriptedSubmitter::default();
        let err = store.place_order(&mut flow, &submitter).await.unwrap_err();

        assert_eq!(err, CommerceError::Validation(vec![ValidationError::Missing(blank)]));
        assert_eq!(flow.state(), &CheckoutState::Collecting);
        assert_eq!(submitter.calls(), 0);
        assert_eq!(store.item_count(), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn timed_out_submission_keeps_cart_for_retry() {
    let mut store = Storefront::default().with_policy(SubmitPolicy::new(
        Duration::from_secs(5),
        RetryPolicy::new(1).with_backoff(BackoffStrategy::Fixed(Duration::from_millis(100))),
    ));
    store.add_to_cart("k3", None).unwrap();

    let mut flow = store.begin_checkout().unwrap();
    flow.set_customer_name("Aoife");
    flow.set_phone("0871234567");
    flow.set_address("Main Street");

    let submitter = ScriptedSubmitter::new([Scripted::Hang, Scripted::Hang]);
    let err = store.place_order(&mut flow, &submitter).await.unwrap_err();

    assert_eq!(
        err,
        CommerceError::Submission(SubmissionError::Timeout(Duration::from_secs(5)))
    );
    assert_eq!(submitter.calls(), 2);
    assert_eq!(store.item_count(), 1);

    let receipt = store.place_order(&mut flow, &submitter).await.unwrap();
    assert_eq!(receipt.total, Money::eur(1200));
    assert!(store.cart().is_empty());
}
