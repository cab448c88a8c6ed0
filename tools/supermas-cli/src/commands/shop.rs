//! Interactive ordering session.

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};

use supermas_commerce::catalog::CategoryFilter;
use supermas_commerce::checkout::{CheckoutFlow, PaymentMethod};
use supermas_commerce::error::{Field, SubmissionError};
use supermas_commerce::storefront::{CartPanel, Storefront};
use supermas_commerce::CommerceError;

use super::menu::parse_filter;
use super::{place_order, print_receipt, ShopArgs};
use crate::context::Context;
use crate::output::{delta_label, plural, price_label};

enum MainAction {
    Browse,
    Cart,
    Checkout,
    Info,
    Quit,
}

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        anyhow::bail!("The shop is interactive; use `supermas order` for JSON output.");
    }

    let mut store = ctx.storefront()?;
    let mut tab = parse_filter(args.category.as_deref())?;

    ctx.output.header(&format!("Welcome to {}", store.store().name));
    ctx.output.info(&store.store().address);

    loop {
        // Adding an item surfaces the cart, like the storefront's drawer.
        if store.panel() == CartPanel::Open {
            show_cart(ctx, &store)?;
            store.close_cart();
        }

        match main_menu(&store)? {
            MainAction::Browse => browse(ctx, &mut store, &mut tab)?,
            MainAction::Cart => edit_cart(ctx, &mut store)?,
            MainAction::Checkout => {
                if checkout(ctx, &mut store).await? {
                    break;
                }
            }
            MainAction::Info => {
                for hours in &store.store().opening_hours {
                    ctx.output.list_item(&hours.display());
                }
                ctx.output.kv("Phone", &store.store().phone);
            }
            MainAction::Quit => {
                if !store.cart().is_empty()
                    && !Confirm::new()
                        .with_prompt("Your cart will be discarded. Quit anyway?")
                        .default(false)
                        .interact()?
                {
                    continue;
                }
                break;
            }
        }
    }

    Ok(())
}

fn main_menu(store: &Storefront) -> Result<MainAction> {
    let mut actions = vec![("Browse the menu".to_string(), MainAction::Browse)];
    if !store.cart().is_empty() {
        let count = store.item_count();
        actions.push((
            format!(
                "View cart ({} {}, {})",
                count,
                plural(count, "item"),
                store.total()?
            ),
            MainAction::Cart,
        ));
        actions.push(("Checkout".to_string(), MainAction::Checkout));
    }
    actions.push(("Opening hours".to_string(), MainAction::Info));
    actions.push(("Quit".to_string(), MainAction::Quit));

    let labels: Vec<&str> = actions.iter().map(|(label, _)| label.as_str()).collect();
    let choice = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(actions.swap_remove(choice).1)
}

fn browse(ctx: &Context, store: &mut Storefront, tab: &mut CategoryFilter) -> Result<()> {
    let tabs: Vec<CategoryFilter> = CategoryFilter::tabs().collect();
    let tab_labels: Vec<&str> = tabs.iter().map(|t| t.label()).collect();
    let current = tabs.iter().position(|t| t == tab).unwrap_or(0);

    let choice = Select::new()
        .with_prompt("Category")
        .items(&tab_labels)
        .default(current)
        .interact()?;
    *tab = tabs[choice];

    let items: Vec<(String, String)> = store
        .menu(*tab)
        .into_iter()
        .map(|item| {
            (
                item.id.to_string(),
                format!("{:<36} {}", item.name, price_label(item)),
            )
        })
        .collect();
    if items.is_empty() {
        ctx.output.info("Nothing here yet.");
        return Ok(());
    }

    let mut labels: Vec<&str> = items.iter().map(|(_, label)| label.as_str()).collect();
    labels.push("Back");
    let choice = Select::new()
        .with_prompt(tab.label())
        .items(&labels)
        .default(0)
        .interact()?;
    let Some((id, _)) = items.get(choice) else {
        return Ok(());
    };

    customize(ctx, store, id)
}

/// The item detail view: pick a variant, then add.
fn customize(ctx: &Context, store: &mut Storefront, item_id: &str) -> Result<()> {
    let mut selection = store.select(item_id)?;

    println!();
    println!("  {}", console::style(&selection.item().name).bold());
    println!("  {}", selection.item().description);
    if !selection.item().allergens.is_empty() {
        ctx.output
            .kv("Allergens", &selection.item().allergens.join(", "));
    }

    if !selection.options().is_empty() {
        let labels: Vec<String> = selection
            .options()
            .iter()
            .map(|v| format!("{:<18} {}", v.name, delta_label(v.price_delta)))
            .collect();
        let choice = Select::new()
            .with_prompt("Select option")
            .items(&labels)
            .default(0)
            .interact()?;
        selection.select_index(choice)?;
    }

    let prompt = format!("Add to order - {}?", selection.current_price());
    if !Confirm::new().with_prompt(prompt).default(true).interact()? {
        return Ok(());
    }

    let key = store.confirm_selection(selection)?;
    ctx.output.success(&format!("Added {}", key));
    Ok(())
}

fn show_cart(ctx: &Context, store: &Storefront) -> Result<()> {
    let pricing = store.cart().pricing()?;
    ctx.output.header("Your Order");
    if pricing.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }
    for line in &pricing.lines {
        let qty = format!("{}x", line.quantity);
        let label = line.label();
        let total = line.line_total.display();
        ctx.output
            .table_row(&[qty.as_str(), label.as_str(), total.as_str()], &[4, 40, 10]);
    }
    println!();
    ctx.output.total(pricing.item_count, pricing.total);
    Ok(())
}

/// The cart drawer: adjust quantities or remove lines.
fn edit_cart(ctx: &Context, store: &mut Storefront) -> Result<()> {
    loop {
        show_cart(ctx, store)?;
        let pricing = store.cart().pricing()?;
        if pricing.is_empty() {
            return Ok(());
        }

        let mut labels: Vec<String> = pricing
            .lines
            .iter()
            .map(|l| format!("{} x{}", l.label(), l.quantity))
            .collect();
        labels.push("Done".to_string());
        let choice = Select::new()
            .with_prompt("Edit a line")
            .items(&labels)
            .default(labels.len() - 1)
            .interact()?;
        let Some(line) = pricing.lines.get(choice) else {
            return Ok(());
        };

        let item_id = line.key.item_id.as_str();
        let variant = line.key.variant.as_deref();
        let action = Select::new()
            .with_prompt(line.label())
            .items(&["Add one", "Remove one", "Remove line", "Back"])
            .default(0)
            .interact()?;
        match action {
            0 => {
                store.update_quantity(item_id, 1, variant);
            }
            1 => {
                store.update_quantity(item_id, -1, variant);
            }
            2 => {
                store.remove(item_id, variant);
            }
            _ => {}
        }
    }
}

/// Collect details and place the order. Returns true once an order is placed.
async fn checkout(ctx: &Context, store: &mut Storefront) -> Result<bool> {
    let mut flow = match store.begin_checkout() {
        Ok(flow) => flow,
        Err(CommerceError::EmptyCart) => {
            ctx.output.warn("Your cart is empty.");
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    show_cart(ctx, store)?;
    collect_details(&mut flow)?;

    loop {
        match place_order(ctx, store, &mut flow).await {
            Ok(receipt) => {
                print_receipt(ctx, &receipt, flow.details().payment_method);
                tokio::time::sleep(ctx.config.storefront.checkout.confirmation_display()).await;
                return Ok(true);
            }
            Err(CommerceError::Validation(errors)) => {
                for error in &errors {
                    ctx.output.warn(&error.to_string());
                }
                collect_details(&mut flow)?;
            }
            Err(e) if e.is_recoverable() => {
                ctx.output.error(&e.to_string());
                if matches!(e, CommerceError::Submission(SubmissionError::Aborted)) {
                    ctx.output.info("Order cancelled. Your cart is unchanged.");
                }
                let retry = Confirm::new()
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    ctx.output.info("Your cart has been kept.");
                    return Ok(false);
                }
            }
            Err(e) => {
                ctx.output.error(&e.to_string());
                ctx.output.info("Your cart has been kept.");
                return Ok(false);
            }
        }
    }
}

/// The checkout form. Every text field is required.
fn collect_details(flow: &mut CheckoutFlow) -> Result<()> {
    let name = prompt_required(Field::CustomerName, &flow.details().customer_name)?;
    flow.set_customer_name(name);
    let phone = prompt_required(Field::Phone, &flow.details().phone)?;
    flow.set_phone(phone);
    let address = prompt_required(Field::Address, &flow.details().address)?;
    flow.set_address(address);

    let methods = [PaymentMethod::Cash, PaymentMethod::Card];
    let labels: Vec<String> = methods.iter().map(|m| format!("{} on delivery", m)).collect();
    let current = methods
        .iter()
        .position(|m| *m == flow.details().payment_method)
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Payment")
        .items(&labels)
        .default(current)
        .interact()?;
    flow.set_payment_method(methods[choice]);

    Ok(())
}

fn prompt_required(field: Field, current: &str) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(field.label());
    if !current.trim().is_empty() {
        input = input.with_initial_text(current);
    }
    let value = input
        .validate_with(|value: &String| -> Result<(), String> {
            if value.trim().is_empty() {
                Err(format!("{} is required", field.label()))
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value)
}
