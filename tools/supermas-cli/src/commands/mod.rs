//! CLI command implementations.

pub mod config;
pub mod info;
pub mod item;
pub mod menu;
pub mod order;
pub mod shop;

use anyhow::Result;
use clap::{Args, Subcommand};
use futures::future::AbortHandle;

use supermas_commerce::checkout::{CheckoutFlow, OrderReceipt, PaymentMethod};
use supermas_commerce::storefront::Storefront;

use crate::context::Context;
use crate::output::{format_timestamp, plural};

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Only show one category (PIZZAS, KEBABS, BOXES, BURGERS, CHIPS,
    /// TENDERS, MEALS or ALL).
    #[arg(short = 'C', long)]
    pub category: Option<String>,
}

/// Arguments for the item command.
#[derive(Args)]
pub struct ItemArgs {
    /// Item ID (e.g. p1).
    pub id: String,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Customer's full name.
    #[arg(short, long)]
    pub name: String,

    /// Contact phone number.
    #[arg(short, long)]
    pub phone: String,

    /// Delivery address.
    #[arg(short, long)]
    pub address: String,

    /// Payment on delivery.
    #[arg(long, default_value = "cash")]
    pub payment: PaymentMethod,

    /// Item to order as ID[:VARIANT][ xQTY], e.g. p1:12 inch x2. Repeatable.
    #[arg(short, long = "item", required = true)]
    pub items: Vec<String>,

    /// Show the order without placing it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Open on this category tab.
    #[arg(short = 'C', long)]
    pub category: Option<String>,
}

/// Arguments for the info command.
#[derive(Args)]
pub struct InfoArgs {}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Submit the cart through `flow` with a spinner; Ctrl-C aborts the
/// submission and leaves the cart intact.
pub(crate) async fn place_order(
    ctx: &Context,
    store: &mut Storefront,
    flow: &mut CheckoutFlow,
) -> supermas_commerce::Result<OrderReceipt> {
    let submitter = ctx.submitter();
    ctx.output
        .debug(&format!("Placing order via {}", ctx.submitter_label()));

    let (handle, registration) = AbortHandle::new_pair();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.abort();
        }
    });

    let spinner = ctx.output.spinner(&format!(
        "Placing order ({} {}, {})...",
        store.item_count(),
        plural(store.item_count(), "item"),
        store.total()?
    ));
    let result = store
        .place_order_abortable(flow, submitter.as_ref(), registration)
        .await;
    spinner.finish_and_clear();
    ctrl_c.abort();

    result
}

/// Print an acknowledged order.
pub(crate) fn print_receipt(ctx: &Context, receipt: &OrderReceipt, payment: PaymentMethod) {
    if ctx.output.is_json() {
        ctx.output.json(receipt);
        return;
    }

    ctx.output.success("Order Confirmed!");
    ctx.output.kv("Order", &receipt.order_number);
    ctx.output.kv("Total", &receipt.total.display());
    ctx.output.kv("Payment", &format!("{} on delivery", payment));
    ctx.output.kv("Placed", &format_timestamp(receipt.confirmed_at));
    ctx.output.info("We'll call you when it's on the way.");
}
