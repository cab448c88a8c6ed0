//! Place an order non-interactively.

use std::str::FromStr;

use anyhow::{bail, Context as _, Result};
use thiserror::Error;

use supermas_commerce::checkout::{CheckoutFlow, OrderDetails};
use supermas_commerce::storefront::Storefront;

use super::{place_order, print_receipt, OrderArgs};
use crate::context::Context;
use crate::output::plural;

/// One `--item` argument: `ID[:VARIANT][ xQTY]`.
///
/// The quantity is only read from a final whitespace-separated `x<digits>`
/// word, so IDs and variant names may contain an `x` freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub id: String,
    pub variant: Option<String>,
    pub quantity: u32,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ItemSpecError {
    #[error("item spec is empty")]
    Empty,
    #[error("item spec '{0}' has no item ID")]
    MissingId(String),
    #[error("quantity in '{0}' must be at least 1")]
    ZeroQuantity(String),
    #[error("quantity in '{0}' is not a valid number")]
    InvalidQuantity(String),
}

/// Split a trailing ` xN` word off the spec.
fn split_quantity(spec: &str) -> Option<(&str, &str)> {
    let (rest, word) = spec.rsplit_once(char::is_whitespace)?;
    let digits = word.strip_prefix(['x', 'X'])?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((rest.trim_end(), digits))
}

impl FromStr for ItemSpec {
    type Err = ItemSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        if spec.is_empty() {
            return Err(ItemSpecError::Empty);
        }

        let (rest, quantity) = match split_quantity(spec) {
            Some((rest, digits)) => {
                let quantity: u32 = digits
                    .parse()
                    .map_err(|_| ItemSpecError::InvalidQuantity(s.to_string()))?;
                (rest, quantity)
            }
            None => (spec, 1),
        };
        if quantity == 0 {
            return Err(ItemSpecError::ZeroQuantity(s.to_string()));
        }

        let (id, variant) = match rest.split_once(':') {
            Some((id, variant)) => {
                let variant = variant.trim();
                (id.trim(), (!variant.is_empty()).then(|| variant.to_string()))
            }
            None => (rest.trim(), None),
        };
        if id.is_empty() {
            return Err(ItemSpecError::MissingId(s.to_string()));
        }

        Ok(Self {
            id: id.to_string(),
            variant,
            quantity,
        })
    }
}

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let specs = args
        .items
        .iter()
        .map(|s| s.parse::<ItemSpec>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut store = ctx.storefront()?;
    fill_cart(&mut store, &specs)?;

    if !ctx.output.is_json() {
        print_cart(ctx, &store)?;
    }

    let details = OrderDetails::new(args.name, args.phone, args.address, args.payment);
    let mut flow = CheckoutFlow::with_details(details);
    flow.validate()?;

    if args.dry_run {
        ctx.output.info("Dry run: order not placed.");
        if ctx.output.is_json() {
            ctx.output.json(&store.cart().pricing()?);
        }
        return Ok(());
    }

    let receipt = match place_order(ctx, &mut store, &mut flow).await {
        Ok(receipt) => receipt,
        Err(e) if e.is_recoverable() => {
            bail!("{}. Nothing was charged; run the command again to retry.", e)
        }
        Err(e) => return Err(e.into()),
    };

    print_receipt(ctx, &receipt, args.payment);
    Ok(())
}

/// Add each `--item` to the cart through the same selection path the shop
/// uses, so a mistyped option is reported instead of replaced.
fn fill_cart(store: &mut Storefront, specs: &[ItemSpec]) -> Result<()> {
    for spec in specs {
        let mut selection = store
            .select(&spec.id)
            .with_context(|| format!("Cannot add '{}'", spec.id))?;
        if let Some(variant) = &spec.variant {
            selection
                .select(variant)
                .with_context(|| format!("Cannot add '{}'", spec.id))?;
        }
        let key = store.confirm_selection(selection)?;
        if spec.quantity > 1 {
            store.update_quantity(
                key.item_id.as_str(),
                i64::from(spec.quantity - 1),
                key.variant.as_deref(),
            );
        }
    }
    Ok(())
}

fn print_cart(ctx: &Context, store: &Storefront) -> Result<()> {
    let pricing = store.cart().pricing()?;

    ctx.output.header("Your Order");
    for line in &pricing.lines {
        let qty = format!("{}x", line.quantity);
        let label = line.label();
        let total = line.line_total.display();
        ctx.output
            .table_row(&[qty.as_str(), label.as_str(), total.as_str()], &[4, 40, 10]);
    }
    println!();
    ctx.output.total(pricing.item_count, pricing.total);
    ctx.output.debug(&format!(
        "{} {} in cart",
        pricing.lines.len(),
        plural(pricing.lines.len() as u32, "line")
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str, variant: Option<&str>, quantity: u32) -> ItemSpec {
        ItemSpec {
            id: id.to_string(),
            variant: variant.map(str::to_string),
            quantity,
        }
    }

    #[test]
    fn test_parse_item_specs() {
        assert_eq!("k1".parse::<ItemSpec>().unwrap(), spec("k1", None, 1));
        assert_eq!("bg1 x3".parse::<ItemSpec>().unwrap(), spec("bg1", None, 3));
        assert_eq!("bg1 X3".parse::<ItemSpec>().unwrap(), spec("bg1", None, 3));
        assert_eq!(
            "p1:12 inch".parse::<ItemSpec>().unwrap(),
            spec("p1", Some("12 inch"), 1)
        );
        assert_eq!(
            "p3:14 inch Special x2".parse::<ItemSpec>().unwrap(),
            spec("p3", Some("14 inch Special"), 2)
        );
        // A trailing "x" word that is not a count stays part of the variant.
        assert_eq!(
            "p9:Extra Cheese Max".parse::<ItemSpec>().unwrap(),
            spec("p9", Some("Extra Cheese Max"), 1)
        );
    }

    #[test]
    fn test_parse_item_spec_keeps_x_inside_ids() {
        assert_eq!("box1".parse::<ItemSpec>().unwrap(), spec("box1", None, 1));
        assert_eq!("x1".parse::<ItemSpec>().unwrap(), spec("x1", None, 1));
        assert_eq!("bg1x3".parse::<ItemSpec>().unwrap(), spec("bg1x3", None, 1));
        assert_eq!(
            "p1:Box x2".parse::<ItemSpec>().unwrap(),
            spec("p1", Some("Box"), 2)
        );
    }

    #[test]
    fn test_parse_item_spec_errors() {
        assert_eq!("  ".parse::<ItemSpec>(), Err(ItemSpecError::Empty));
        assert!(matches!(":12 inch".parse::<ItemSpec>(), Err(ItemSpecError::MissingId(_))));
        assert!(matches!("c1 x0".parse::<ItemSpec>(), Err(ItemSpecError::ZeroQuantity(_))));
        assert!(matches!(
            "c1 x99999999999".parse::<ItemSpec>(),
            Err(ItemSpecError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_fill_cart_applies_quantities() {
        let mut store = Storefront::default();
        let specs = vec![spec("p1", Some("12 inch"), 3), spec("c2", None, 2), spec("p1", None, 1)];
        fill_cart(&mut store, &specs).unwrap();

        // p1 without a variant resolves to its first size, a separate line.
        assert_eq!(store.cart().line_count(), 3);
        assert_eq!(store.item_count(), 6);
        assert_eq!(store.total().unwrap().amount_cents, 3 * 1300 + 2 * 550 + 1100);
    }

    #[test]
    fn test_fill_cart_rejects_unknown_variant() {
        let mut store = Storefront::default();
        let err = fill_cart(&mut store, &[spec("p1", Some("9 inch"), 1)]).unwrap_err();
        assert!(format!("{:#}", err).contains("9 inch"));
        assert!(store.cart().is_empty());
    }
}
