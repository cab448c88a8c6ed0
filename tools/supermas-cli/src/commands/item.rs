//! Show a single menu item.

use anyhow::Result;

use super::ItemArgs;
use crate::context::Context;
use crate::output::delta_label;

/// Run the item command.
pub async fn run(args: ItemArgs, ctx: &Context) -> Result<()> {
    let store = ctx.storefront()?;
    let item = store.catalog().get(&args.id)?;

    if ctx.output.is_json() {
        ctx.output.json(item);
        return Ok(());
    }

    ctx.output.header(&item.name);
    println!("  {}", item.description);
    println!();
    ctx.output.kv("ID", item.id.as_str());
    ctx.output.kv("Category", item.category.display_name());

    if item.has_variants() {
        ctx.output.kv("Options", "");
        for (i, variant) in item.variants.iter().enumerate() {
            let price = item.price_with(Some(variant)).display();
            let default = if i == 0 { "(default)" } else { "" };
            let delta = delta_label(variant.price_delta);
            ctx.output.table_row(
                &[variant.name.as_str(), price.as_str(), delta.as_str(), default],
                &[18, 10, 8, 9],
            );
        }
    } else {
        ctx.output.kv("Price", &item.price.display());
    }

    if !item.allergens.is_empty() {
        ctx.output.kv("Allergens", &item.allergens.join(", "));
    }

    Ok(())
}
