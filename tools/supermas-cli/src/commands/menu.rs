//! List the menu.

use anyhow::{anyhow, Result};
use serde::Serialize;

use supermas_commerce::catalog::{Category, CategoryFilter, MenuItem};

use super::MenuArgs;
use crate::context::Context;
use crate::output::price_label;

/// Menu entry as emitted with `--json`.
#[derive(Serialize)]
struct MenuEntry<'a> {
    #[serde(flatten)]
    item: &'a MenuItem,
    starting_price: String,
}

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let filter = parse_filter(args.category.as_deref())?;
    let store = ctx.storefront()?;
    let items = store.menu(filter);

    if ctx.output.is_json() {
        let entries: Vec<MenuEntry> = items
            .iter()
            .map(|item| MenuEntry {
                item: *item,
                starting_price: item.starting_price().display(),
            })
            .collect();
        ctx.output.json(&entries);
        return Ok(());
    }

    ctx.output.header(&format!("{} Menu - {}", store.store().name, filter.label()));

    if items.is_empty() {
        ctx.output.info("Nothing on the menu here yet.");
        return Ok(());
    }

    let categories: Vec<Category> = match filter {
        CategoryFilter::All => store.catalog().categories(),
        CategoryFilter::Only(c) => vec![c],
    };

    for category in categories {
        println!();
        println!("  {}", console::style(category.display_name()).bold());
        for item in items.iter().filter(|i| i.category == category) {
            print_row(ctx, item);
        }
    }

    println!();
    ctx.output
        .info("Run `supermas item <ID>` for sizes and allergens.");

    Ok(())
}

fn print_row(ctx: &Context, item: &MenuItem) {
    let price = price_label(item);
    let allergens = if item.allergens.is_empty() {
        String::new()
    } else {
        format!("({})", item.allergens.join(","))
    };
    ctx.output
        .table_row(
            &[item.id.as_str(), item.name.as_str(), price.as_str(), allergens.as_str()],
            &[4, 36, 16, 12],
        );
}

/// Parse `--category`, defaulting to every tab.
pub(crate) fn parse_filter(code: Option<&str>) -> Result<CategoryFilter> {
    match code {
        None => Ok(CategoryFilter::All),
        Some(code) => CategoryFilter::from_code(code).ok_or_else(|| {
            let known: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
            anyhow!("Unknown category '{}'. Expected ALL or one of: {}", code, known.join(", "))
        }),
    }
}
