//! Store details.

use anyhow::Result;

use super::InfoArgs;
use crate::context::Context;

/// Run the info command.
pub async fn run(_args: InfoArgs, ctx: &Context) -> Result<()> {
    let store = ctx.storefront()?;
    let info = store.store();

    if ctx.output.is_json() {
        ctx.output.json(info);
        return Ok(());
    }

    ctx.output.header(&info.name);
    ctx.output.kv("Address", &info.address);
    ctx.output.kv("Phone", &info.phone);

    if !info.opening_hours.is_empty() {
        ctx.output.kv("Opening hours", "");
        for hours in &info.opening_hours {
            ctx.output.list_item(&hours.display());
        }
    }

    ctx.output.kv(
        "Menu",
        &format!(
            "{} items in {} categories",
            store.catalog().len(),
            store.catalog().categories().len()
        ),
    );

    Ok(())
}
