//! Menu listing.

use anyhow::Result;
use console::style;

use super::MenuArgs;
use crate::context::Context;

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let menu = &ctx.config.menu;

    if ctx.output.is_json() {
        ctx.output.json(menu);
        return Ok(());
    }

    ctx.output.header(&ctx.config.shop.name);

    if menu.is_empty() {
        ctx.output.warn("The menu is empty. Run `foodcart config init` for a demo menu.");
        return Ok(());
    }

    for item in &menu.items {
        println!(
            "\n  {}  {}",
            style(&item.name).bold(),
            style(ctx.output.money(item.price)).green()
        );
        if let Some(description) = &item.description {
            println!("  {}", style(description).dim());
        }
        if args.details && !item.image.is_empty() {
            ctx.output.kv("image", &item.image);
        }
        for add_on in &item.add_ons {
            let label = if args.details {
                add_on.label()
            } else {
                add_on.name.clone()
            };
            ctx.output
                .list_item(&format!("+ {} {}", label, ctx.output.money(add_on.unit_price)));
        }
    }
    println!();

    Ok(())
}
