//! Interactive ordering: browse the menu, edit the cart, check out.

use anyhow::{bail, Context as _, Result};
use chrono::Local;
use dialoguer::{Confirm, Input, Select};
use foodcart_commerce::prelude::*;
use foodcart_notify::{LogSubmitter, TelegramSubmitter};

use super::OrderArgs;
use crate::context::Context;
use crate::output::{quantity_badge, Output};

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("The order command is interactive and does not support --json");
    }
    let menu = &ctx.config.menu;
    if menu.is_empty() {
        bail!("The menu is empty. Run `foodcart config init` for a demo menu.");
    }

    let submitter = build_submitter(&args, ctx)?;
    ctx.output.debug(&format!("Orders go through the {} submitter", submitter.name()));

    let mut cart = Cart::new();
    let mut flow = CheckoutFlow::with_summary(OrderSummary::new(
        ctx.config.shop.currency_symbol.clone(),
    ));

    ctx.output.header(&ctx.config.shop.name);

    loop {
        let choices = [
            "Browse menu".to_string(),
            format!("View cart ({} · {})", cart.item_count(), ctx.output.money(cart.grand_total())),
            "Checkout".to_string(),
            "Quit".to_string(),
        ];
        let choice = Select::new()
            .with_prompt("What next?")
            .items(&choices)
            .default(0)
            .interact()?;

        match choice {
            0 => browse_menu(menu, &mut cart, &ctx.output)?,
            1 => edit_cart(&mut cart, &ctx.output)?,
            2 => checkout(&mut flow, &mut cart, submitter.as_ref(), &ctx.output).await?,
            _ => {
                if cart.is_empty()
                    || Confirm::new()
                        .with_prompt("Discard the cart and quit?")
                        .default(false)
                        .interact()?
                {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn build_submitter(args: &OrderArgs, ctx: &Context) -> Result<Box<dyn OrderSubmitter>> {
    if args.dry_run {
        ctx.output.info("Dry run: orders are logged, not sent");
        return Ok(Box::new(LogSubmitter::new()));
    }

    match ctx.config.telegram.to_submitter_config() {
        Some(config) => {
            let submitter =
                TelegramSubmitter::new(config).context("Failed to set up Telegram delivery")?;
            Ok(Box::new(submitter))
        }
        None => {
            ctx.output.warn(
                "Telegram is not configured; orders will be logged only. \
                 Set FOODCART_BOT_TOKEN and FOODCART_CHAT_ID to send them.",
            );
            Ok(Box::new(LogSubmitter::new()))
        }
    }
}

fn browse_menu(menu: &Menu, cart: &mut Cart, output: &Output) -> Result<()> {
    let mut choices: Vec<String> = menu
        .items
        .iter()
        .map(|item| format!("{}  {}", item.name, output.money(item.price)))
        .collect();
    choices.push("Back".to_string());

    let choice = Select::new()
        .with_prompt("Menu")
        .items(&choices)
        .default(0)
        .interact()?;

    match menu.items.get(choice) {
        Some(item) => customize_item(item, cart, output),
        None => Ok(()),
    }
}

/// Quantity and add-on picker for one dish, then add it to the cart.
fn customize_item(item: &MenuItem, cart: &mut Cart, output: &Output) -> Result<()> {
    if let Some(description) = &item.description {
        output.info(description);
    }

    let mut selection = ItemSelection::new(item);
    let mut cursor = 0;

    loop {
        let preview = selection.preview_total()?;
        let mut choices = vec![
            format!("+ more ({})", selection.quantity()),
            "- less".to_string(),
        ];
        choices.extend(
            item.add_ons
                .iter()
                .enumerate()
                .map(|(i, add_on)| add_on_choice(add_on, selection.is_checked(i), output)),
        );
        let add_index = choices.len();
        choices.push(format!("Add to cart: {}", output.money(preview)));
        choices.push("Back".to_string());

        cursor = Select::new()
            .with_prompt(&item.name)
            .items(&choices)
            .default(cursor.min(choices.len() - 1))
            .interact()?;

        match cursor {
            0 => selection.increment(),
            1 => selection.decrement(),
            i if i == add_index => {
                let line = cart.add_selection(&selection)?;
                output.success(&format!(
                    "Added {} {} ({})",
                    line.name(),
                    quantity_badge(line.quantity()),
                    output.money(line.line_total())
                ));
                return Ok(());
            }
            i if i > add_index => return Ok(()),
            i => {
                selection.toggle_add_on(i - 2)?;
            }
        }
    }
}

fn add_on_choice(add_on: &AddOn, checked: bool, output: &Output) -> String {
    format!(
        "[{}] {} +{}",
        if checked { "x" } else { " " },
        add_on.label(),
        output.money(add_on.unit_price)
    )
}

fn cart_line_choice(line: &DisplayLine, output: &Output) -> String {
    let mut label = format!(
        "{} {}  {}",
        line.line.name(),
        quantity_badge(line.line.quantity()),
        output.money(line.line.line_total())
    );
    if line.has_add_ons() {
        label.push_str(&format!("  ({})", line.add_ons_text));
    }
    label
}

fn edit_cart(cart: &mut Cart, output: &Output) -> Result<()> {
    loop {
        if cart.is_empty() {
            output.info("The cart is empty");
            return Ok(());
        }

        let snapshot = cart.snapshot_for_display();
        let mut choices: Vec<String> = snapshot
            .iter()
            .map(|line| cart_line_choice(line, output))
            .collect();
        choices.push("Back".to_string());

        let choice = Select::new()
            .with_prompt(format!(
                "Cart: {} item(s), total {}",
                cart.item_count(),
                output.money(cart.grand_total())
            ))
            .items(&choices)
            .default(0)
            .interact()?;

        // Lines are addressed by id from here on, never by list position.
        let Some(line_id) = snapshot.get(choice).map(|l| l.line.id().clone()) else {
            return Ok(());
        };

        let actions = ["Increase", "Decrease", "Remove", "Back"];
        let action = Select::new()
            .with_prompt(format!("Line {}", line_id))
            .items(&actions)
            .default(0)
            .interact()?;

        let result = match action {
            0 => cart
                .change_quantity(&line_id, QuantityDelta::Increment)
                .map(|_| ()),
            1 => cart
                .change_quantity(&line_id, QuantityDelta::Decrement)
                .map(|_| ()),
            2 => cart.remove_line(&line_id).map(|removed| {
                output.success(&format!("Removed {}", removed.name()));
            }),
            _ => Ok(()),
        };
        if let Err(e) = result {
            output.warn(&e.to_string());
        }
    }
}

fn prompt_required(prompt: &str) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &'static str> {
            if input.trim().is_empty() {
                Err("This field is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

fn prompt_contact() -> Result<ContactDetails> {
    let name = prompt_required("Name")?;
    let phone = prompt_required("Phone")?;
    let address = prompt_required("Delivery address")?;
    let comments = Input::<String>::new()
        .with_prompt("Comments (optional)")
        .allow_empty(true)
        .interact_text()?;

    Ok(ContactDetails::new(name, phone, address).with_comments(comments.trim()))
}

async fn checkout(
    flow: &mut CheckoutFlow,
    cart: &mut Cart,
    submitter: &dyn OrderSubmitter,
    output: &Output,
) -> Result<()> {
    if let Err(e) = flow.begin(cart) {
        output.warn(&format!("{}. Add something from the menu first.", e));
        return Ok(());
    }

    output.header("Order form");
    for line in cart.snapshot_for_display() {
        output.list_item(&cart_line_choice(&line, output));
    }
    output.kv("total", &output.money(cart.grand_total()));

    let contact = prompt_contact()?;

    loop {
        let spinner = output.spinner(&format!("Sending order via {}...", submitter.name()));
        let result = flow.submit(cart, &contact, submitter).await.map(|_| ());
        spinner.finish_and_clear();

        match result {
            Ok(()) => break,
            Err(e) => {
                output.error(&format!("Order was not sent: {}", e));
                output.info("Your cart is unchanged.");
                let retry = Confirm::new()
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    flow.cancel()?;
                    return Ok(());
                }
            }
        }
    }

    if output.is_verbose() {
        if let Some(receipt) = flow.receipt() {
            output.debug("Order text:");
            output.block(&receipt.text);
        }
    }

    let receipt = flow.acknowledge(cart)?;
    output.success(&format!(
        "Order placed at {}: {} item(s), {}",
        Local::now().format("%H:%M"),
        receipt.item_count,
        output.money(receipt.total)
    ));
    output.info("We will call you to confirm the delivery time.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_on_choice_marks_selection() {
        let output = Output::new(false, false);
        let cheese = AddOn::new("Сыр", "моцарелла", Money::new(60));

        assert_eq!(add_on_choice(&cheese, false, &output), "[ ] Сыр (моцарелла) +60 ₽");
        assert_eq!(add_on_choice(&cheese, true, &output), "[x] Сыр (моцарелла) +60 ₽");
    }

    #[test]
    fn test_cart_line_choice_lists_add_ons() {
        let output = Output::new(false, false);
        let mut cart = Cart::new();
        cart.add_line(
            ItemId::new("pizza"),
            "Pizza",
            Money::new(300),
            2,
            vec![AddOn::new("Сыр", "", Money::new(50))],
            "",
        )
        .unwrap();
        cart.add_line(ItemId::new("mors"), "Mors", Money::new(150), 1, vec![], "")
            .unwrap();

        let snapshot = cart.snapshot_for_display();
        let pizza = cart_line_choice(&snapshot[0], &output);
        assert!(pizza.starts_with("Pizza "));
        assert!(pizza.contains("700 ₽"));
        assert!(pizza.ends_with(&format!("({})", snapshot[0].add_ons_text)));

        let mors = cart_line_choice(&snapshot[1], &output);
        assert!(mors.contains("150 ₽"));
        assert!(!mors.contains('('));
    }
}
