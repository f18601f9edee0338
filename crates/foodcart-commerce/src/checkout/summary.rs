//! Order summary text sent to the kitchen.

use crate::cart::{format_add_on_names, Cart, DisplayLine};
use crate::checkout::ContactDetails;
use crate::error::CommerceError;
use crate::money::{Money, DEFAULT_CURRENCY_SYMBOL};

const HEADER: &str = "НОВЫЙ ЗАКАЗ";
const ORDER_HEADER: &str = "ЗАКАЗ:";
const TOTAL_LABEL: &str = "ИТОГО";
const PIECES: &str = "шт.";
const ADD_ONS_LABEL: &str = "Допы";

/// Builds the human-readable order message.
///
/// The output is a pure function of the lines, contact details and
/// currency symbol; no I/O happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    currency_symbol: String,
}

impl Default for OrderSummary {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_SYMBOL)
    }
}

impl OrderSummary {
    /// Create a formatter printing amounts with `currency_symbol`.
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Format the order for a cart.
    pub fn format_cart(&self, cart: &Cart, contact: &ContactDetails) -> Result<String, CommerceError> {
        self.format(&cart.snapshot_for_display(), contact)
    }

    /// Format the order from a display snapshot.
    ///
    /// Fails with `EmptyCart` when there are no lines.
    pub fn format(&self, lines: &[DisplayLine], contact: &ContactDetails) -> Result<String, CommerceError> {
        if lines.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let mut out: Vec<String> = Vec::with_capacity(lines.len() * 2 + 10);
        out.push(HEADER.to_string());
        out.push(String::new());
        out.push(format!("Имя: {}", contact.name));
        out.push(format!("Телефон: {}", contact.phone));
        out.push(format!("Адрес: {}", contact.address));
        if let Some(comments) = contact.comments() {
            out.push(format!("Комментарий: {}", comments));
        }
        out.push(String::new());
        out.push(ORDER_HEADER.to_string());

        for (index, display) in lines.iter().enumerate() {
            let line = &display.line;
            out.push(format!(
                "{}. {} - {} {} - {}",
                index + 1,
                line.name(),
                line.quantity(),
                PIECES,
                line.line_total().display_with(&self.currency_symbol),
            ));
            if display.has_add_ons() {
                out.push(format!(
                    "   {}: {}",
                    ADD_ONS_LABEL,
                    format_add_on_names(line.add_ons())
                ));
            }
        }

        let line_totals: Vec<Money> = lines.iter().map(|d| d.line.line_total()).collect();
        let total = Money::try_sum(&line_totals)?;
        out.push(String::new());
        out.push(format!(
            "{}: {}",
            TOTAL_LABEL,
            total.display_with(&self.currency_symbol)
        ));

        Ok(out.join("\n"))
    }
}
