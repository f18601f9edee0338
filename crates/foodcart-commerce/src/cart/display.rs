//! Read-only cart projections for rendering.

use crate::cart::{AddOn, CartLine};
use serde::Serialize;

/// A cart line paired with its pre-formatted add-on text.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DisplayLine {
    /// Copy of the line at snapshot time.
    pub line: CartLine,
    /// `"<name> (<composition>)"` per add-on, comma-separated; empty
    /// when the line has no add-ons.
    pub add_ons_text: String,
}

impl DisplayLine {
    pub(crate) fn from_line(line: &CartLine) -> Self {
        Self {
            add_ons_text: format_add_ons(line.add_ons()),
            line: line.clone(),
        }
    }

    /// Check if the line carries any add-ons.
    pub fn has_add_ons(&self) -> bool {
        !self.line.add_ons().is_empty()
    }
}

/// Join add-on labels the way the cart page shows them.
pub fn format_add_ons(add_ons: &[AddOn]) -> String {
    add_ons
        .iter()
        .map(AddOn::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Join add-on names only, as used in the order message.
pub fn format_add_on_names(add_ons: &[AddOn]) -> String {
    add_ons
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
