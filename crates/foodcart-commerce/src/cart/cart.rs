//! The cart manager.

use crate::cart::{AddOn, CartLine, DisplayLine};
use crate::catalog::ItemSelection;
use crate::error::CommerceError;
use crate::ids::{ItemId, LineId, LineIdSequence};
use crate::money::Money;
use serde::Serialize;
use tracing::debug;

/// Direction of a quantity change from the cart page's +/- buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityDelta {
    Increment,
    Decrement,
}

/// An in-memory shopping cart.
///
/// Lines keep their add order; removing a line never reorders the rest.
/// The cart owns its id sequence, so ids stay unique for the cart's whole
/// lifetime, across `clear` too.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    #[serde(skip)]
    ids: LineIdSequence,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new line.
    ///
    /// Returns an error if:
    /// - quantity is below 1
    /// - the line total, the cart's item count or its grand total would
    ///   overflow
    pub fn add_line(
        &mut self,
        item_id: ItemId,
        name: impl Into<String>,
        base_unit_price: Money,
        quantity: i64,
        add_ons: Vec<AddOn>,
        image: impl Into<String>,
    ) -> Result<&CartLine, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        // Price before taking an id so a failed add leaves no trace.
        let line_total = crate::cart::price_line(base_unit_price, &add_ons, quantity)?;
        self.check_headroom(quantity, line_total)?;

        let id = self.ids.next_for(&item_id);
        let line = CartLine::new(
            id,
            item_id,
            name.into(),
            base_unit_price,
            quantity,
            add_ons,
            image.into(),
        )?;

        debug!(
            line_id = %line.id(),
            item_id = %line.item_id(),
            quantity = line.quantity(),
            line_total = %line.line_total(),
            "cart line added"
        );

        self.lines.push(line);
        let index = self.lines.len() - 1;
        Ok(&self.lines[index])
    }

    /// Add the current state of a menu card selection.
    pub fn add_selection(&mut self, selection: &ItemSelection<'_>) -> Result<&CartLine, CommerceError> {
        let item = selection.item();
        self.add_line(
            item.id.clone(),
            item.name.clone(),
            item.price,
            selection.quantity(),
            selection.selected_add_ons(),
            item.image.clone(),
        )
    }

    /// Step a line's quantity by one.
    ///
    /// Decrementing a line at quantity 1 is a no-op, not an error. An
    /// increment that would overflow the line or cart totals fails with
    /// `Overflow` and changes nothing.
    pub fn change_quantity(
        &mut self,
        line_id: &LineId,
        delta: QuantityDelta,
    ) -> Result<&CartLine, CommerceError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id() == line_id)
            .ok_or_else(|| CommerceError::LineNotFound(line_id.to_string()))?;

        let current = &self.lines[index];
        let quantity = match delta {
            QuantityDelta::Increment => {
                let quantity = current
                    .quantity()
                    .checked_add(1)
                    .ok_or(CommerceError::Overflow)?;
                let line_total =
                    crate::cart::price_line(current.base_unit_price(), current.add_ons(), quantity)?;
                // Totals only grow on increment.
                let growth = Money::new(line_total.amount() - current.line_total().amount());
                self.check_headroom(1, growth)?;
                quantity
            }
            QuantityDelta::Decrement if current.quantity() <= 1 => {
                debug!(line_id = %line_id, "decrement at floor ignored");
                return Ok(&self.lines[index]);
            }
            QuantityDelta::Decrement => current.quantity() - 1,
        };

        let line = &mut self.lines[index];
        line.set_quantity(quantity)?;
        debug!(
            line_id = %line_id,
            quantity = line.quantity(),
            line_total = %line.line_total(),
            "cart line quantity changed"
        );
        Ok(line)
    }

    /// Remove a line.
    ///
    /// Removing an id that is not in the cart is an error, also when it was
    /// removed before.
    pub fn remove_line(&mut self, line_id: &LineId) -> Result<CartLine, CommerceError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id() == line_id)
            .ok_or_else(|| CommerceError::LineNotFound(line_id.to_string()))?;

        let removed = self.lines.remove(index);
        debug!(line_id = %line_id, remaining = self.lines.len(), "cart line removed");
        Ok(removed)
    }

    /// Total item count (sum of quantities).
    ///
    /// Additions are checked against this sum, so it always fits.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity()).sum()
    }

    /// Sum of all line totals.
    ///
    /// Additions are checked against this sum, so it always fits.
    pub fn grand_total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Fail with `Overflow` unless `quantity` more items worth `amount` keep
    /// the cart-wide sums in range.
    fn check_headroom(&self, quantity: i64, amount: Money) -> Result<(), CommerceError> {
        self.item_count()
            .checked_add(quantity)
            .ok_or(CommerceError::Overflow)?;
        self.grand_total()
            .checked_add(amount)
            .ok_or(CommerceError::Overflow)?;
        Ok(())
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        debug!(lines = self.lines.len(), "cart cleared");
        self.lines.clear();
    }

    /// Read-only projection of the cart for rendering.
    pub fn snapshot_for_display(&self) -> Vec<DisplayLine> {
        self.lines.iter().map(DisplayLine::from_line).collect()
    }

    /// Lines in add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get a line by id.
    pub fn get_line(&self, line_id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id() == line_id)
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (not items).
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
