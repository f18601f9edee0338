//! Pending selection on a menu card, before it goes into the cart.

use crate::cart::{price_line, AddOn};
use crate::catalog::MenuItem;
use crate::error::CommerceError;
use crate::money::Money;

/// Quantity stepper and add-on checkboxes for one menu item.
///
/// The stepper never goes below 1, so a selection is always valid input
/// for [`Cart::add_selection`](crate::cart::Cart::add_selection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSelection<'a> {
    item: &'a MenuItem,
    quantity: i64,
    checked: Vec<bool>,
}

impl<'a> ItemSelection<'a> {
    /// Start a selection with quantity 1 and nothing checked.
    pub fn new(item: &'a MenuItem) -> Self {
        Self {
            item,
            quantity: 1,
            checked: vec![false; item.add_ons.len()],
        }
    }

    pub fn item(&self) -> &'a MenuItem {
        self.item
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Step down, stopping at 1.
    pub fn decrement(&mut self) {
        if self.quantity > 1 {
            self.quantity -= 1;
        }
    }

    /// Set the quantity directly, clamped to at least 1.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity.max(1);
    }

    /// Flip the checkbox of the add-on at `index`; returns the new state.
    pub fn toggle_add_on(&mut self, index: usize) -> Result<bool, CommerceError> {
        let slot = self
            .checked
            .get_mut(index)
            .ok_or(CommerceError::AddOnNotFound(index))?;
        *slot = !*slot;
        Ok(*slot)
    }

    /// Check if the add-on at `index` is selected.
    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// Checked add-ons in menu order.
    pub fn selected_add_ons(&self) -> Vec<AddOn> {
        self.item
            .add_ons
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(add_on, _)| add_on.clone())
            .collect()
    }

    /// The line total this selection would produce.
    pub fn preview_total(&self) -> Result<Money, CommerceError> {
        price_line(self.item.price, &self.selected_add_ons(), self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burger() -> MenuItem {
        MenuItem::new("burger", "Burger", Money::new(200))
            .with_add_on(AddOn::new("Bacon", "pork", Money::new(70)))
            .with_add_on(AddOn::new("Cheese", "cheddar", Money::new(40)))
    }

    #[test]
    fn test_stepper_floor() {
        let item = burger();
        let mut selection = ItemSelection::new(&item);
        selection.decrement();
        assert_eq!(selection.quantity(), 1);
        selection.increment();
        selection.increment();
        assert_eq!(selection.quantity(), 3);
        selection.set_quantity(-5);
        assert_eq!(selection.quantity(), 1);
    }

    #[test]
    fn test_toggle_add_ons_keeps_menu_order() {
        let item = burger();
        let mut selection = ItemSelection::new(&item);
        assert!(selection.toggle_add_on(1).unwrap());
        assert!(selection.toggle_add_on(0).unwrap());

        let names: Vec<String> = selection
            .selected_add_ons()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Bacon", "Cheese"]);

        assert!(!selection.toggle_add_on(0).unwrap());
        assert!(!selection.is_checked(0));
        assert!(selection.is_checked(1));
    }

    #[test]
    fn test_toggle_unknown_add_on() {
        let item = burger();
        let mut selection = ItemSelection::new(&item);
        assert_eq!(
            selection.toggle_add_on(7).unwrap_err(),
            CommerceError::AddOnNotFound(7)
        );
    }

    #[test]
    fn test_preview_total() {
        let item = burger();
        let mut selection = ItemSelection::new(&item);
        selection.toggle_add_on(1).unwrap();
        selection.increment();
        assert_eq!(selection.preview_total().unwrap(), Money::new(480));
    }
}
