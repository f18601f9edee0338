//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart, catalog and checkout operations.
///
/// All of these are local and recoverable; the operation that returns one
/// leaves its state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Quantity below 1 passed to an add.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Line id does not match any current line.
    #[error("Line not found: {0}")]
    LineNotFound(String),

    /// Operation needs at least one cart line.
    #[error("Cart is empty")]
    EmptyCart,

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in price calculation")]
    Overflow,

    /// Add-on index out of range for a menu item.
    #[error("Add-on not found: #{0}")]
    AddOnNotFound(usize),

    /// Menu item not found.
    #[error("Menu item not found: {0}")]
    ItemNotFound(String),

    /// Required contact field left blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
