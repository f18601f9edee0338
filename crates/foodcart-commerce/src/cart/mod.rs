//! Shopping cart module.
//!
//! Contains the cart manager, its lines and add-ons, and display snapshots.

mod cart;
mod display;
mod line;

pub use cart::{Cart, QuantityDelta};
pub use display::{format_add_on_names, format_add_ons, DisplayLine};
pub use line::{price_line, unit_price, AddOn, CartLine};
