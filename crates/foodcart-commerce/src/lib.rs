//! Cart and checkout core for a food-ordering storefront.
//!
//! - **Catalog**: menu items, add-ons, the pending per-item selection
//! - **Cart**: the cart manager, lines with derived totals, display snapshots
//! - **Checkout**: contact details, order summary text, submission boundary
//!
//! # Example
//!
//! ```rust
//! use foodcart_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! let id = cart
//!     .add_line(ItemId::new("pizza"), "Pizza", Money::new(300), 1, vec![], "pizza.jpg")
//!     .unwrap()
//!     .id()
//!     .clone();
//! cart.change_quantity(&id, QuantityDelta::Increment).unwrap();
//! assert_eq!(cart.grand_total(), Money::new(600));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::{ItemId, LineId};
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{ItemId, LineId};
    pub use crate::money::{Money, DEFAULT_CURRENCY_SYMBOL};

    // Catalog
    pub use crate::catalog::{ItemSelection, Menu, MenuItem};

    // Cart
    pub use crate::cart::{AddOn, Cart, CartLine, DisplayLine, QuantityDelta};

    // Checkout
    pub use crate::checkout::{
        CheckoutError, CheckoutFlow, CheckoutStep, ContactDetails, OrderReceipt, OrderSubmitter,
        OrderSummary, SubmitError,
    };
}
