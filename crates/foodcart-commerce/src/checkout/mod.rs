//! Checkout module.
//!
//! Contains contact details, the order summary formatter, the submission
//! boundary and the checkout flow.

mod contact;
mod flow;
mod submit;
mod summary;

pub use contact::ContactDetails;
pub use flow::{CheckoutError, CheckoutFlow, CheckoutStep, OrderReceipt};
pub use submit::{OrderSubmitter, SubmitError};
pub use summary::OrderSummary;
