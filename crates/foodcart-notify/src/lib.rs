//! Order delivery for foodcart.
//!
//! This crate provides:
//! - `TelegramSubmitter` - posts the order text to a chat through the Bot API
//! - `LogSubmitter` - dry run that only logs the order
//! - `TimeoutConfig` - per-request timeouts
//!
//! Both submitters implement `foodcart_commerce::checkout::OrderSubmitter`
//! and make a single attempt per order.

mod dry_run;
mod error;
mod telegram;
mod timeout;

pub use dry_run::*;
pub use error::*;
pub use telegram::*;
pub use timeout::*;
