//! Dry-run submitter.

use async_trait::async_trait;
use foodcart_commerce::checkout::{OrderSubmitter, SubmitError};
use tracing::info;

/// Writes the order to the log and reports success.
///
/// Useful for trying the storefront without a bot configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSubmitter;

impl LogSubmitter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OrderSubmitter for LogSubmitter {
    async fn submit_order(&self, text: &str) -> Result<(), SubmitError> {
        info!(order = %text, "order details (dry run, not sent)");
        Ok(())
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}
