//! Boundary to whatever delivers the order off-system.

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by an order submitter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The request never got a usable answer (network, timeout, bad body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The receiving side answered and refused the message.
    #[error("Order rejected{}: {description}", status_suffix(.status))]
    Rejected {
        status: Option<u16>,
        description: String,
    },

    /// The submitter is not configured well enough to send anything.
    #[error("Submitter configuration error: {0}")]
    Config(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// Delivers a formatted order text.
///
/// Implementations make exactly one attempt per call. Retrying is left to
/// the user, who still has the cart and form data after a failure.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Send the order text.
    async fn submit_order(&self, text: &str) -> Result<(), SubmitError>;

    /// Short name for logs.
    fn name(&self) -> &str {
        "submitter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display() {
        let err = SubmitError::Rejected {
            status: Some(400),
            description: "Bad Request: chat not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Order rejected (HTTP 400): Bad Request: chat not found"
        );

        let err = SubmitError::Rejected {
            status: None,
            description: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "Order rejected: nope");
    }
}
